//! Cross-cutting error types for regsync.
//!
//! Storage errors (`DatabaseError`) live in `reg-db`; the binary converges
//! everything into `anyhow`.

use thiserror::Error;

/// Errors raised while loading scraper output.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Scraper output could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scraper output could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
