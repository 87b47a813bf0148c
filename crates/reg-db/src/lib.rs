//! # reg-db
//!
//! libSQL store for scraped course-registration data.
//!
//! Holds five tables (professors, courses, sections, subjects, term info) and
//! the reconciliation engine that merges a scraper snapshot into them: bulk
//! idempotent upserts, freshness stamping, and term-scoped staleness cleanup.
//!
//! Uses the `libsql` crate in local mode; `:memory:` works for tests.

pub mod columns;
pub mod error;
pub mod helpers;
mod migrations;
pub mod reconcile;
pub mod repos;
pub mod tables;
pub mod term_cache;
pub mod upsert;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use reconcile::{IndexTrigger, NoopTrigger, ReconcileReport, Reconciler};
pub use term_cache::TermInfoCache;

/// Database handle shared by the repos and the reconciler.
pub struct RegDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RegDb {
    /// Open a local database at the given path, creating it if needed.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Sections cascade off courses; must be enabled per connection.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let reg_db = Self { db, conn };
        reg_db.run_migrations().await?;
        Ok(reg_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
