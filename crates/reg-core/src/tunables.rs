//! Fixed tunables consumed by the reconciliation engine and the term cache.

use std::time::Duration;

/// Maximum rows per bulk upsert statement.
pub const BATCH_CHUNK_SIZE: usize = 2000;

/// Courses in a covered term whose `last_update_time` is older than this are
/// removed by staleness cleanup.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(48 * 60 * 60);

/// Maximum number of concurrent freshness-stamp updates.
pub const STAMP_CONCURRENCY: usize = 10;

/// How long a cached term listing stays valid.
pub const TERM_CACHE_TTL: Duration = Duration::from_secs(2 * 60 * 60);
