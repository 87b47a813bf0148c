//! Per-sub-college TTL cache of term listings.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use reg_core::entities::TermInfo;
use reg_core::tunables::TERM_CACHE_TTL;
use tokio::sync::Mutex;

use crate::RegDb;
use crate::error::DatabaseError;

#[derive(Debug, Clone)]
struct CachedTerms {
    records: Vec<TermInfo>,
    fetched_at: Instant,
}

/// Caches `term_info` listings keyed by sub-college.
///
/// The lock is released while querying, so two callers missing at the same
/// time may both hit the store; the later write wins.
#[derive(Debug)]
pub struct TermInfoCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedTerms>>,
}

impl Default for TermInfoCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TermInfoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(TERM_CACHE_TTL)
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Terms for `sub_college`, newest first, refreshed when older than the TTL.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a refresh query fails.
    pub async fn get(&self, db: &RegDb, sub_college: &str) -> Result<Vec<TermInfo>, DatabaseError> {
        if let Some(cached) = self.entries.lock().await.get(sub_college) {
            if cached.fetched_at.elapsed() < self.ttl {
                return Ok(cached.records.clone());
            }
        }

        let records = db.list_term_infos(sub_college).await?;
        tracing::debug!(sub_college, count = records.len(), "term info cache refreshed");
        self.entries.lock().await.insert(
            sub_college.to_string(),
            CachedTerms {
                records: records.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(records)
    }

    /// Forget every cached listing.
    pub async fn invalidate(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::helpers::test_db;
    use crate::upsert::upsert_all;

    fn fall(text: &str) -> TermInfo {
        TermInfo {
            term_id: "202110".into(),
            sub_college: "NEU".into(),
            text: text.into(),
        }
    }

    #[tokio::test]
    async fn serves_cached_value_within_ttl() {
        let db = test_db().await;
        upsert_all(db.conn(), &[fall("Fall 2020")], Utc::now()).await.unwrap();

        let cache = TermInfoCache::new();
        assert_eq!(cache.get(&db, "NEU").await.unwrap(), vec![fall("Fall 2020")]);

        upsert_all(db.conn(), &[fall("Fall 2020 Semester")], Utc::now()).await.unwrap();
        assert_eq!(cache.get(&db, "NEU").await.unwrap(), vec![fall("Fall 2020")]);

        cache.invalidate().await;
        assert_eq!(cache.get(&db, "NEU").await.unwrap(), vec![fall("Fall 2020 Semester")]);
    }

    #[tokio::test]
    async fn expired_entries_are_refetched() {
        let db = test_db().await;
        let cache = TermInfoCache::with_ttl(Duration::ZERO);
        assert!(cache.get(&db, "NEU").await.unwrap().is_empty());

        upsert_all(db.conn(), &[fall("Fall 2020")], Utc::now()).await.unwrap();
        assert_eq!(cache.get(&db, "NEU").await.unwrap(), vec![fall("Fall 2020")]);
    }
}
