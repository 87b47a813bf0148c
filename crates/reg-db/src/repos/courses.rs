//! Course repository: identity listing, freshness stamping, staleness cleanup.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use reg_core::tunables::STAMP_CONCURRENCY;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::RegDb;
use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, parse_datetime};

impl RegDb {
    /// Identity keys of every stored course.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn course_ids(&self) -> Result<HashSet<String>, DatabaseError> {
        let mut rows = self.conn().query("SELECT id FROM courses", ()).await?;
        let mut ids = HashSet::new();
        while let Some(row) = rows.next().await? {
            ids.insert(row.get::<String>(0)?);
        }
        Ok(ids)
    }

    /// Stored `last_update_time` of one course, if present.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the stored value does
    /// not parse.
    pub async fn course_last_update_time(
        &self,
        id: &str,
    ) -> Result<Option<DateTime<Utc>>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT last_update_time FROM courses WHERE id = ?1", [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(parse_datetime(&row.get::<String>(0)?)?)),
            None => Ok(None),
        }
    }

    /// Mark courses as seen at `now`.
    ///
    /// Runs one update per course with at most [`STAMP_CONCURRENCY`] in
    /// flight. Stamps never move a timestamp backwards. Returns the number
    /// of courses updated.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any update fails or its task panics.
    pub async fn stamp_courses(
        &self,
        ids: BTreeSet<String>,
        now: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let stamp = format_timestamp(now);
        let semaphore = Arc::new(Semaphore::new(STAMP_CONCURRENCY));
        let mut set = JoinSet::new();

        for id in ids {
            let conn = self.conn().clone();
            let sem = Arc::clone(&semaphore);
            let stamp = stamp.clone();
            set.spawn(async move {
                let _permit = sem
                    .acquire()
                    .await
                    .map_err(|e| DatabaseError::Task(format!("stamp semaphore closed: {e}")))?;
                conn.execute(
                    "UPDATE courses SET last_update_time = max(last_update_time, ?1) WHERE id = ?2",
                    libsql::params![stamp.as_str(), id.as_str()],
                )
                .await
                .map_err(DatabaseError::from)
            });
        }

        let mut stamped = 0;
        while let Some(joined) = set.join_next().await {
            stamped += joined.map_err(|e| DatabaseError::Task(e.to_string()))??;
        }
        Ok(stamped)
    }

    /// Delete courses in `terms` last updated before `cutoff`.
    ///
    /// Their sections go with them through the foreign-key cascade. Courses
    /// in other terms are untouched. Returns the number of courses deleted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn delete_stale_courses(
        &self,
        terms: &BTreeSet<String>,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        if terms.is_empty() {
            return Ok(0);
        }

        let placeholders: Vec<String> = (2..terms.len() + 2).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "DELETE FROM courses WHERE last_update_time < ?1 AND term_id IN ({})",
            placeholders.join(", ")
        );

        let mut params: Vec<libsql::Value> = vec![format_timestamp(cutoff).into()];
        params.extend(terms.iter().map(|t| libsql::Value::from(t.as_str())));

        let deleted = self
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        Ok(deleted)
    }
}
