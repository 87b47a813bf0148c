//! Bulk idempotent upserts.
//!
//! Records are split into chunks of at most [`BATCH_CHUNK_SIZE`] rows (fewer
//! when the column count would exceed `SQLite`'s bound-parameter limit). Each
//! chunk is one multi-row `INSERT .. ON CONFLICT DO UPDATE` statement; the
//! chunks of one call run concurrently and the call fails if any chunk fails.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use reg_core::tunables::BATCH_CHUNK_SIZE;

use crate::columns::{Merge, Record};
use crate::error::DatabaseError;

/// `SQLite`'s default `SQLITE_MAX_VARIABLE_NUMBER`.
const MAX_BOUND_PARAMS: usize = 32_766;

/// Rows per statement for a record type.
#[must_use]
pub fn rows_per_statement<R: Record>() -> usize {
    let per_row = R::COLUMNS.len().max(1);
    BATCH_CHUNK_SIZE.min(MAX_BOUND_PARAMS / per_row).max(1)
}

/// Build the upsert statement for `rows` records of type `R`.
#[must_use]
pub fn upsert_sql<R: Record>(rows: usize) -> String {
    let width = R::COLUMNS.len();
    let names: Vec<&str> = R::COLUMNS.iter().map(|c| c.name).collect();

    let values: Vec<String> = (0..rows)
        .map(|row| {
            let placeholders: Vec<String> = (1..=width)
                .map(|col| format!("?{}", row * width + col))
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();

    let updates: Vec<String> = R::COLUMNS
        .iter()
        .filter(|c| !R::CONFLICT_KEY.contains(&c.name))
        .map(|c| match c.merge {
            Merge::Replace => format!("{0} = excluded.{0}", c.name),
            Merge::Latest => format!("{0} = max({1}.{0}, excluded.{0})", c.name, R::TABLE),
        })
        .collect();

    let on_conflict = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };

    format!(
        "INSERT INTO {} ({}) VALUES {} ON CONFLICT({}) {on_conflict}",
        R::TABLE,
        names.join(", "),
        values.join(", "),
        R::CONFLICT_KEY.join(", "),
    )
}

/// Upsert every record, returning the number of rows written.
///
/// Callers filter out records without a complete key first (see
/// [`Record::is_keyed`]).
///
/// # Errors
///
/// Returns `DatabaseError` if any batch statement fails.
pub async fn upsert_all<R: Record>(
    conn: &libsql::Connection,
    records: &[R],
    now: DateTime<Utc>,
) -> Result<usize, DatabaseError> {
    if records.is_empty() {
        return Ok(0);
    }

    let chunk_size = rows_per_statement::<R>();
    let mut batches = Vec::new();
    for (batch, chunk) in records.chunks(chunk_size).enumerate() {
        let sql = upsert_sql::<R>(chunk.len());
        let params = chunk
            .iter()
            .flat_map(|r| r.encode_row(now))
            .collect::<Result<Vec<_>, _>>()?;
        batches.push(async move {
            let written = conn
                .execute(&sql, libsql::params_from_iter(params))
                .await
                .map_err(|e| {
                    DatabaseError::Query(format!("upsert {} batch {batch}: {e}", R::TABLE))
                })?;
            tracing::debug!(table = R::TABLE, batch, rows = chunk.len(), "upserted batch");
            Ok::<_, DatabaseError>(written)
        });
    }

    try_join_all(batches).await?;
    Ok(records.len())
}
