//! Timestamp conversion between scraper epochs and stored TEXT columns.
//!
//! Timestamps are stored as RFC 3339 UTC with millisecond precision and a `Z`
//! suffix. The fixed width makes lexicographic comparison in SQL agree with
//! chronological order, which staleness cleanup and `max()` merges rely on.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Render a timestamp in the stored format.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert scraper epoch milliseconds, falling back to `now` when absent or
/// out of range.
///
/// Only years 0000 through 9999 render at the fixed width, so anything
/// outside them counts as out of range.
#[must_use]
pub fn timestamp_from_millis(millis: Option<i64>, now: DateTime<Utc>) -> DateTime<Utc> {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .filter(|at| (0..=9999).contains(&at.year()))
        .unwrap_or(now)
}

/// Parse a stored TEXT timestamp.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00.000Z"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}
