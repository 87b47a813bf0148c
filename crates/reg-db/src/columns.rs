//! Per-entity column descriptors and value encoders.
//!
//! Each persisted record type lists its columns once, as a static table of
//! `(name, reader)` pairs. The reader returns a [`Field`], whose variant fixes
//! how the value is encoded and what an absent value becomes. Every scraped
//! value maps to something storable; only a JSON column whose value cannot be
//! serialized fails to encode.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, timestamp_from_millis};

/// A column value tagged with its semantic kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Identity key, stored verbatim.
    Key(Option<String>),
    /// HTML-entity-decoded text; absent becomes `""`.
    Text(Option<String>),
    /// JSON array of decoded strings; absent becomes `[]`.
    TextArray(Vec<String>),
    /// Integer; absent becomes NULL. Zero is a value, not an absence.
    Integer(Option<i64>),
    /// Epoch milliseconds; absent becomes the run's "now".
    Timestamp(Option<i64>),
    Boolean(bool),
    /// Serialized JSON text; absent becomes `{}`.
    Json(Option<String>),
    /// A JSON value that failed to serialize.
    Unencodable(String),
}

impl Field {
    #[must_use]
    pub fn key(key: Option<String>) -> Self {
        Self::Key(key)
    }

    #[must_use]
    pub fn text(value: &str) -> Self {
        Self::Text(Some(value.to_string()))
    }

    #[must_use]
    pub fn opt_text(value: Option<&str>) -> Self {
        Self::Text(value.map(str::to_string))
    }

    #[must_use]
    pub fn array<'a>(items: impl IntoIterator<Item = &'a String>) -> Self {
        Self::TextArray(items.into_iter().cloned().collect())
    }

    /// Serialize a value for a JSON column, keeping field order.
    ///
    /// A value serializing to `null` counts as absent.
    #[must_use]
    pub fn json<T: Serialize>(value: Option<&T>) -> Self {
        match value.map(serde_json::to_string).transpose() {
            Ok(Some(text)) if text != "null" => Self::Json(Some(text)),
            Ok(_) => Self::Json(None),
            Err(e) => Self::Unencodable(e.to_string()),
        }
    }

    /// Encode into a bound parameter.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for an [`Field::Unencodable`] value.
    pub fn encode(self, now: DateTime<Utc>) -> Result<libsql::Value, DatabaseError> {
        Ok(match self {
            Self::Key(key) => key.map_or(libsql::Value::Null, libsql::Value::Text),
            Self::Text(text) => libsql::Value::Text(decode_entities(text.as_deref().unwrap_or(""))),
            Self::TextArray(items) => {
                let decoded: Vec<String> = items.iter().map(|item| decode_entities(item)).collect();
                libsql::Value::Text(serde_json::Value::from(decoded).to_string())
            }
            Self::Integer(value) => value.map_or(libsql::Value::Null, libsql::Value::Integer),
            Self::Timestamp(millis) => {
                libsql::Value::Text(format_timestamp(timestamp_from_millis(millis, now)))
            }
            Self::Boolean(flag) => libsql::Value::Integer(i64::from(flag)),
            Self::Json(text) => libsql::Value::Text(text.unwrap_or_else(|| "{}".to_string())),
            Self::Unencodable(reason) => {
                return Err(DatabaseError::InvalidState(format!("unencodable JSON: {reason}")));
            }
        })
    }
}

fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// How an upsert merges an incoming value into an existing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Overwrite with the incoming value.
    Replace,
    /// Keep the later of the stored and incoming values.
    Latest,
}

/// One destination column of a record type.
pub struct Column<T> {
    pub name: &'static str,
    pub merge: Merge,
    pub read: fn(&T) -> Field,
}

impl<T> Column<T> {
    pub const fn new(name: &'static str, read: fn(&T) -> Field) -> Self {
        Self {
            name,
            merge: Merge::Replace,
            read,
        }
    }

    /// A timestamp column that never moves backwards.
    pub const fn latest(name: &'static str, read: fn(&T) -> Field) -> Self {
        Self {
            name,
            merge: Merge::Latest,
            read,
        }
    }
}

/// A record type persisted by bulk upsert.
pub trait Record: Sized + 'static {
    /// Destination table.
    const TABLE: &'static str;
    /// Primary-key columns; conflicts on these update every other column.
    const CONFLICT_KEY: &'static [&'static str];
    /// Every destination column, key columns included.
    const COLUMNS: &'static [Column<Self>];

    /// Whether the record has a complete primary key.
    fn is_keyed(&self) -> bool;

    /// Encode all columns in `COLUMNS` order.
    fn encode_row(
        &self,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = Result<libsql::Value, DatabaseError>> + '_ {
        Self::COLUMNS
            .iter()
            .map(move |column| (column.read)(self).encode(now))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_610_000_000_000).unwrap()
    }

    #[test]
    fn text_decodes_entities_and_defaults_to_empty() {
        assert_eq!(
            Field::text("Fundamentals &amp; Design").encode(now()).unwrap(),
            libsql::Value::Text("Fundamentals & Design".into())
        );
        assert_eq!(
            Field::text("Don&#39;t panic").encode(now()).unwrap(),
            libsql::Value::Text("Don't panic".into())
        );
        assert_eq!(
            Field::opt_text(None).encode(now()).unwrap(),
            libsql::Value::Text(String::new())
        );
    }

    #[test]
    fn key_is_stored_verbatim() {
        assert_eq!(
            Field::key(Some("neu.edu/1/A&amp;B/1".into())).encode(now()).unwrap(),
            libsql::Value::Text("neu.edu/1/A&amp;B/1".into())
        );
    }

    #[test]
    fn array_decodes_each_element() {
        let items = vec!["R&amp;D".to_string(), "Writing".to_string()];
        assert_eq!(
            Field::array(&items).encode(now()).unwrap(),
            libsql::Value::Text(r#"["R&D","Writing"]"#.into())
        );
        assert_eq!(
            Field::TextArray(Vec::new()).encode(now()).unwrap(),
            libsql::Value::Text("[]".into())
        );
    }

    #[test]
    fn integer_keeps_zero_and_nulls_absence() {
        assert_eq!(Field::Integer(Some(0)).encode(now()).unwrap(), libsql::Value::Integer(0));
        assert_eq!(Field::Integer(None).encode(now()).unwrap(), libsql::Value::Null);
    }

    #[test]
    fn timestamp_defaults_to_now() {
        assert_eq!(
            Field::Timestamp(None).encode(now()).unwrap(),
            libsql::Value::Text("2021-01-07T06:13:20.000Z".into())
        );
        assert_eq!(
            Field::Timestamp(Some(0)).encode(now()).unwrap(),
            libsql::Value::Text("1970-01-01T00:00:00.000Z".into())
        );
    }

    #[test]
    fn boolean_and_json_encodings() {
        assert_eq!(Field::Boolean(true).encode(now()).unwrap(), libsql::Value::Integer(1));
        assert_eq!(Field::Boolean(false).encode(now()).unwrap(), libsql::Value::Integer(0));
        assert_eq!(
            Field::json::<serde_json::Value>(None).encode(now()).unwrap(),
            libsql::Value::Text("{}".into())
        );
        let node = serde_json::json!({"type": "and", "values": []});
        assert_eq!(
            Field::json(Some(&node)).encode(now()).unwrap(),
            libsql::Value::Text(r#"{"type":"and","values":[]}"#.into())
        );
        assert_eq!(
            Field::json(Some(&serde_json::Value::Null)).encode(now()).unwrap(),
            libsql::Value::Text("{}".into())
        );
    }

    #[test]
    fn json_keeps_object_key_order() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"zeta":1,"alpha":{"y":2,"b":3}}"#).unwrap();
        assert_eq!(
            Field::json(Some(&value)).encode(now()).unwrap(),
            libsql::Value::Text(r#"{"zeta":1,"alpha":{"y":2,"b":3}}"#.into())
        );
    }

    #[test]
    fn unserializable_json_fails_to_encode() {
        let bad = BTreeMap::from([(vec![1_u8], 1_u8)]);
        let field = Field::json(Some(&bad));
        assert!(matches!(field, Field::Unencodable(_)));
        assert!(matches!(field.encode(now()), Err(DatabaseError::InvalidState(_))));
    }
}
