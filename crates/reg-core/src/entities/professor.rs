use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Employee directory entry for an instructor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorRecord {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub primary_role: Option<String>,
    pub primary_department: Option<String>,
    pub office_room: Option<String>,
    pub url: Option<String>,
    pub personal_site: Option<String>,
    pub google_scholar_id: Option<String>,
    pub big_picture_url: Option<String>,
    /// Profile picture descriptor, stored as-is.
    pub pic: Option<serde_json::Value>,
}

/// Rosters arrive either as a list or keyed by professor ID.
#[derive(Deserialize)]
#[serde(untagged)]
enum Roster {
    List(Vec<ProfessorRecord>),
    Keyed(BTreeMap<String, ProfessorRecord>),
}

impl ProfessorRecord {
    /// Decode a professor roster.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the JSON is neither a list nor a map of
    /// professor records.
    pub fn roster_from_json(json: &str) -> Result<Vec<Self>, CoreError> {
        Ok(match serde_json::from_str::<Roster>(json)? {
            Roster::List(list) => list,
            Roster::Keyed(map) => map.into_values().collect(),
        })
    }

    /// Read and decode a roster file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the file cannot be read or decoded.
    pub fn roster_from_path(path: &Path) -> Result<Vec<Self>, CoreError> {
        Self::roster_from_json(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_accepts_list_and_map() {
        let list = r#"[{"id": "p1", "name": "Jane Doe", "email": "j.doe@example.edu"}]"#;
        let keyed = r#"{"p1": {"id": "p1", "name": "Jane Doe", "email": "j.doe@example.edu"}}"#;

        let from_list = ProfessorRecord::roster_from_json(list).unwrap();
        let from_map = ProfessorRecord::roster_from_json(keyed).unwrap();
        assert_eq!(from_list, from_map);
        assert_eq!(from_list[0].email.as_deref(), Some("j.doe@example.edu"));
        assert!(from_list[0].pic.is_none());
    }

    #[test]
    fn roster_rejects_scalars() {
        assert!(ProfessorRecord::roster_from_json("42").is_err());
    }
}
