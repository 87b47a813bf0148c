use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ClassRecord, SectionRecord, SubjectRecord, TermInfo};
use crate::errors::CoreError;

/// Everything one scrape observed: courses, sections, subjects, and terms.
///
/// `classes` and `sections` are keyed by whatever key the scraper used; the
/// reconciler re-derives identity keys from each record's coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TermDump {
    #[serde(default)]
    pub classes: BTreeMap<String, ClassRecord>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionRecord>,
    /// Abbreviation to long name.
    #[serde(default)]
    pub subjects: BTreeMap<String, String>,
    #[serde(default)]
    pub term_infos: Vec<TermInfo>,
}

impl TermDump {
    /// Decode a dump from scraper JSON.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the JSON does not match the dump shape.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and decode a dump file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read, or
    /// `CoreError::Decode` if its contents are not a dump.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Subjects as records, ordered by abbreviation.
    #[must_use]
    pub fn subject_records(&self) -> Vec<SubjectRecord> {
        self.subjects
            .iter()
            .map(|(abbreviation, description)| SubjectRecord {
                abbreviation: abbreviation.clone(),
                description: description.clone(),
            })
            .collect()
    }

    /// Distinct term IDs among the dump's courses.
    #[must_use]
    pub fn term_ids(&self) -> BTreeSet<&str> {
        self.classes
            .values()
            .map(|c| c.term_id.as_str())
            .filter(|t| !t.is_empty())
            .collect()
    }
}
