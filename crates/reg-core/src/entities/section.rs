use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keys;

/// Start and end of one meeting slot, in seconds from midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimeRange {
    pub start: u32,
    pub end: u32,
}

/// A recurring meeting of a section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Days since the Unix epoch.
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    #[serde(rename = "where", alias = "room")]
    pub room: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Day of week (`"0"` = Sunday) to the slots held that day.
    #[serde(default)]
    pub times: BTreeMap<String, Vec<TimeRange>>,
}

/// One section (CRN) of a course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub term_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_id: String,
    #[serde(default)]
    pub crn: String,
    pub seats_capacity: Option<i64>,
    pub seats_remaining: Option<i64>,
    pub wait_capacity: Option<i64>,
    pub wait_remaining: Option<i64>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
    #[serde(default, alias = "professors")]
    pub profs: BTreeSet<String>,
    pub campus: Option<String>,
    #[serde(default)]
    pub honors: bool,
    #[serde(default)]
    pub online: bool,
    pub url: Option<String>,
    /// Epoch milliseconds of the scrape that observed this section.
    pub last_update_time: Option<i64>,
}

impl SectionRecord {
    /// Identity key `host/term/subject/classId/crn`.
    #[must_use]
    pub fn hash(&self) -> Option<String> {
        keys::section_hash(
            Some(&self.host),
            Some(&self.term_id),
            Some(&self.subject),
            Some(&self.class_id),
            Some(&self.crn),
        )
    }

    /// Identity key of the owning course.
    #[must_use]
    pub fn class_hash(&self) -> Option<String> {
        keys::class_hash(
            Some(&self.host),
            Some(&self.term_id),
            Some(&self.subject),
            Some(&self.class_id),
        )
    }
}
