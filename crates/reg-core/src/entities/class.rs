use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::keys;
use crate::requisite::Requisite;

/// Courses that list this course as a requirement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ReverseRequisites {
    #[serde(default)]
    pub values: Vec<Requisite>,
}

/// A course offered in one term, as produced by the scraper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub term_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_credits: Option<i64>,
    pub max_credits: Option<i64>,
    pub prereqs: Option<Requisite>,
    pub coreqs: Option<Requisite>,
    pub prereqs_for: Option<ReverseRequisites>,
    pub opt_prereqs_for: Option<ReverseRequisites>,
    #[serde(default, alias = "attributes")]
    pub class_attributes: BTreeSet<String>,
    #[serde(default)]
    pub nupath: BTreeSet<String>,
    pub url: Option<String>,
    pub pretty_url: Option<String>,
    pub fee_amount: Option<i64>,
    pub fee_description: Option<String>,
    /// Epoch milliseconds of the scrape that observed this course.
    pub last_update_time: Option<i64>,
}

impl ClassRecord {
    /// Identity key `host/term/subject/classId`, or `None` if a coordinate is missing.
    #[must_use]
    pub fn hash(&self) -> Option<String> {
        keys::class_hash(
            Some(&self.host),
            Some(&self.term_id),
            Some(&self.subject),
            Some(&self.class_id),
        )
    }
}
