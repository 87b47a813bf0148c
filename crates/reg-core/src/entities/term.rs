use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Subject abbreviation and its long name, e.g. `CS` / `Computer Science`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SubjectRecord {
    pub abbreviation: String,
    pub description: String,
}

/// A term offered by one sub-college, e.g. `202130` / `NEU` / `Spring 2021`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TermInfo {
    pub term_id: String,
    pub sub_college: String,
    pub text: String,
}
