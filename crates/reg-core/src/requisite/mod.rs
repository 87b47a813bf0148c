//! Prerequisite and corequisite expression trees.
//!
//! Scraped requirements arrive as JSON in one of three shapes: a free-text
//! string, a course reference `{subject, classId}`, or a boolean node
//! `{type: "and" | "or", values: [...]}`. Anything else is kept verbatim as
//! [`Requisite::Malformed`] so it survives a round trip and can be reported.

pub mod missing;
pub mod normalize;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use missing::{ClassIndex, mark_missing, prepare_requisites};
pub use normalize::normalize;

/// Boolean operator of a [`BooleanNode`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    #[default]
    And,
    Or,
}

impl BoolOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for BoolOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to another course by subject and catalog number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourseRef {
    pub subject: String,
    #[serde(rename = "classId")]
    pub class_id: String,
    /// Set when the referenced course is not part of the current snapshot.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub missing: bool,
}

/// AND/OR node over an ordered list of requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BooleanNode {
    #[serde(rename = "type")]
    pub op: BoolOp,
    pub values: Vec<Requisite>,
}

impl BooleanNode {
    #[must_use]
    pub const fn new(op: BoolOp, values: Vec<Requisite>) -> Self {
        Self { op, values }
    }
}

/// A requirement expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Requisite {
    Raw(String),
    Node(BooleanNode),
    Course(CourseRef),
    Malformed(serde_json::Value),
}

impl Requisite {
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    #[must_use]
    pub fn course(subject: impl Into<String>, class_id: impl Into<String>) -> Self {
        Self::Course(CourseRef {
            subject: subject.into(),
            class_id: class_id.into(),
            missing: false,
        })
    }

    #[must_use]
    pub const fn and(values: Vec<Self>) -> Self {
        Self::Node(BooleanNode::new(BoolOp::And, values))
    }

    #[must_use]
    pub const fn or(values: Vec<Self>) -> Self {
        Self::Node(BooleanNode::new(BoolOp::Or, values))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Node(_))
    }
}

impl From<BooleanNode> for Requisite {
    fn from(node: BooleanNode) -> Self {
        Self::Node(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_all_shapes() {
        let json = serde_json::json!({
            "type": "or",
            "values": [
                "Graduate Admission REQ",
                {"subject": "CS", "classId": "2500"},
                {"type": "and", "values": [{"subject": "MATH", "classId": "1341", "missing": true}]},
                {"bogus": 1}
            ]
        });
        let req: Requisite = serde_json::from_value(json).unwrap();
        assert_eq!(
            req,
            Requisite::or(vec![
                Requisite::raw("Graduate Admission REQ"),
                Requisite::course("CS", "2500"),
                Requisite::and(vec![Requisite::Course(CourseRef {
                    subject: "MATH".into(),
                    class_id: "1341".into(),
                    missing: true,
                })]),
                Requisite::Malformed(serde_json::json!({"bogus": 1})),
            ])
        );
    }

    #[test]
    fn unknown_operator_is_malformed() {
        let req: Requisite =
            serde_json::from_value(serde_json::json!({"type": "xor", "values": []})).unwrap();
        assert!(matches!(req, Requisite::Malformed(_)));
    }

    #[test]
    fn missing_flag_omitted_when_false() {
        let json = serde_json::to_value(Requisite::course("CS", "2500")).unwrap();
        assert_eq!(json, serde_json::json!({"subject": "CS", "classId": "2500"}));
    }
}
