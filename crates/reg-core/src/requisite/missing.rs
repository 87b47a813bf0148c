//! Resolution of course references against the current snapshot.
//!
//! A prerequisite may name a course that is not offered in the scraped term.
//! Such references are kept but flagged with `missing = true` so consumers can
//! render them differently. Marking is a pure transform: the input tree is not
//! touched and a previously set flag is never cleared.

use std::collections::HashMap;

use super::normalize::normalize;
use super::{BooleanNode, Requisite};
use crate::entities::ClassRecord;
use crate::keys;

/// Courses of one snapshot, keyed by identity hash.
#[derive(Debug, Default)]
pub struct ClassIndex<'a> {
    by_hash: HashMap<String, &'a ClassRecord>,
}

impl<'a> ClassIndex<'a> {
    /// Hash every course once. Courses without a complete identity are skipped.
    pub fn build(classes: impl IntoIterator<Item = &'a ClassRecord>) -> Self {
        let by_hash = classes
            .into_iter()
            .filter_map(|class| class.hash().map(|hash| (hash, class)))
            .collect();
        Self { by_hash }
    }

    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&'a ClassRecord> {
        self.by_hash.get(hash).copied()
    }

    #[must_use]
    pub fn contains(&self, hash: &str) -> bool {
        self.by_hash.contains_key(hash)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

/// Return a copy of `tree` with unresolved course references flagged.
///
/// References resolve within `host`/`term_id`. Malformed nodes are logged
/// together with the whole tree and left as they are.
#[must_use]
pub fn mark_missing(
    tree: &Requisite,
    host: &str,
    term_id: &str,
    index: &ClassIndex<'_>,
) -> Requisite {
    mark(tree, tree, host, term_id, index)
}

fn mark(
    node: &Requisite,
    root: &Requisite,
    host: &str,
    term_id: &str,
    index: &ClassIndex<'_>,
) -> Requisite {
    match node {
        Requisite::Course(course) => {
            let mut course = course.clone();
            let target = keys::class_hash(
                Some(host),
                Some(term_id),
                Some(&course.subject),
                Some(&course.class_id),
            );
            if !target.is_some_and(|hash| index.contains(&hash)) {
                course.missing = true;
            }
            Requisite::Course(course)
        }
        Requisite::Node(BooleanNode { op, values }) => Requisite::Node(BooleanNode::new(
            *op,
            values
                .iter()
                .map(|child| mark(child, root, host, term_id, index))
                .collect(),
        )),
        Requisite::Raw(_) => node.clone(),
        Requisite::Malformed(value) => {
            tracing::error!(
                node = %value,
                tree = %serde_json::to_string(root).unwrap_or_default(),
                "malformed requisite node left unmarked"
            );
            node.clone()
        }
    }
}

/// Normalize, mark, and normalize again.
///
/// The second pass guarantees the canonical shape is what gets persisted.
#[must_use]
pub fn resolve(tree: &Requisite, host: &str, term_id: &str, index: &ClassIndex<'_>) -> Requisite {
    let first = Requisite::Node(normalize(tree.clone()));
    let marked = mark_missing(&first, host, term_id, index);
    Requisite::Node(normalize(marked))
}

/// Copy of `class` with its prerequisites and corequisites resolved against
/// `index`. Absent trees stay absent.
#[must_use]
pub fn prepare_requisites(class: &ClassRecord, index: &ClassIndex<'_>) -> ClassRecord {
    let resolve_field = |field: &Option<Requisite>| {
        field
            .as_ref()
            .map(|tree| resolve(tree, &class.host, &class.term_id, index))
    };
    ClassRecord {
        prereqs: resolve_field(&class.prereqs),
        coreqs: resolve_field(&class.coreqs),
        ..class.clone()
    }
}
