//! Canonical form for requirement trees.
//!
//! Normalization flattens nested nodes of the same operator, collapses
//! one-child nodes into their child, and drops empty nodes. Child order is
//! kept and duplicates are not removed. The result is a fixed point:
//! normalizing a normalized tree returns it unchanged.

use super::{BoolOp, BooleanNode, Requisite};

/// Normalize a requirement tree.
///
/// The root is always a [`BooleanNode`]: a bare leaf comes back wrapped in a
/// one-element AND node. An empty node at the root is returned as-is and means
/// "no requirement".
#[must_use]
pub fn normalize(tree: Requisite) -> BooleanNode {
    match simplify(tree) {
        Requisite::Node(node) => node,
        leaf => BooleanNode::new(BoolOp::And, vec![leaf]),
    }
}

/// Post-order simplification. Never returns a node with exactly one child.
fn simplify(tree: Requisite) -> Requisite {
    let Requisite::Node(BooleanNode { op, values }) = tree else {
        return tree;
    };

    let mut out = Vec::with_capacity(values.len());
    for child in values {
        match simplify(child) {
            Requisite::Node(inner) if inner.values.is_empty() => {}
            Requisite::Node(inner) if inner.op == op => out.extend(inner.values),
            Requisite::Node(mut inner) if inner.values.len() == 1 => {
                out.extend(inner.values.pop());
            }
            other => out.push(other),
        }
    }

    match out.len() {
        1 => out.swap_remove(0),
        _ => Requisite::Node(BooleanNode::new(op, out)),
    }
}
