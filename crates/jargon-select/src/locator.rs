//! Candidate locator: the initial node set for a selector, found from its
//! rightmost step with the cheapest lookup that fits the step.

use jargon_dom::{DomTree, NodeId};
use strum_macros::Display;

use crate::step::{Qualifier, Step};

/// Which lookup produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// One element by id.
    Id,
    /// Tag or class base set filtered on an attribute.
    Attribute,
    /// Tag or all-element base set filtered on a class token.
    Class,
    /// Tag name lookup.
    Tag,
}

impl Strategy {
    /// The strategy used for `step`.
    #[must_use]
    pub const fn of(step: &Step) -> Self {
        match step {
            Step::Id(_) => Self::Id,
            Step::Attribute { .. } => Self::Attribute,
            Step::Class { .. } => Self::Class,
            Step::Tag(_) => Self::Tag,
        }
    }
}

/// Candidates for `step` among the descendants of `scope`, in tree order.
///
/// An id step yields at most one node even when ids repeat in the tree.
#[must_use]
pub fn locate(tree: &DomTree, scope: NodeId, step: &Step) -> Vec<NodeId> {
    let candidates = match step {
        Step::Id(id) => tree.element_by_id(scope, id).into_iter().collect(),
        Step::Attribute {
            qualifier,
            name,
            value,
        } => attribute_search(tree, scope, qualifier.as_ref(), name, value.as_deref()),
        Step::Class { tag, class } => class_search(tree, scope, tag.as_deref(), class),
        Step::Tag(tag) => tree.elements_by_tag_name(scope, tag),
    };

    #[cfg(feature = "match-trace")]
    eprintln!(
        "[jargon trace] locate {step} via {} -> {} candidate(s)",
        Strategy::of(step),
        candidates.len()
    );

    candidates
}

/// Elements carrying `class`, optionally only those named `tag`.
#[must_use]
pub fn class_search(tree: &DomTree, scope: NodeId, tag: Option<&str>, class: &str) -> Vec<NodeId> {
    let base = match tag {
        Some(tag) => tree.elements_by_tag_name(scope, tag),
        None => tree.descendant_elements(scope).collect(),
    };
    base.into_iter()
        .filter(|&node| tree.as_element(node).is_some_and(|e| e.has_class(class)))
        .collect()
}

/// Elements that have attribute `name` (equal to `value` when given), drawn
/// from the qualifier's base set or from every descendant element.
#[must_use]
pub fn attribute_search(
    tree: &DomTree,
    scope: NodeId,
    qualifier: Option<&Qualifier>,
    name: &str,
    value: Option<&str>,
) -> Vec<NodeId> {
    let base = match qualifier {
        Some(Qualifier::Tag(tag)) => tree.elements_by_tag_name(scope, tag),
        Some(Qualifier::Class(class)) => class_search(tree, scope, None, class),
        None => tree.descendant_elements(scope).collect(),
    };
    base.into_iter()
        .filter(|&node| match (tree.attribute(node, name), value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
        .collect()
}
