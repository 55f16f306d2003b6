//! A borrowed, ordered set of elements with batched tests and queries.

use std::borrow::Cow;
use std::iter::Copied;
use std::slice;

use jargon_common::warning::warn_once;
use jargon_dom::{DomTree, NodeId};

use crate::locator::Strategy;
use crate::tokenizer::Selector;
use crate::{WARNING_COMPONENT, warn_rejected};

/// Result of a batched boolean test over a [`Collection`].
///
/// A collection of exactly one element answers with a single boolean;
/// any other size answers with one boolean per element, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches {
    /// The collection held exactly one element.
    Single(bool),
    /// One entry per element (empty for an empty collection).
    Many(Vec<bool>),
}

impl Matches {
    fn from_results(results: Vec<bool>) -> Self {
        match results.len() {
            1 => Self::Single(results[0]),
            _ => Self::Many(results),
        }
    }

    /// `true` when every element passed. Vacuously `true` when empty.
    #[must_use]
    pub fn all(&self) -> bool {
        match self {
            Self::Single(b) => *b,
            Self::Many(v) => v.iter().all(|&b| b),
        }
    }

    /// `true` when at least one element passed.
    #[must_use]
    pub fn any(&self) -> bool {
        match self {
            Self::Single(b) => *b,
            Self::Many(v) => v.iter().any(|&b| b),
        }
    }

    /// One boolean per element, whichever variant this is.
    #[must_use]
    pub fn into_vec(self) -> Vec<bool> {
        match self {
            Self::Single(b) => vec![b],
            Self::Many(v) => v,
        }
    }
}

/// An ordered, 0-indexed sequence of elements of one tree.
///
/// Operations never change a collection; queries return new ones.
/// Duplicates are kept: a node reached from two source elements appears twice.
#[derive(Debug, Clone)]
pub struct Collection<'t> {
    tree: &'t DomTree,
    nodes: Vec<NodeId>,
}

impl<'t> Collection<'t> {
    /// Wrap `nodes`, dropping any that are not elements.
    #[must_use]
    pub fn new(tree: &'t DomTree, nodes: Vec<NodeId>) -> Self {
        let nodes = nodes
            .into_iter()
            .filter(|&node| tree.as_element(node).is_some())
            .collect();
        Self { tree, nodes }
    }

    /// Wrap a single element; empty when `node` is not an element.
    #[must_use]
    pub fn from_node(tree: &'t DomTree, node: NodeId) -> Self {
        Self::new(tree, vec![node])
    }

    /// A collection with no elements.
    #[must_use]
    pub const fn empty(tree: &'t DomTree) -> Self {
        Self {
            tree,
            nodes: Vec::new(),
        }
    }

    /// The tree the elements belong to.
    #[must_use]
    pub const fn tree(&self) -> &'t DomTree {
        self.tree
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// The first element.
    #[must_use]
    pub fn first(&self) -> Option<NodeId> {
        self.get(0)
    }

    /// The elements in order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Take the elements out.
    #[must_use]
    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    /// Iterate over the elements in order.
    pub fn iter(&self) -> Copied<slice::Iter<'_, NodeId>> {
        self.nodes.iter().copied()
    }

    /// Whether each element's tag name is `name`, ASCII case-insensitively.
    #[must_use]
    pub fn has_name(&self, name: &str) -> Matches {
        self.test_each(|node| {
            self.tree
                .as_element(node)
                .is_some_and(|e| e.has_tag_name(name))
        })
    }

    /// Whether each element carries the class token `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> Matches {
        self.test_each(|node| {
            self.tree
                .as_element(node)
                .is_some_and(|e| e.has_class(class_name))
        })
    }

    /// Whether each element matches `selector`: it satisfies the rightmost
    /// step and its ancestors satisfy the rest. A selector that does not
    /// parse answers `false` for every element.
    #[must_use]
    pub fn has_selector(&self, selector: &str) -> Matches {
        match Selector::parse(selector) {
            Ok(parsed) => self.test_each(|node| crate::matches(self.tree, node, &parsed)),
            Err(err) => {
                warn_rejected(selector, &err);
                self.test_each(|_| false)
            }
        }
    }

    /// Descendants of each element matching a class selector, concatenated
    /// in element order.
    ///
    /// Accepts `.foo`, `div.foo`, a bare class name `foo`, or any selector
    /// whose rightmost step is a class step.
    #[must_use]
    pub fn by_class(&self, selector: &str) -> Self {
        let trimmed = selector.trim();
        let selector = if is_bare_identifier(trimmed) {
            Cow::Owned(format!(".{trimmed}"))
        } else {
            Cow::Borrowed(trimmed)
        };
        self.descendants_by(&selector, Strategy::Class)
    }

    /// Descendants of each element matching an attribute selector, such as
    /// `a[href]` or `.foo[data-x="y"]`, concatenated in element order.
    #[must_use]
    pub fn by_attribute(&self, selector: &str) -> Self {
        self.descendants_by(selector, Strategy::Attribute)
    }

    /// Call `visitor` with a one-element collection for each element, in
    /// order. Returns `self` for chaining.
    pub fn each(&self, mut visitor: impl FnMut(Self)) -> &Self {
        for &node in &self.nodes {
            visitor(Self {
                tree: self.tree,
                nodes: vec![node],
            });
        }
        self
    }

    fn test_each(&self, test: impl Fn(NodeId) -> bool) -> Matches {
        Matches::from_results(self.nodes.iter().map(|&node| test(node)).collect())
    }

    fn descendants_by(&self, selector: &str, expected: Strategy) -> Self {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn_rejected(selector, &err);
                return Self::empty(self.tree);
            }
        };
        let found = Strategy::of(parsed.subject());
        if found != expected {
            warn_once(
                WARNING_COMPONENT,
                &format!("ignoring selector '{selector}': {expected} lookup required, found {found}"),
            );
            return Self::empty(self.tree);
        }

        let nodes = self
            .nodes
            .iter()
            .flat_map(|&node| crate::select(self.tree, node, &parsed))
            .collect();
        Self {
            tree: self.tree,
            nodes,
        }
    }
}

impl<'a> IntoIterator for &'a Collection<'_> {
    type Item = NodeId;
    type IntoIter = Copied<slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter().copied()
    }
}

fn is_bare_identifier(text: &str) -> bool {
    !text.is_empty()
        && !text.contains(['.', '#', '[', '>'])
        && !text.contains(char::is_whitespace)
}
