//! Bottom-up CSS selector engine over a [`jargon_dom::DomTree`].
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Tokenizer** - splits `div > div.foo .bar a[href="x"]` into
//!   typed [`Step`]s joined by [`Combinator`]s
//! - **Candidate Locator** - picks the initial node set from the rightmost
//!   step by id, attribute, class, or tag lookup
//! - **Ancestor Walker** - climbs parent links from each candidate,
//!   consuming the remaining steps right to left
//! - **Collection** - a chainable wrapper over the matched elements
//!
//! # Grammar
//!
//! One step is `#id`, `tag`, `.class`, `tag.class`, `[attr]`, `[attr="v"]`,
//! `tag[attr...]`, or `.class[attr...]`. Steps are joined by whitespace
//! (descendant) or `>` (direct child).
//!
//! # Not Supported
//!
//! - Pseudo-classes and pseudo-elements
//! - Sibling combinators (`+`, `~`)
//! - Selector lists (`a, b`)
//! - More than one class or attribute filter per step
//!
//! # Example
//!
//! ```
//! use jargon_dom::DomTree;
//!
//! let mut tree = DomTree::new();
//! let root = tree.root();
//! let div = tree.append_element(root, "div", &[("class", "foo")]);
//! let p = tree.append_element(div, "p", &[("class", "bar")]);
//!
//! let found = jargon_select::query(&tree, "div.foo > p.bar");
//! assert_eq!(found.nodes(), &[p]);
//! ```

use jargon_common::warning::warn_once;
use jargon_dom::{DomTree, NodeId};

/// Chainable wrapper over matched elements.
pub mod collection;
/// Selector rejection reasons.
pub mod error;
/// Candidate lookup from the rightmost step.
pub mod locator;
/// Compound steps and the step matcher.
pub mod step;
/// Selector tokenizer and parsed selector type.
pub mod tokenizer;
/// Right-to-left ancestor verification.
pub mod walker;

pub use collection::{Collection, Matches};
pub use error::SelectorError;
pub use locator::Strategy;
pub use step::{Qualifier, Step};
pub use tokenizer::{Combinator, Selector};

/// Component name used for warnings emitted by this crate.
pub const WARNING_COMPONENT: &str = "Selector";

/// Query the whole document. A selector that does not parse matches
/// nothing.
#[must_use]
pub fn query<'t>(tree: &'t DomTree, selector: &str) -> Collection<'t> {
    query_within(tree, tree.root(), selector)
}

/// Query the descendants of `scope`.
///
/// Candidates come from inside `scope`, but their ancestors are verified
/// all the way up, so `query_within(tree, p, "div span")` finds spans under
/// `p` even when the matching `div` is above `p`.
#[must_use]
pub fn query_within<'t>(tree: &'t DomTree, scope: NodeId, selector: &str) -> Collection<'t> {
    match Selector::parse(selector) {
        Ok(parsed) => Collection::new(tree, select(tree, scope, &parsed)),
        Err(err) => {
            warn_rejected(selector, &err);
            Collection::empty(tree)
        }
    }
}

/// Run a parsed selector: locate candidates from the subject, then keep the
/// ones whose ancestors match.
#[must_use]
pub fn select(tree: &DomTree, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
    let candidates = locator::locate(tree, scope, selector.subject());
    walker::retain_matching(tree, candidates, selector)
}

/// Whether `node` would be returned by a document query for `selector`.
#[must_use]
pub fn matches(tree: &DomTree, node: NodeId, selector: &Selector) -> bool {
    selector.subject().matches(tree, node) && walker::ancestors_match(tree, node, selector)
}

/// The message `warn_once` receives for a rejected selector.
#[must_use]
pub fn rejection_message(selector: &str, err: &SelectorError) -> String {
    format!("ignoring selector '{selector}': {err}")
}

pub(crate) fn warn_rejected(selector: &str, err: &SelectorError) {
    warn_once(WARNING_COMPONENT, &rejection_message(selector, err));
}
