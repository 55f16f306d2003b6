//! Ancestor walker: verifies the steps left of the subject by climbing
//! parent links from each candidate.

use jargon_dom::{DomTree, NodeId};

use crate::tokenizer::{Combinator, Selector};

/// Keep the candidates whose ancestor chain satisfies `selector`, in their
/// original order. Each candidate is walked on its own.
#[must_use]
pub fn retain_matching(tree: &DomTree, candidates: Vec<NodeId>, selector: &Selector) -> Vec<NodeId> {
    if selector.is_simple() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|&candidate| ancestors_match(tree, candidate, selector))
        .collect()
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// Whether the ancestors of `candidate` satisfy every step left of the
/// subject. The subject itself is not checked here.
///
/// Steps are consumed nearest first while climbing one parent at a time:
/// - after a [`Combinator::Descendant`], ancestors that miss are skipped
///   and the same step stays pending;
/// - after a [`Combinator::Child`], the next ancestor is the only one
///   tried. A miss fails the candidate; higher ancestors are not tried.
///
/// Reaching the Document before every step matched fails the candidate.
#[must_use]
pub fn ancestors_match(tree: &DomTree, candidate: NodeId, selector: &Selector) -> bool {
    let mut chain = selector.combinators().iter();
    let Some(mut pending) = chain.next() else {
        return true;
    };

    for ancestor in tree.ancestors(candidate) {
        if tree.as_element(ancestor).is_none() {
            break;
        }
        let (combinator, step) = pending;
        if step.matches(tree, ancestor) {
            match chain.next() {
                Some(next) => pending = next,
                None => return true,
            }
        } else if *combinator == Combinator::Child {
            #[cfg(feature = "match-trace")]
            eprintln!("[jargon trace] {candidate:?}: parent {ancestor:?} is not '{step}'");
            return false;
        }
    }

    #[cfg(feature = "match-trace")]
    eprintln!("[jargon trace] {candidate:?}: reached the root with '{}' pending", pending.1);
    false
}
