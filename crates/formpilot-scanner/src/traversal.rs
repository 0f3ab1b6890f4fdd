//! Traversal across the document and every reachable isolated subtree.

use std::collections::HashSet;

use formpilot_dom::{Document, NodeId};
use tracing::warn;

use crate::classifier::{is_clickable_element, is_form_control, needs_attention};

/// Scope roots reachable from `root`, depth-first in discovery order,
/// starting with `root` itself. Subtrees that refuse access are skipped.
pub fn scopes(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();
    let mut worklist = vec![root];
    while let Some(scope) = worklist.pop() {
        if !seen.insert(scope) {
            continue;
        }
        ordered.push(scope);
        let mut nested = Vec::new();
        for node in doc.descendants(scope) {
            match doc.subtree_root(node) {
                Ok(Some(subtree)) => nested.push(subtree),
                Ok(None) => {}
                Err(e) => warn!(host = ?node, error = %e, "Skipping inaccessible subtree"),
            }
        }
        worklist.extend(nested.into_iter().rev());
    }
    ordered
}

/// Form controls and attention-worthy clickables under `root`.
///
/// Per scope: controls in tree order, then upload/add triggers, then the
/// nested scopes. No node appears twice.
pub fn interactive_nodes(doc: &Document, root: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    for scope in scopes(doc, root) {
        let controls = doc
            .descendants(scope)
            .filter(|n| doc.element(*n).is_some_and(is_form_control));
        for node in controls {
            if seen.insert(node) {
                found.push(node);
            }
        }
        let clickables = doc.descendants(scope).filter(|n| {
            doc.element(*n).is_some_and(is_clickable_element) && needs_attention(doc, *n)
        });
        for node in clickables {
            if seen.insert(node) {
                found.push(node);
            }
        }
    }
    found
}

/// Every clickable control under `root`: `button`, `[role=button]`, and
/// `input[type=submit|button]`.
pub fn clickable_controls(doc: &Document, root: NodeId) -> Vec<NodeId> {
    scopes(doc, root)
        .into_iter()
        .flat_map(|scope| doc.descendants(scope).collect::<Vec<_>>())
        .filter(|n| {
            doc.element(*n).is_some_and(|el| {
                el.tag == "button"
                    || el.role().as_deref() == Some("button")
                    || matches!(el.input_type().as_deref(), Some("submit" | "button"))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;
