//! Finding the control that advances a multi-step flow.

use formpilot_dom::{collapse_whitespace, Document, NodeId};
use formpilot_protocols::AppSettings;
use formpilot_scanner::assembler::is_visible;
use formpilot_scanner::traversal::clickable_controls;

const PROCEED_KEYWORDS: &[&str] = &["next", "continue", "proceed", "save and continue", "review"];

const RETREAT_KEYWORDS: &[&str] = &["back", "previous", "cancel", "prev"];

const SUBMIT_KEYWORDS: &[&str] = &["submit", "apply"];

/// Decides whether a clickable advances the flow.
pub trait ProceedClassifier: Send + Sync {
    fn is_proceed(&self, doc: &Document, node: NodeId) -> bool;
}

/// Keyword-based classifier over text, `value` and `aria-label`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordProceedClassifier {
    allow_submit: bool,
}

impl KeywordProceedClassifier {
    pub fn new(allow_submit: bool) -> Self {
        Self { allow_submit }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.auto_submit)
    }
}

fn caption(doc: &Document, node: NodeId) -> String {
    let mut parts = vec![doc.text_content(node)];
    for attr in ["value", "aria-label"] {
        if let Some(v) = doc.attr(node, attr) {
            parts.push(v.to_string());
        }
    }
    collapse_whitespace(&parts.join(" ")).to_lowercase()
}

/// Whole-word match, so that "preview" is not "review".
fn has_word(caption: &str, keyword: &str) -> bool {
    caption.match_indices(keyword).any(|(start, _)| {
        let end = start + keyword.len();
        let before = caption[..start].chars().next_back();
        let after = caption[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

impl ProceedClassifier for KeywordProceedClassifier {
    fn is_proceed(&self, doc: &Document, node: NodeId) -> bool {
        let caption = caption(doc, node);
        if RETREAT_KEYWORDS.iter().any(|k| has_word(&caption, k)) {
            return false;
        }
        if PROCEED_KEYWORDS.iter().any(|k| has_word(&caption, k)) {
            return true;
        }
        self.allow_submit && SUBMIT_KEYWORDS.iter().any(|k| has_word(&caption, k))
    }
}

/// First visible, enabled clickable the classifier accepts.
pub fn find_proceed_control(doc: &Document, classifier: &dyn ProceedClassifier) -> Option<NodeId> {
    clickable_controls(doc, doc.root())
        .into_iter()
        .filter(|n| is_visible(doc, *n) && !doc.is_disabled(*n))
        .find(|n| classifier.is_proceed(doc, *n))
}

#[cfg(test)]
#[path = "navigation_tests.rs"]
mod tests;
