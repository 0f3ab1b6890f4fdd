//! Writing values into fields and clicking controls.
//!
//! Both entry points report success as a `bool`. Failures are logged at
//! debug level and never propagate.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use formpilot_config::AgentConfig;
use formpilot_dom::{Document, DomError, EventKind, NodeId, NodeRef, Page};
use formpilot_scanner::FieldKind;
use formpilot_scanner::classifier::classify;
use formpilot_scanner::values::{choice_options, is_checked, option_label, option_value, radio_group};

/// Why a fill or click did not happen.
#[derive(Debug, Error)]
pub enum InjectError {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error("Node {0:?} is read-only")]
    ReadOnly(NodeId),

    #[error("No option matches '{0}'")]
    NoMatchingOption(String),

    #[error("Radio value '{radio}' does not match '{value}'")]
    NoMatchingValue { radio: String, value: String },

    #[error("Cannot fill a {0} field")]
    Unsupported(String),
}

/// Writes resolved values into the page.
#[derive(Debug, Clone)]
pub struct Injector {
    click_settle: Duration,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new(&AgentConfig::default())
    }
}

impl Injector {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            click_settle: config.click_settle(),
        }
    }

    pub fn with_click_settle(mut self, click_settle: Duration) -> Self {
        self.click_settle = click_settle;
        self
    }

    /// Write `value` into the field behind `node`.
    pub fn fill(&self, page: &Page, node: &NodeRef, value: &str) -> bool {
        match page.write(|doc| fill_document(doc, node, value)) {
            Ok(()) => {
                debug!(node = ?node.node, value, "Filled field");
                true
            }
            Err(e) => {
                debug!(node = ?node.node, error = %e, "Fill failed");
                false
            }
        }
    }

    /// Scroll `node` into view, let the page settle, then click it.
    ///
    /// The page lock is released while waiting; a navigation in the
    /// meantime makes the click fail.
    pub async fn click(&self, page: &Page, node: &NodeRef) -> bool {
        match self.try_click(page, node).await {
            Ok(()) => {
                debug!(node = ?node.node, "Clicked control");
                true
            }
            Err(e) => {
                debug!(node = ?node.node, error = %e, "Click failed");
                false
            }
        }
    }

    async fn try_click(&self, page: &Page, node: &NodeRef) -> Result<(), InjectError> {
        page.write(|doc| {
            let id = doc.resolve(node)?;
            if doc.is_disabled(id) {
                return Err(DomError::Disabled(id));
            }
            doc.scroll_into_view(id)
        })?;
        tokio::time::sleep(self.click_settle).await;
        page.activate(node)?;
        Ok(())
    }
}

/// Fill a field of a document directly.
pub fn fill_document(doc: &mut Document, node: &NodeRef, value: &str) -> Result<(), InjectError> {
    let id = doc.resolve(node)?;
    if doc.is_disabled(id) {
        return Err(DomError::Disabled(id).into());
    }
    let kind = classify(doc, id);
    match &kind {
        FieldKind::Text(_) | FieldKind::TextArea => {
            if doc.is_readonly(id) {
                return Err(InjectError::ReadOnly(id));
            }
            doc.focus(id)?;
            doc.set_value_native(id, value)?;
            dispatch_all(doc, id, &[EventKind::Input, EventKind::Change, EventKind::Blur])
        }
        FieldKind::Editable => {
            if doc.is_readonly(id) {
                return Err(InjectError::ReadOnly(id));
            }
            doc.focus(id)?;
            doc.set_text(id, value)?;
            dispatch_all(doc, id, &[EventKind::Input, EventKind::Blur])
        }
        FieldKind::Select | FieldKind::SelectMultiple => fill_choice(doc, id, value),
        FieldKind::Checkbox => fill_checkbox(doc, id, value),
        FieldKind::Radio => fill_radio(doc, id, value),
        other => Err(InjectError::Unsupported(other.to_string())),
    }
}

fn dispatch_all(doc: &mut Document, id: NodeId, events: &[EventKind]) -> Result<(), InjectError> {
    for event in events {
        doc.dispatch(id, *event)?;
    }
    Ok(())
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Equal, or one contains the other. Empty strings never match.
fn loosely_matches(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a == b || a.contains(b) || b.contains(a))
}

fn fill_choice(doc: &mut Document, id: NodeId, value: &str) -> Result<(), InjectError> {
    let wanted = normalize(value);
    let options = choice_options(doc, id);
    let candidates: Vec<(String, String)> = options
        .iter()
        .map(|o| (normalize(&option_value(doc, *o)), normalize(&option_label(doc, *o))))
        .collect();
    let exact = candidates
        .iter()
        .position(|(v, t)| !wanted.is_empty() && (*v == wanted || *t == wanted));
    let index = exact
        .or_else(|| candidates.iter().position(|(_, t)| loosely_matches(t, &wanted)))
        .ok_or_else(|| InjectError::NoMatchingOption(value.to_string()))?;

    if doc.tag(id) == Some("select") {
        doc.select_index(id, index)?;
    } else {
        let single = doc.attr(id, "aria-multiselectable") != Some("true");
        for (i, option) in options.iter().enumerate() {
            if i == index {
                doc.set_attr(*option, "aria-selected", "true")?;
            } else if single {
                doc.set_attr(*option, "aria-selected", "false")?;
            }
        }
    }
    dispatch_all(doc, id, &[EventKind::Input, EventKind::Change])
}

fn is_affirmative(value: &str) -> bool {
    let lower = value.to_lowercase();
    ["yes", "true", "check"].iter().any(|w| lower.contains(w)) || value.trim() == "1"
}

fn set_checked_state(doc: &mut Document, id: NodeId, checked: bool) -> Result<(), InjectError> {
    if doc.tag(id) == Some("input") {
        doc.set_checked(id, checked)?;
    } else {
        doc.set_attr(id, "aria-checked", if checked { "true" } else { "false" })?;
    }
    Ok(())
}

fn fill_checkbox(doc: &mut Document, id: NodeId, value: &str) -> Result<(), InjectError> {
    let wanted = is_affirmative(value);
    if is_checked(doc, id) != wanted {
        set_checked_state(doc, id, wanted)?;
        dispatch_all(doc, id, &[EventKind::Change, EventKind::Click])?;
    }
    Ok(())
}

/// The value a radio submits: `value` for native radios (`on` when absent),
/// `data-value`, `value` or text for ARIA radios.
fn radio_value(doc: &Document, id: NodeId) -> String {
    if doc.tag(id) == Some("input") {
        return doc.attr(id, "value").unwrap_or("on").to_string();
    }
    doc.attr(id, "data-value")
        .or_else(|| doc.attr(id, "value"))
        .map(str::to_string)
        .unwrap_or_else(|| doc.text_content(id))
}

fn fill_radio(doc: &mut Document, id: NodeId, value: &str) -> Result<(), InjectError> {
    let radio = normalize(&radio_value(doc, id));
    let wanted = normalize(value);
    if !loosely_matches(&radio, &wanted) {
        return Err(InjectError::NoMatchingValue { radio, value: wanted });
    }
    if doc.tag(id) != Some("input") {
        for peer in radio_group(doc, id) {
            if peer != id {
                doc.set_attr(peer, "aria-checked", "false")?;
            }
        }
    }
    set_checked_state(doc, id, true)?;
    dispatch_all(doc, id, &[EventKind::Change, EventKind::Click])
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
