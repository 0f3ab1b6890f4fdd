//! Element classification.

use formpilot_dom::{Document, Element, NodeId};

use crate::field::FieldKind;

const UPLOAD_KEYWORDS: &[&str] = &[
    "upload",
    "browse",
    "choose file",
    "select file",
    "attach",
    "resume",
    "cv",
];

const ADD_KEYWORDS: &[&str] = &["add", "new", "create", "insert", "append"];

const ADD_FRAGMENTS: &[&str] = &["add", "plus", "insert", "new", "create"];

const TEXT_ROLES: &[&str] = &["textbox", "searchbox", "spinbutton"];

/// ARIA roles that make an element a form control.
pub const INTERACTIVE_ROLES: &[&str] = &[
    "textbox",
    "searchbox",
    "combobox",
    "listbox",
    "checkbox",
    "switch",
    "radio",
    "spinbutton",
];

/// Native control, interactive ARIA role, or content-editable.
pub fn is_form_control(el: &Element) -> bool {
    matches!(el.tag.as_str(), "input" | "select" | "textarea")
        || el
            .role()
            .is_some_and(|role| INTERACTIVE_ROLES.contains(&role.as_str()))
        || el.is_content_editable()
}

/// `button`, `[role=button]` (including `a[role=button]`) or an element
/// with an `onclick` handler.
pub fn is_clickable_element(el: &Element) -> bool {
    el.tag == "button" || el.role().as_deref() == Some("button") || el.has_attr("onclick")
}

/// Submit and reset controls are never filled.
pub fn is_submit_or_reset(el: &Element) -> bool {
    matches!(
        el.attr("type").map(|t| t.trim().to_ascii_lowercase()).as_deref(),
        Some("submit" | "reset")
    )
}

/// Lower-cased text, `aria-label`, `class` and `id` of an element.
fn signals(doc: &Document, node: NodeId) -> [String; 4] {
    let attr = |name: &str| {
        doc.attr(node, name)
            .map(str::to_lowercase)
            .unwrap_or_default()
    };
    [
        doc.text_content(node).to_lowercase(),
        attr("aria-label"),
        attr("class"),
        attr("id"),
    ]
}

/// Clickable that opens a file chooser.
pub fn is_upload_trigger(doc: &Document, node: NodeId) -> bool {
    let signals = signals(doc, node);
    let keyword = UPLOAD_KEYWORDS
        .iter()
        .any(|k| signals.iter().any(|s| s.contains(k)));
    if keyword {
        return true;
    }
    // Inside a label that wraps a file input.
    doc.closest(node, |el| el.tag == "label")
        .is_some_and(|label| {
            doc.descendants(label).any(|n| {
                doc.element(n)
                    .is_some_and(|el| el.input_type().as_deref() == Some("file"))
            })
        })
}

/// Clickable that adds a repeated entry (another job, another school).
pub fn is_add_trigger(doc: &Document, node: NodeId) -> bool {
    let [text, aria, class, id] = signals(doc, node);
    let keyword = ADD_KEYWORDS
        .iter()
        .any(|k| text.contains(k) || aria.contains(k) || class.contains(k) || id.contains(k));
    if keyword || text.trim() == "+" {
        return true;
    }
    if doc
        .attr(node, "data-icon")
        .is_some_and(|icon| icon.to_lowercase().contains("plus"))
    {
        return true;
    }
    ADD_FRAGMENTS
        .iter()
        .any(|f| class.contains(f) || id.contains(f))
}

/// Clickable worth reporting as a field: an upload or add trigger that is
/// not a submit/reset control.
pub fn needs_attention(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    is_clickable_element(el)
        && !is_submit_or_reset(el)
        && (is_upload_trigger(doc, node) || is_add_trigger(doc, node))
}

/// Semantic type of an element. Native control kinds take precedence over
/// ARIA roles.
pub fn classify(doc: &Document, node: NodeId) -> FieldKind {
    let Some(el) = doc.element(node) else {
        return FieldKind::Other(String::new());
    };
    match el.tag.as_str() {
        "input" => {
            let input_type = el.input_type().unwrap_or_else(|| "text".to_string());
            return match input_type.as_str() {
                "checkbox" => FieldKind::Checkbox,
                "radio" => FieldKind::Radio,
                "file" => FieldKind::File,
                "submit" | "reset" | "button" | "image" => FieldKind::Button,
                _ => FieldKind::Text(input_type),
            };
        }
        "select" if el.has_attr("multiple") => return FieldKind::SelectMultiple,
        "select" => return FieldKind::Select,
        "textarea" => return FieldKind::TextArea,
        _ => {}
    }
    if let Some(role) = el.role() {
        match role.as_str() {
            "checkbox" | "switch" => return FieldKind::Checkbox,
            "radio" => return FieldKind::Radio,
            "combobox" | "listbox" if el.attr("aria-multiselectable") == Some("true") => {
                return FieldKind::SelectMultiple;
            }
            "combobox" | "listbox" => return FieldKind::Select,
            r if TEXT_ROLES.contains(&r) => return FieldKind::Editable,
            _ => {}
        }
    }
    if is_clickable_element(el) {
        if is_upload_trigger(doc, node) {
            return FieldKind::UploadButton;
        }
        if is_add_trigger(doc, node) {
            return FieldKind::AddButton;
        }
        return FieldKind::Button;
    }
    if el.is_content_editable() {
        return FieldKind::Editable;
    }
    FieldKind::Other(el.tag.clone())
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
