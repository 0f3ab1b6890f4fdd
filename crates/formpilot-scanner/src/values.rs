//! Current-value extraction.

use formpilot_dom::{collapse_whitespace, Document, NodeId};

use crate::field::FieldKind;

/// Options of a native select or of an ARIA combobox/listbox.
///
/// ARIA widgets contribute their `[role=option]` descendants plus those of
/// the popup named by `aria-controls` or `aria-owns`.
pub fn choice_options(doc: &Document, node: NodeId) -> Vec<NodeId> {
    if doc.tag(node) == Some("select") {
        return doc.options(node);
    }
    let is_option = |n: &NodeId| doc.attr(*n, "role").is_some_and(|r| r.eq_ignore_ascii_case("option"));
    let mut options: Vec<NodeId> = doc.descendants(node).filter(is_option).collect();
    let scope = doc.scope_root(node);
    for attr in ["aria-controls", "aria-owns"] {
        let Some(ids) = doc.attr(node, attr) else {
            continue;
        };
        for popup in ids.split_whitespace().filter_map(|id| doc.get_element_by_id(scope, id)) {
            options.extend(doc.descendants(popup).filter(is_option));
        }
    }
    options.dedup();
    options
}

/// Display text of an option.
pub fn option_label(doc: &Document, option: NodeId) -> String {
    if doc.tag(option) == Some("option") {
        return doc.option_text(option);
    }
    collapse_whitespace(&doc.text_content(option))
}

/// Submitted value of an option: `value` (or `data-value` for ARIA
/// options), falling back to its text.
pub fn option_value(doc: &Document, option: NodeId) -> String {
    if doc.tag(option) == Some("option") {
        return doc.option_value(option);
    }
    doc.attr(option, "data-value")
        .or_else(|| doc.attr(option, "value"))
        .map(str::to_string)
        .unwrap_or_else(|| option_label(doc, option))
}

/// Effective selection of a choice list.
///
/// A single-choice list with nothing explicitly selected reports its first
/// option; a multiple list reports only explicit selections.
pub fn selected_options(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let options = choice_options(doc, node);
    if doc.tag(node) == Some("select") {
        if doc.attr(node, "multiple").is_some() {
            return options
                .into_iter()
                .filter(|o| doc.element(*o).is_some_and(|el| el.state.selected))
                .collect();
        }
        return doc
            .selected_index(node)
            .and_then(|i| options.get(i).copied())
            .into_iter()
            .collect();
    }
    let selected: Vec<NodeId> = options
        .iter()
        .copied()
        .filter(|o| doc.attr(*o, "aria-selected") == Some("true"))
        .collect();
    if selected.is_empty() && doc.attr(node, "aria-multiselectable") != Some("true") {
        return options.first().copied().into_iter().collect();
    }
    selected
}

/// Checked state of a native checkbox/radio or an ARIA widget.
pub fn is_checked(doc: &Document, node: NodeId) -> bool {
    let Some(el) = doc.element(node) else {
        return false;
    };
    if el.tag == "input" {
        return el.state.checked;
    }
    el.attr("aria-checked") == Some("true")
}

/// Radios sharing a group with `node`, including `node` itself.
///
/// Native radios group by `name` within the tree scope; ARIA radios group
/// under their nearest `radiogroup`.
pub fn radio_group(doc: &Document, node: NodeId) -> Vec<NodeId> {
    let Some(el) = doc.element(node) else {
        return Vec::new();
    };
    if el.tag == "input" {
        let Some(name) = el.attr("name").filter(|n| !n.is_empty()) else {
            return vec![node];
        };
        let scope = doc.scope_root(node);
        return doc
            .descendants(scope)
            .filter(|n| {
                doc.element(*n).is_some_and(|other| {
                    other.input_type().as_deref() == Some("radio") && other.attr("name") == Some(name)
                })
            })
            .collect();
    }
    let group = doc
        .ancestors(node)
        .find(|a| doc.attr(*a, "role").is_some_and(|r| r.eq_ignore_ascii_case("radiogroup")));
    match group {
        Some(group) => doc
            .descendants(group)
            .filter(|n| doc.attr(*n, "role").is_some_and(|r| r.eq_ignore_ascii_case("radio")))
            .collect(),
        None => vec![node],
    }
}

/// Current value of a field as a string. Absent values are `""`.
pub fn extract(doc: &Document, node: NodeId, kind: &FieldKind) -> String {
    let Some(el) = doc.element(node) else {
        return String::new();
    };
    match kind {
        FieldKind::Select | FieldKind::SelectMultiple => selected_options(doc, node)
            .first()
            .map(|o| {
                let text = option_label(doc, *o);
                if text.is_empty() { option_value(doc, *o) } else { text }
            })
            .unwrap_or_default(),
        FieldKind::TextArea => el.state.value.clone(),
        FieldKind::Checkbox | FieldKind::Radio => {
            let state = if is_checked(doc, node) { "checked" } else { "unchecked" };
            state.to_string()
        }
        FieldKind::File if el.state.files.is_empty() => "No file selected".to_string(),
        FieldKind::File => el.state.files.join(", "),
        FieldKind::UploadButton | FieldKind::AddButton | FieldKind::Button => {
            if el.tag == "input" {
                return el.attr("value").unwrap_or_default().trim().to_string();
            }
            doc.text_content(node).trim().to_string()
        }
        FieldKind::Editable if el.tag == "input" => el.state.value.clone(),
        FieldKind::Editable => doc.text_content(node).trim().to_string(),
        FieldKind::Text(_) => el.state.value.clone(),
        FieldKind::Other(_) => String::new(),
    }
}

/// Whether a field is still waiting for input.
pub fn needs_value(doc: &Document, node: NodeId, kind: &FieldKind) -> bool {
    match kind {
        FieldKind::Text(_) | FieldKind::TextArea | FieldKind::Editable => {
            extract(doc, node, kind).trim().is_empty()
        }
        FieldKind::Checkbox => !is_checked(doc, node),
        FieldKind::Radio => !radio_group(doc, node).iter().any(|r| is_checked(doc, *r)),
        FieldKind::Select | FieldKind::SelectMultiple => selected_options(doc, node)
            .first()
            .is_none_or(|o| option_value(doc, *o).trim().is_empty()),
        FieldKind::File
        | FieldKind::UploadButton
        | FieldKind::AddButton
        | FieldKind::Button
        | FieldKind::Other(_) => false,
    }
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod tests;
