//! Label resolution.
//!
//! Labels come from an ordered table of strategies. The first strategy that
//! yields a non-empty text shorter than the configured limit wins; the last
//! entry always yields a fallback.

use formpilot_config::ScannerConfig;
use formpilot_dom::{collapse_whitespace, Document, NodeId};

use crate::classifier::is_clickable_element;
use crate::field::FieldKind;
use crate::values::{choice_options, option_label, option_value};

/// First-option texts that are prompts rather than labels.
const PROMPT_PREFIXES: &[&str] = &["select", "choose", "pick", "please", "--"];

/// Container texts that say nothing about the field.
const BOILERPLATE: &[&str] = &["form", "field", "input", "select", "required", "optional"];

const LABEL_LIKE_TAGS: &[&str] = &["label", "span", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6"];

const STRIPPED_TAGS: &[&str] = &["input", "select", "textarea", "button"];

/// Inputs to a strategy.
pub struct LabelContext<'a> {
    pub doc: &'a Document,
    pub node: NodeId,
    pub kind: &'a FieldKind,
    pub config: &'a ScannerConfig,
}

impl LabelContext<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.doc.attr(self.node, name)
    }

    /// Collapsed text, kept only if it fits the label limit.
    fn accept(&self, text: &str) -> Option<String> {
        let text = collapse_whitespace(text);
        (!text.is_empty() && text.chars().count() < self.config.max_label_len).then_some(text)
    }

    /// Single-line rendered text, kept only if it fits the label limit.
    fn accept_line(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.contains('\n') {
            return None;
        }
        self.accept(text)
    }
}

/// One entry of the strategy table.
pub struct Strategy {
    pub name: &'static str,
    pub run: fn(&LabelContext<'_>) -> Option<String>,
}

/// Strategies in priority order.
pub const STRATEGIES: &[Strategy] = &[
    Strategy { name: "own-text", run: own_text },
    Strategy { name: "label-for", run: label_for },
    Strategy { name: "aria", run: aria },
    Strategy { name: "placeholder", run: placeholder },
    Strategy { name: "first-option", run: first_option },
    Strategy { name: "automation-id", run: automation_id },
    Strategy { name: "data-attribute", run: data_attribute },
    Strategy { name: "sibling", run: sibling },
    Strategy { name: "ancestor", run: ancestor },
    Strategy { name: "fallback", run: fallback },
];

/// Resolves human-readable labels for discovered fields.
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    config: ScannerConfig,
}

impl LabelResolver {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, doc: &Document, node: NodeId, kind: &FieldKind) -> String {
        self.resolve_with_source(doc, node, kind).0
    }

    /// Label together with the name of the strategy that produced it.
    pub fn resolve_with_source(
        &self,
        doc: &Document,
        node: NodeId,
        kind: &FieldKind,
    ) -> (String, &'static str) {
        let ctx = LabelContext {
            doc,
            node,
            kind,
            config: &self.config,
        };
        STRATEGIES
            .iter()
            .find_map(|s| (s.run)(&ctx).map(|label| (label, s.name)))
            .unwrap_or_else(|| ("Unknown".to_string(), "fallback"))
    }
}

fn own_text(ctx: &LabelContext<'_>) -> Option<String> {
    if !ctx.doc.element(ctx.node).is_some_and(is_clickable_element) {
        return None;
    }
    // Long captions are rejected before they are shortened.
    let text = ctx.accept(&ctx.doc.text_content(ctx.node))?;
    Some(text.chars().take(ctx.config.button_label_len).collect())
}

fn label_for(ctx: &LabelContext<'_>) -> Option<String> {
    let id = ctx.attr("id").filter(|id| !id.is_empty())?;
    let find = |scope: NodeId| {
        ctx.doc.descendants(scope).find(|n| {
            ctx.doc.tag(*n) == Some("label") && ctx.doc.attr(*n, "for") == Some(id)
        })
    };
    let scope = ctx.doc.scope_root(ctx.node);
    let label = find(scope).or_else(|| find(ctx.doc.root()))?;
    ctx.accept(&ctx.doc.text_content(label))
}

fn aria(ctx: &LabelContext<'_>) -> Option<String> {
    if let Some(label) = ctx.attr("aria-label").and_then(|l| ctx.accept(l)) {
        return Some(label);
    }
    let ids = ctx.attr("aria-labelledby")?;
    let scope = ctx.doc.scope_root(ctx.node);
    let text = ids
        .split_whitespace()
        .filter_map(|id| {
            ctx.doc
                .get_element_by_id(scope, id)
                .or_else(|| ctx.doc.get_element_by_id(ctx.doc.root(), id))
        })
        .map(|n| ctx.doc.text_content(n))
        .collect::<Vec<_>>()
        .join(" ");
    ctx.accept(&text)
}

fn placeholder(ctx: &LabelContext<'_>) -> Option<String> {
    let applies = ctx.kind.is_text_like()
        || matches!(ctx.kind, FieldKind::TextArea | FieldKind::Editable);
    if !applies {
        return None;
    }
    ctx.accept(ctx.attr("placeholder")?)
}

fn first_option(ctx: &LabelContext<'_>) -> Option<String> {
    if !ctx.kind.is_choice_list() {
        return None;
    }
    let first = *choice_options(ctx.doc, ctx.node).first()?;
    if !option_value(ctx.doc, first).is_empty() {
        return None;
    }
    let text = option_label(ctx.doc, first);
    let lower = text.to_lowercase();
    if PROMPT_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return None;
    }
    ctx.accept(&text)
}

fn automation_id(ctx: &LabelContext<'_>) -> Option<String> {
    ctx.accept(&humanize_identifier(ctx.attr("data-automation-id")?))
}

fn data_attribute(ctx: &LabelContext<'_>) -> Option<String> {
    ["data-label", "data-name", "data-field-name"]
        .iter()
        .filter_map(|name| ctx.attr(name))
        .find(|v| !v.trim().is_empty())
        .and_then(|v| ctx.accept(v))
}

fn sibling(ctx: &LabelContext<'_>) -> Option<String> {
    let doc = ctx.doc;
    std::iter::successors(doc.previous_element_sibling(ctx.node), |n| {
        doc.previous_element_sibling(*n)
    })
    .take(ctx.config.sibling_depth)
    .filter(|n| doc.tag(*n).is_some_and(|t| LABEL_LIKE_TAGS.contains(&t)))
    .find_map(|n| ctx.accept_line(&doc.inner_text(n)))
}

fn ancestor(ctx: &LabelContext<'_>) -> Option<String> {
    let doc = ctx.doc;
    for parent in doc.ancestors(ctx.node).take(ctx.config.ancestor_depth) {
        let labelled = doc.descendants(parent).find(|n| {
            *n != ctx.node
                && doc.element(*n).is_some_and(|el| {
                    el.tag == "label"
                        || el.attr("class").is_some_and(|c| c.to_lowercase().contains("label"))
                        || el.attr("id").is_some_and(|i| i.to_lowercase().contains("label"))
                })
        });
        if let Some(text) = labelled.and_then(|l| ctx.accept(&doc.text_content(l))) {
            return Some(text);
        }
        let rest = doc.inner_text_excluding(parent, |el| STRIPPED_TAGS.contains(&el.tag.as_str()));
        if let Some(text) = ctx.accept_line(&rest) {
            let lower = text.to_lowercase();
            if !BOILERPLATE.contains(&lower.as_str()) {
                return Some(text);
            }
        }
    }
    None
}

fn fallback(ctx: &LabelContext<'_>) -> Option<String> {
    if !ctx.kind.is_upload() {
        return Some("Unknown".to_string());
    }
    let name = ctx
        .attr("name")
        .map(|n| {
            n.split(['-', '_'])
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|n| !n.is_empty());
    Some(name.unwrap_or_else(|| "File Upload".to_string()))
}

/// Split an identifier on `_`, `-` and lower-to-upper case boundaries.
///
/// `legalNameSection_firstName` becomes `legal Name Section first Name`.
pub fn humanize_identifier(id: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in id.chars() {
        if c == '_' || c == '-' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.join(" ")
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
