//! HTML loading.
//!
//! Parses markup with `scraper` and converts it into the arena. Declarative
//! shadow roots (`<template shadowrootmode>`) and `<iframe srcdoc>` become
//! isolated subtrees. Style and layout are approximated from inline styles
//! and per-tag default boxes.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use tracing::debug;

use crate::document::Document;
use crate::error::DomError;
use crate::node::{NodeId, ShadowMode, SubtreeKind};
use crate::style::{ComputedStyle, Display, InlineStyle, Visibility};
use crate::types::Rect;

/// Elements whose content never renders and never carries fields.
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "noscript"];

const MARGIN: f64 = 8.0;

/// Attribute that marks a `<template>` as a declarative shadow root.
const SHADOW_MODE_ATTR: &str = "data-shadowrootmode";

/// html5ever consumes `shadowrootmode` templates itself and flattens their
/// content into the host, so the attribute is renamed before parsing and the
/// template survives as an ordinary element.
static SHADOW_TEMPLATE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?i)(<template\b[^>]*?\s)shadowrootmode\b"));

fn parse(html: &str) -> Result<Html, DomError> {
    let re = SHADOW_TEMPLATE
        .as_ref()
        .map_err(|e| DomError::Parse(e.to_string()))?;
    let markup = re.replace_all(html, format!("${{1}}{}", SHADOW_MODE_ATTR));
    Ok(Html::parse_document(&markup))
}

impl Document {
    /// Parse an HTML document.
    pub fn from_html(html: &str) -> Result<Self, DomError> {
        let mut doc = Document::new();
        let parsed = parse(html)?;
        let root = doc.root();
        import_tree(&mut doc, &parsed, root)?;
        doc.init_form_state()?;
        doc.compute_layout()?;
        debug!(nodes = doc.len(), "Loaded HTML document");
        Ok(doc)
    }

    fn init_form_state(&mut self) -> Result<(), DomError> {
        for index in 0..self.len() {
            let id = NodeId::new(index);
            let Some(el) = self.element(id) else {
                continue;
            };
            match el.tag.as_str() {
                "input" => {
                    let value = el.attr("value").unwrap_or_default().to_string();
                    let checked = el.has_attr("checked");
                    self.set_value_native(id, &value)?;
                    if checked {
                        self.set_checked(id, true)?;
                    }
                }
                "textarea" => {
                    let value = self.text_content(id);
                    self.set_value_native(id, &value)?;
                }
                "option" if el.has_attr("selected") => {
                    if let Some(select) = self.closest(id, |e| e.tag == "select") {
                        let index = self.options(select).iter().position(|o| *o == id);
                        if let Some(index) = index {
                            self.select_index(select, index)?;
                        }
                    }
                }
                _ => {}
            }
        }
        // Selects without an explicit choice show their first option.
        for index in 0..self.len() {
            let id = NodeId::new(index);
            if self.tag(id) == Some("select") {
                if let Some(selected) = self.selected_index(id) {
                    let value = self.option_value(self.options(id)[selected]);
                    self.set_value_native(id, &value)?;
                }
            }
            if self.attr(id, "data-value-tracker").is_some() {
                self.track_value(id)?;
            }
        }
        Ok(())
    }

    /// Assign computed style and an approximate box to every element.
    ///
    /// Elements are stacked vertically in tree order. Everything below a
    /// `display:none` element gets an empty box.
    fn compute_layout(&mut self) -> Result<(), DomError> {
        let mut cursor = MARGIN;
        let mut stack = vec![(self.root(), false, Visibility::Visible)];
        while let Some((id, hidden, inherited)) = stack.pop() {
            let (hidden, visibility) = match self.element(id) {
                Some(_) => {
                    let (style, rect) = self.layout_element(id, hidden, inherited, cursor);
                    if rect.height > 0.0 && style.display != Display::Inline {
                        cursor += rect.height + MARGIN / 2.0;
                    }
                    self.set_style(id, style)?;
                    self.set_rect(id, rect)?;
                    (hidden || style.display == Display::None, style.visibility)
                }
                None => (hidden, inherited),
            };
            let mut next: Vec<NodeId> = Vec::new();
            if let Some(subtree) = self.element(id).and_then(|el| el.subtree) {
                next.push(subtree.root);
            }
            next.extend(self.children(id).iter().copied());
            stack.extend(next.into_iter().rev().map(|n| (n, hidden, visibility)));
        }
        Ok(())
    }

    fn layout_element(
        &self,
        id: NodeId,
        hidden: bool,
        inherited: Visibility,
        cursor: f64,
    ) -> (ComputedStyle, Rect) {
        let Some(el) = self.element(id) else {
            return (ComputedStyle::default(), Rect::default());
        };
        let inline = el.attr("style").map(InlineStyle::parse).unwrap_or_default();
        let mut display = inline.display.unwrap_or_else(|| Display::for_tag(&el.tag));
        if el.has_attr("hidden") || el.input_type().as_deref() == Some("hidden") {
            display = Display::None;
        }
        let style = ComputedStyle {
            display,
            visibility: inline.visibility.unwrap_or(inherited),
            opacity: inline.opacity.unwrap_or(1.0),
        };
        if hidden || display == Display::None {
            return (style, Rect::default());
        }
        let (width, height) = match (el.tag.as_str(), el.input_type().as_deref()) {
            (_, Some("checkbox" | "radio")) => (16.0, 16.0),
            (_, Some("file")) => (250.0, 32.0),
            (_, Some("submit" | "button" | "reset" | "image")) => (100.0, 32.0),
            ("input" | "select", _) => (240.0, 32.0),
            ("textarea", _) => (320.0, 80.0),
            ("button", _) => (100.0, 32.0),
            ("iframe", _) => (300.0, 150.0),
            ("img", _) => (32.0, 32.0),
            _ if display == Display::Inline => {
                let chars = self.text_content(id).trim().chars().count() as f64;
                ((chars * 7.0).max(8.0), 20.0)
            }
            _ if display == Display::InlineBlock => (120.0, 32.0),
            _ => (self.viewport().width as f64 - 2.0 * MARGIN, 24.0),
        };
        let rect = Rect::new(
            MARGIN,
            cursor,
            inline.width.unwrap_or(width),
            inline.height.unwrap_or(height),
        );
        (style, rect)
    }
}

/// Copy a parsed tree under `parent`.
fn import_tree(doc: &mut Document, html: &Html, parent: NodeId) -> Result<(), DomError> {
    let mut stack: Vec<_> = html.tree.root().children().map(|c| (c, parent)).collect();
    stack.reverse();
    while let Some((node, parent)) = stack.pop() {
        match node.value() {
            scraper::Node::Text(text) => {
                let text: &str = &text.text;
                if !text.is_empty() {
                    doc.append_text(parent, text)?;
                }
            }
            scraper::Node::Element(el) => {
                let tag = el.name().to_ascii_lowercase();
                if SKIPPED_TAGS.contains(&tag.as_str()) {
                    continue;
                }
                if tag == "template" {
                    // Only declarative shadow roots render; other templates stay inert.
                    let host_free = doc.element(parent).is_some_and(|p| p.subtree.is_none());
                    if let (Some(mode), true) = (el.attr(SHADOW_MODE_ATTR), host_free) {
                        let mode = if mode.eq_ignore_ascii_case("closed") {
                            ShadowMode::Closed
                        } else {
                            ShadowMode::Open
                        };
                        let root = doc.attach_subtree(parent, SubtreeKind::Shadow { mode })?;
                        push_children(&mut stack, node.children(), root);
                    }
                    continue;
                }
                let id = doc.create_element(&tag);
                for (name, value) in el.attrs() {
                    doc.set_attr(id, name, value)?;
                }
                doc.append_child(parent, id)?;
                if tag == "iframe" {
                    if let Some(srcdoc) = el.attr("srcdoc") {
                        let same_origin = el.attr("data-cross-origin").is_none();
                        let root = doc.attach_subtree(id, SubtreeKind::Frame { same_origin })?;
                        let inner = parse(srcdoc)?;
                        import_tree(doc, &inner, root)?;
                    }
                    continue;
                }
                push_children(&mut stack, node.children(), id);
            }
            // Template contents sit in a fragment under the template element.
            scraper::Node::Fragment => push_children(&mut stack, node.children(), parent),
            _ => {}
        }
    }
    Ok(())
}

fn push_children<T>(stack: &mut Vec<(T, NodeId)>, children: impl Iterator<Item = T>, parent: NodeId) {
    let children: Vec<T> = children.collect();
    stack.extend(children.into_iter().rev().map(|c| (c, parent)));
}

#[cfg(test)]
#[path = "html_tests.rs"]
mod tests;
