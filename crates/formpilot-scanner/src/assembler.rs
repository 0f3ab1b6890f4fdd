//! Field assembly: one observation pass over a page.

use std::collections::HashSet;

use formpilot_config::ScannerConfig;
use formpilot_dom::{Document, NodeId, Page};
use tracing::debug;
use uuid::Uuid;

use crate::classifier::{classify, is_clickable_element};
use crate::field::{FieldRecord, ObservationPass};
use crate::labels::LabelResolver;
use crate::traversal::interactive_nodes;
use crate::values::extract;

const GENERATED_ID_PREFIX: &str = "gen_";
const GENERATED_ID_LEN: usize = 9;

/// Runs traversal, classification, labeling and value extraction.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    config: ScannerConfig,
    labels: LabelResolver,
}

impl Assembler {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            labels: LabelResolver::new(config.clone()),
            config,
        }
    }

    pub fn labels(&self) -> &LabelResolver {
        &self.labels
    }

    /// Scan a live page. Starts a new pass; earlier handles go stale.
    pub fn scan(&self, page: &Page) -> ObservationPass {
        page.write(|doc| self.scan_document(doc))
    }

    pub fn scan_document(&self, doc: &mut Document) -> ObservationPass {
        let pass = doc.begin_pass();
        let doc: &Document = doc;
        let mut used_ids = HashSet::new();
        let mut fields = Vec::new();

        for node in interactive_nodes(doc, doc.root()) {
            let Some(el) = doc.element(node) else {
                continue;
            };
            if el.input_type().as_deref() == Some("hidden") || !is_visible(doc, node) {
                continue;
            }
            let kind = classify(doc, node);
            let min_size = if is_clickable_element(el) || kind.is_clickable() {
                self.config.min_clickable_size
            } else {
                self.config.min_control_size
            };
            if el.rect.is_smaller_than(min_size) {
                continue;
            }

            let id = match el.attr("id").filter(|id| !id.is_empty()) {
                Some(native) if used_ids.insert(native.to_string()) => native.to_string(),
                _ => generate_id(&mut used_ids),
            };
            let label = self.labels.resolve(doc, node, &kind);
            let value = extract(doc, node, &kind);
            debug!(id = %id, kind = %kind, label = %label, "Discovered field");
            fields.push(FieldRecord {
                id,
                kind,
                label,
                value,
                node: doc.node_ref(node),
            });
        }

        let observation = ObservationPass { pass, fields };
        if !observation.is_empty() {
            debug!(pass = pass.0, stats = ?observation.stats(), "Scanner stats");
        }
        observation
    }
}

/// Whether an element renders: shown style and a non-empty box.
pub fn is_visible(doc: &Document, node: NodeId) -> bool {
    doc.element(node).is_some_and(|el| {
        el.style.is_shown() && el.rect.width > 0.0 && el.rect.height > 0.0
    })
}

fn generate_id(used: &mut HashSet<String>) -> String {
    loop {
        let token = Uuid::new_v4().simple().to_string();
        let id = format!("{GENERATED_ID_PREFIX}{}", &token[..GENERATED_ID_LEN]);
        if used.insert(id.clone()) {
            return id;
        }
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
