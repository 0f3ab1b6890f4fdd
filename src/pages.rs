//! Loading pages from disk and chaining them into a flow.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{info, warn};

use formpilot_dom::{ActivationHandler, Document, NodeId};
use formpilot_scanner::classifier::is_clickable_element;

/// Read a page from disk. `.json` files are document snapshots, anything
/// else is parsed as HTML.
pub(crate) fn load_page(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let is_snapshot = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let doc = if is_snapshot {
        Document::from_json(&content)
    } else {
        Document::from_html(&content)
    };
    Ok(doc.map_err(|e| format!("Failed to load {}: {}", path.display(), e))?)
}

/// Navigates to the next file whenever a clickable control is activated.
pub(crate) struct PageSequence {
    remaining: Mutex<VecDeque<PathBuf>>,
}

impl PageSequence {
    pub(crate) fn new(pages: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            remaining: Mutex::new(pages.into_iter().collect()),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining.lock().len()
    }
}

impl ActivationHandler for PageSequence {
    fn on_activate(&self, doc: &mut Document, node: NodeId) -> Option<Document> {
        if !doc.element(node).is_some_and(is_clickable_element) {
            return None;
        }
        let path = self.remaining.lock().pop_front()?;
        match load_page(&path) {
            Ok(next) => {
                info!(page = %path.display(), "Loading next page");
                Some(next)
            }
            Err(e) => {
                warn!(page = %path.display(), error = %e, "Next page could not be loaded");
                None
            }
        }
    }
}
