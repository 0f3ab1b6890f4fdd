//! Shared page handle.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::DomError;
use crate::node::{NodeId, NodeRef, PassId};
use crate::types::Rect;

const MUTATION_CHANNEL_CAPACITY: usize = 64;

/// Structural change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// A write added nodes to the document.
    NodesAdded { count: usize },
    /// The document was replaced.
    Navigated { pass: PassId },
}

/// Hook run after an element is activated.
///
/// Hosts use it to model page behavior: appending rows when an "add" control
/// is clicked, or returning a new document to navigate to.
pub trait ActivationHandler: Send + Sync {
    fn on_activate(&self, doc: &mut Document, node: NodeId) -> Option<Document>;
}

/// A document shared between the control loop, the refresh observer and the
/// host.
///
/// Access goes through short synchronous closures; the lock is never held
/// across an await point.
pub struct Page {
    doc: RwLock<Document>,
    mutations: broadcast::Sender<Mutation>,
    handlers: RwLock<Vec<Arc<dyn ActivationHandler>>>,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        let (mutations, _) = broadcast::channel(MUTATION_CHANNEL_CAPACITY);
        Self {
            doc: RwLock::new(doc),
            mutations,
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.doc.read())
    }

    /// Run a write. Subscribers hear about nodes the write added.
    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        let (result, added) = {
            let mut doc = self.doc.write();
            let before = doc.len();
            let result = f(&mut doc);
            (result, doc.len().saturating_sub(before))
        };
        if added > 0 {
            self.notify(Mutation::NodesAdded { count: added });
        }
        result
    }

    pub fn pass(&self) -> PassId {
        self.doc.read().pass()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Mutation> {
        self.mutations.subscribe()
    }

    pub fn on_activate(&self, handler: Arc<dyn ActivationHandler>) {
        self.handlers.write().push(handler);
    }

    /// Live rectangle of a node. Never cached.
    pub fn rect_of(&self, node: &NodeRef) -> Result<Rect, DomError> {
        self.read(|doc| {
            let id = doc.resolve(node)?;
            doc.rect(id).ok_or(DomError::NotAnElement(id))
        })
    }

    /// Activate an element and run the activation handlers.
    pub fn activate(&self, node: &NodeRef) -> Result<(), DomError> {
        let handlers: Vec<Arc<dyn ActivationHandler>> = self.handlers.read().clone();
        let next = self.write(|doc| -> Result<Option<Document>, DomError> {
            let id = doc.resolve(node)?;
            doc.activate(id)?;
            let mut next = None;
            for handler in &handlers {
                if let Some(target) = handler.on_activate(doc, id) {
                    next = Some(target);
                    break;
                }
            }
            Ok(next)
        })?;
        if let Some(next) = next {
            self.navigate(next);
        }
        Ok(())
    }

    /// Replace the document. Every outstanding [`NodeRef`] goes stale.
    pub fn navigate(&self, next: Document) {
        let pass = {
            let mut doc = self.doc.write();
            doc.replace_with(next);
            doc.pass()
        };
        info!(pass = pass.0, "Page navigated");
        self.notify(Mutation::Navigated { pass });
    }

    /// Clone the current document.
    pub fn snapshot(&self) -> Document {
        self.doc.read().clone()
    }

    fn notify(&self, mutation: Mutation) {
        // No receivers is fine: nobody is observing yet.
        if self.mutations.send(mutation.clone()).is_err() {
            debug!(?mutation, "No mutation subscribers");
        }
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
