//! Document model errors.

use thiserror::Error;

use crate::node::{NodeId, PassId};

#[derive(Debug, Error)]
pub enum DomError {
    /// The handle was produced by an earlier observation pass.
    #[error("Stale node reference {node:?} from pass {pass:?} (current pass {current:?})")]
    StaleReference {
        node: NodeId,
        pass: PassId,
        current: PassId,
    },

    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    /// An isolation boundary refused access to a subtree.
    #[error("Access denied to subtree of {host:?}: {reason}")]
    AccessDenied { host: NodeId, reason: String },

    #[error("Element {0:?} is disabled")]
    Disabled(NodeId),

    #[error("Invalid operation on {node:?}: {message}")]
    InvalidOperation { node: NodeId, message: String },

    #[error("HTML parse error: {0}")]
    Parse(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
