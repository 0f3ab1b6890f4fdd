//! Dispatched event log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Focus,
    Input,
    Change,
    Blur,
    Click,
}

impl EventKind {
    /// Events a page framework listens to in order to pick up a new value.
    pub fn syncs_value(self) -> bool {
        matches!(self, EventKind::Input | EventKind::Change)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Focus => "focus",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Blur => "blur",
            EventKind::Click => "click",
        };
        write!(f, "{}", name)
    }
}

/// One entry of a document's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchedEvent {
    pub target: NodeId,
    pub kind: EventKind,
    /// True if the event brought a framework tracker in line with the value.
    #[serde(default)]
    pub framework_synced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display() {
        assert_eq!(EventKind::Input.to_string(), "input");
        assert_eq!(EventKind::Blur.to_string(), "blur");
    }

    #[test]
    fn test_syncs_value() {
        assert!(EventKind::Input.syncs_value());
        assert!(EventKind::Change.syncs_value());
        assert!(!EventKind::Click.syncs_value());
        assert!(!EventKind::Focus.syncs_value());
    }
}
