//! Document construction and write operations.

use tracing::trace;

use crate::document::Document;
use crate::error::DomError;
use crate::events::{DispatchedEvent, EventKind};
use crate::node::{Element, FragmentKind, Node, NodeData, NodeId, PassId, Subtree, SubtreeKind};
use crate::style::ComputedStyle;
use crate::types::Rect;

impl Document {
    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            host: None,
            data,
        });
        id
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(DomError::NodeNotFound(id))?
            .as_element_mut()
            .ok_or(DomError::NotAnElement(id))
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let mut element = Element::new(tag);
        element.style.display = crate::style::Display::for_tag(&element.tag);
        self.push_node(NodeData::Element(element))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text {
            text: text.to_string(),
        })
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.node(parent)?;
        let node = self.node(child)?;
        if node.is_fragment() {
            return Err(DomError::InvalidOperation {
                node: child,
                message: "fragments cannot be appended".to_string(),
            });
        }
        if let Some(old_parent) = node.parent {
            self.nodes[old_parent.index()].children.retain(|c| *c != child);
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Create an element with attributes and append it to `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attr(id, name, value)?;
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        let id = self.create_text(text);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Attach an isolated subtree to `host` and return its root fragment.
    pub fn attach_subtree(&mut self, host: NodeId, kind: SubtreeKind) -> Result<NodeId, DomError> {
        if self.element_mut(host)?.subtree.is_some() {
            return Err(DomError::InvalidOperation {
                node: host,
                message: "host already has a subtree".to_string(),
            });
        }
        let root = self.push_node(NodeData::Fragment {
            kind: FragmentKind::Subtree,
        });
        self.nodes[root.index()].host = Some(host);
        self.element_mut(host)?.subtree = Some(Subtree { root, kind });
        Ok(root)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attributes.set(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        self.element_mut(id)?.attributes.remove(name);
        Ok(())
    }

    pub fn set_style(&mut self, id: NodeId, style: ComputedStyle) -> Result<(), DomError> {
        self.element_mut(id)?.style = style;
        Ok(())
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<(), DomError> {
        self.element_mut(id)?.rect = rect;
        Ok(())
    }

    /// Start a new observation pass. Handles from earlier passes go stale.
    pub fn begin_pass(&mut self) -> PassId {
        self.pass = self.pass.next();
        self.pass
    }

    /// Set the value through the native setter, leaving any framework
    /// tracker untouched until an event is dispatched.
    pub fn set_value_native(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.state.value = value.to_string();
        Ok(())
    }

    /// Set the value the way a framework-aware setter would: the tracker
    /// follows immediately.
    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        el.state.value = value.to_string();
        if el.state.tracked_value.is_some() {
            el.state.tracked_value = Some(value.to_string());
        }
        Ok(())
    }

    /// Install a framework tracker holding the current value.
    pub fn track_value(&mut self, id: NodeId) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        el.state.tracked_value = Some(el.state.value.clone());
        Ok(())
    }

    /// Set the checked state. Checking a radio unchecks the other radios of
    /// its group (same `name`, same tree scope).
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        el.state.checked = checked;
        let is_radio = el.input_type().as_deref() == Some("radio");
        let group = el.attr("name").map(str::to_string);
        if !(checked && is_radio) {
            return Ok(());
        }
        let Some(group) = group.filter(|g| !g.is_empty()) else {
            return Ok(());
        };
        let scope = self.scope_root(id);
        let peers: Vec<NodeId> = self
            .descendants(scope)
            .filter(|n| *n != id)
            .filter(|n| {
                self.element(*n).is_some_and(|el| {
                    el.input_type().as_deref() == Some("radio")
                        && el.attr("name") == Some(group.as_str())
                })
            })
            .collect();
        for peer in peers {
            self.element_mut(peer)?.state.checked = false;
        }
        Ok(())
    }

    /// Select the option at `index`. Single selects drop any other selection.
    pub fn select_index(&mut self, select: NodeId, index: usize) -> Result<(), DomError> {
        let options = self.options(select);
        let Some(target) = options.get(index).copied() else {
            return Err(DomError::InvalidOperation {
                node: select,
                message: format!("no option at index {}", index),
            });
        };
        let multiple = self.attr(select, "multiple").is_some();
        for option in options {
            if option == target {
                self.element_mut(option)?.state.selected = true;
            } else if !multiple {
                self.element_mut(option)?.state.selected = false;
            }
        }
        let value = self.option_value(target);
        let el = self.element_mut(select)?;
        el.state.value = value;
        Ok(())
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        self.element_mut(id)?;
        let old: Vec<NodeId> = std::mem::take(&mut self.nodes[id.index()].children);
        for child in old {
            self.nodes[child.index()].parent = None;
        }
        self.append_text(id, text)?;
        Ok(())
    }

    pub fn set_files(&mut self, id: NodeId, files: Vec<String>) -> Result<(), DomError> {
        self.element_mut(id)?.state.files = files;
        Ok(())
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), DomError> {
        self.element_mut(id)?;
        self.focused = Some(id);
        self.dispatch(id, EventKind::Focus)
    }

    /// Scroll the viewport vertically so that the element is inside it.
    pub fn scroll_into_view(&mut self, id: NodeId) -> Result<(), DomError> {
        let rect = self.element_mut(id)?.rect;
        if !rect.is_visible_in_viewport(&self.viewport) {
            let height = self.viewport.height as f64;
            self.viewport.scroll_y = (rect.y - (height - rect.height) / 2.0).max(0.0);
        }
        Ok(())
    }

    /// Append an event to the log. `input` and `change` bring a framework
    /// tracker in line with the current value.
    pub fn dispatch(&mut self, id: NodeId, kind: EventKind) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        let mut framework_synced = false;
        if kind.syncs_value() {
            let value = el.state.value.clone();
            if let Some(tracked) = el.state.tracked_value.as_mut() {
                if *tracked != value {
                    *tracked = value;
                    framework_synced = true;
                }
            }
        }
        if kind == EventKind::Blur && self.focused == Some(id) {
            self.focused = None;
        }
        trace!(node = ?id, event = %kind, framework_synced, "Dispatched event");
        self.events.push(DispatchedEvent {
            target: id,
            kind,
            framework_synced,
        });
        Ok(())
    }

    /// Activate (click) an element. Native checkboxes toggle and radios
    /// become checked before the click is logged.
    pub fn activate(&mut self, id: NodeId) -> Result<(), DomError> {
        self.element_mut(id)?;
        if self.is_disabled(id) {
            return Err(DomError::Disabled(id));
        }
        let (input_type, checked) = {
            let el = self.element_mut(id)?;
            (el.input_type(), el.state.checked)
        };
        match input_type.as_deref() {
            Some("checkbox") => self.set_checked(id, !checked)?,
            Some("radio") => self.set_checked(id, true)?,
            _ => {}
        }
        self.dispatch(id, EventKind::Click)
    }

    /// Replace this document with `next`, keeping the pass generation
    /// monotonic so every handle into the old content goes stale.
    pub fn replace_with(&mut self, mut next: Document) {
        next.pass = PassId(self.pass.0.max(next.pass.0)).next();
        *self = next;
    }
}

#[cfg(test)]
#[path = "document_write_tests.rs"]
mod tests;
