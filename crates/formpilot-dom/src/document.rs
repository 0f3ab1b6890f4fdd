//! Document arena and read-side queries.

use serde::{Deserialize, Serialize};

use crate::error::DomError;
use crate::events::DispatchedEvent;
use crate::node::{Element, FragmentKind, Node, NodeData, NodeId, NodeRef, PassId};
use crate::style::{Display, Visibility};
use crate::types::{Rect, ViewportInfo};

/// Tags whose rendered text starts on a new line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "legend", "li", "main", "nav", "ol", "option", "p", "pre", "section", "table", "tr",
    "ul",
];

/// An in-memory document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    #[serde(default)]
    pub(crate) pass: PassId,
    #[serde(default)]
    pub(crate) viewport: ViewportInfo,
    #[serde(default)]
    pub(crate) events: Vec<DispatchedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only its root fragment.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                host: None,
                data: NodeData::Fragment {
                    kind: FragmentKind::Document,
                },
            }],
            root: NodeId::new(0),
            pass: PassId::default(),
            viewport: ViewportInfo::default(),
            events: Vec::new(),
            focused: None,
        }
    }

    /// Load a document from a JSON snapshot.
    ///
    /// Every link in the arena must point at an existing node, agree with its
    /// counterpart (child and parent, subtree root and host) and lead back up
    /// to a scope root without looping.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let doc: Document = serde_json::from_str(json)?;
        doc.check_links()?;
        Ok(doc)
    }

    fn check_links(&self) -> Result<(), DomError> {
        let len = self.nodes.len();
        let in_range = |id: NodeId| id.index() < len;
        if !in_range(self.root) {
            return Err(DomError::NodeNotFound(self.root));
        }
        if let Some(focused) = self.focused.filter(|f| !in_range(*f)) {
            return Err(DomError::NodeNotFound(focused));
        }

        let mut owned = vec![false; len];
        for (index, node) in self.nodes.iter().enumerate() {
            let id = NodeId::new(index);
            let subtree_root = node.as_element().and_then(|el| el.subtree).map(|s| s.root);
            let links = node
                .parent
                .iter()
                .chain(node.host.iter())
                .chain(node.children.iter())
                .chain(subtree_root.iter());
            if let Some(missing) = links.copied().find(|n| !in_range(*n)) {
                return Err(DomError::InvalidSnapshot(format!(
                    "node {} links to missing node {}",
                    index,
                    missing.index()
                )));
            }
            for child in node.children.iter().chain(subtree_root.iter()) {
                if std::mem::replace(&mut owned[child.index()], true) {
                    return Err(DomError::InvalidSnapshot(format!(
                        "node {} is attached more than once",
                        child.index()
                    )));
                }
            }
            if let Some(child) = node
                .children
                .iter()
                .find(|c| self.nodes[c.index()].parent != Some(id))
            {
                return Err(DomError::InvalidSnapshot(format!(
                    "child {} of node {} has another parent",
                    child.index(),
                    index
                )));
            }
            if let Some(root) = subtree_root.filter(|r| self.nodes[r.index()].host != Some(id)) {
                return Err(DomError::InvalidSnapshot(format!(
                    "subtree root {} is not hosted by node {}",
                    root.index(),
                    index
                )));
            }
            let parent_lost = node
                .parent
                .is_some_and(|p| !self.nodes[p.index()].children.contains(&id));
            let host_lost = node.host.is_some_and(|h| {
                self.element(h).and_then(|el| el.subtree).map(|s| s.root) != Some(id)
            });
            if parent_lost || host_lost {
                return Err(DomError::InvalidSnapshot(format!(
                    "node {} is not listed by its parent or host",
                    index
                )));
            }
        }
        if owned[self.root.index()] {
            return Err(DomError::InvalidSnapshot("root node is attached".to_string()));
        }

        let up = |id: NodeId| {
            let node = &self.nodes[id.index()];
            node.parent.or(node.host)
        };
        for index in 0..len {
            let mut current = NodeId::new(index);
            let mut steps = 0;
            while let Some(next) = up(current) {
                steps += 1;
                if steps > len {
                    return Err(DomError::InvalidSnapshot(format!(
                        "node {} sits on a cycle",
                        index
                    )));
                }
                current = next;
            }
        }
        Ok(())
    }

    /// Save the document as a JSON snapshot.
    pub fn to_json(&self) -> Result<String, DomError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn pass(&self) -> PassId {
        self.pass
    }

    pub fn viewport(&self) -> &ViewportInfo {
        &self.viewport
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(id.index()).ok_or(DomError::NodeNotFound(id))
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.index()).and_then(Node::as_element)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.element(id).map(|el| el.rect)
    }

    /// Handle to `id` stamped with the current pass.
    pub fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef {
            pass: self.pass,
            node: id,
        }
    }

    /// Resolve a handle, refusing handles from earlier passes.
    pub fn resolve(&self, node_ref: &NodeRef) -> Result<NodeId, DomError> {
        if node_ref.pass != self.pass {
            return Err(DomError::StaleReference {
                node: node_ref.node,
                pass: node_ref.pass,
                current: self.pass,
            });
        }
        self.node(node_ref.node)?;
        Ok(node_ref.node)
    }

    /// Parent within the same tree scope. `None` at a scope root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.element(*p).is_some())
    }

    /// Element ancestors, nearest first, within the same tree scope.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_element(id), move |n| self.parent_element(*n))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|c| self.element(*c).is_some())
    }

    /// Pre-order descendants of `id` (excluding `id`), not entering subtrees.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// Root fragment of the tree scope containing `id`.
    pub fn scope_root(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Host element of a subtree fragment.
    pub fn host(&self, fragment: NodeId) -> Option<NodeId> {
        self.nodes.get(fragment.index()).and_then(|n| n.host)
    }

    /// First element with the given `id` attribute in `scope`.
    pub fn get_element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(scope)
            .find(|n| self.attr(*n, "id") == Some(id))
    }

    /// Root of the subtree attached to `host`, if any.
    ///
    /// Fails with [`DomError::AccessDenied`] for closed shadow roots and
    /// cross-origin frames.
    pub fn subtree_root(&self, host: NodeId) -> Result<Option<NodeId>, DomError> {
        let Some(subtree) = self.element(host).and_then(|el| el.subtree) else {
            return Ok(None);
        };
        if let Some(reason) = subtree.kind.denial() {
            return Err(DomError::AccessDenied {
                host,
                reason: reason.to_string(),
            });
        }
        Ok(Some(subtree.root))
    }

    /// Nearest element, starting at `id` itself, satisfying `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| self.element(*n).is_some_and(&pred))
    }

    /// Raw concatenation of descendant text.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.nodes.get(id.index()).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|n| self.nodes[n.index()].as_text())
            .collect()
    }

    /// Rendered text approximation.
    ///
    /// Hidden elements are skipped, block elements and `br` break lines,
    /// whitespace inside a line collapses and blank lines are dropped.
    pub fn inner_text(&self, id: NodeId) -> String {
        self.inner_text_excluding(id, |_| false)
    }

    /// [`Document::inner_text`] that also skips elements matching `exclude`.
    pub fn inner_text_excluding(&self, id: NodeId, exclude: impl Fn(&Element) -> bool) -> String {
        let mut raw = String::new();
        // Entries are (node, closing): closing entries emit the trailing break.
        let mut stack = vec![(id, false)];
        while let Some((current, closing)) = stack.pop() {
            let node = &self.nodes[current.index()];
            if closing {
                raw.push('\n');
                continue;
            }
            match &node.data {
                NodeData::Text { text } => raw.push_str(text),
                NodeData::Element(el) => {
                    if current != id
                        && (el.style.display == Display::None
                            || el.style.visibility == Visibility::Hidden
                            || exclude(el))
                    {
                        continue;
                    }
                    if el.tag == "br" {
                        raw.push('\n');
                        continue;
                    }
                    let block = BLOCK_TAGS.contains(&el.tag.as_str());
                    if block {
                        raw.push('\n');
                        stack.push((current, true));
                    }
                    stack.extend(node.children.iter().rev().map(|c| (*c, false)));
                }
                NodeData::Fragment { .. } => {
                    stack.extend(node.children.iter().rev().map(|c| (*c, false)));
                }
            }
        }
        raw.lines()
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `option` elements of a select, in order, including inside `optgroup`.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.descendants(select)
            .filter(|n| self.tag(*n) == Some("option"))
            .collect()
    }

    pub fn option_text(&self, option: NodeId) -> String {
        collapse_whitespace(&self.text_content(option))
    }

    /// The `value` attribute, falling back to the option's text.
    pub fn option_value(&self, option: NodeId) -> String {
        match self.attr(option, "value") {
            Some(value) => value.to_string(),
            None => self.option_text(option),
        }
    }

    /// Index of the effective selection.
    ///
    /// A single select with no explicitly selected option selects its first
    /// option; a multiple select reports its first selected option.
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        let options = self.options(select);
        let explicit = options
            .iter()
            .position(|o| self.element(*o).is_some_and(|el| el.state.selected));
        if explicit.is_some() || self.attr(select, "multiple").is_some() {
            return explicit;
        }
        if options.is_empty() { None } else { Some(0) }
    }

    pub fn is_disabled(&self, id: NodeId) -> bool {
        let Some(el) = self.element(id) else {
            return false;
        };
        if el.has_attr("disabled") || el.attr("aria-disabled") == Some("true") {
            return true;
        }
        self.ancestors(id)
            .any(|a| self.tag(a) == Some("fieldset") && self.attr(a, "disabled").is_some())
    }

    pub fn is_readonly(&self, id: NodeId) -> bool {
        self.element(id)
            .is_some_and(|el| el.has_attr("readonly") || el.attr("aria-readonly") == Some("true"))
    }

    /// The `body` element, or the root when the document has none.
    pub fn body(&self) -> NodeId {
        self.descendants(self.root)
            .find(|n| self.tag(*n) == Some("body"))
            .unwrap_or(self.root)
    }
}

/// Pre-order iterator over a node's descendants.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(next).iter().rev().copied());
        Some(next)
    }
}

/// Collapse runs of whitespace to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
