//! Arena node types.

use serde::{Deserialize, Serialize};

use crate::style::ComputedStyle;
use crate::types::Rect;

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Generation of an observation pass.
///
/// Monotonic for the lifetime of a [`crate::Page`], including across
/// navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassId(pub u64);

impl PassId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A node handle stamped with the pass that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub pass: PassId,
    pub node: NodeId,
}

/// Ordered element attributes. Names are stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_ascii_lowercase(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.0.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.0.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(&k.into(), v);
        }
        attrs
    }
}

/// Live form state of a control.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub files: Vec<String>,
    /// Value as last seen by a page framework that wraps the control.
    /// `None` when no framework tracks this control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracked_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    Open,
    Closed,
}

/// Kind of an isolated subtree hanging off a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SubtreeKind {
    Shadow { mode: ShadowMode },
    Frame { same_origin: bool },
}

impl SubtreeKind {
    /// Reason access is refused, if it is.
    pub fn denial(&self) -> Option<&'static str> {
        match self {
            SubtreeKind::Shadow {
                mode: ShadowMode::Closed,
            } => Some("closed shadow root"),
            SubtreeKind::Frame { same_origin: false } => Some("cross-origin frame"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtree {
    pub root: NodeId,
    pub kind: SubtreeKind,
}

/// An element node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (lowercase).
    pub tag: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub style: ComputedStyle,
    /// Bounding rectangle in document coordinates.
    #[serde(default)]
    pub rect: Rect,
    #[serde(default)]
    pub state: FormState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtree: Option<Subtree>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Attributes::new(),
            style: ComputedStyle::default(),
            rect: Rect::default(),
            state: FormState::default(),
            subtree: None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.has(name)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Declared `type` of an `input`, lower-cased, defaulting to `text`.
    pub fn input_type(&self) -> Option<String> {
        if self.tag != "input" {
            return None;
        }
        Some(
            self.attr("type")
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "text".to_string()),
        )
    }

    pub fn role(&self) -> Option<String> {
        self.attr("role").map(|r| r.trim().to_ascii_lowercase())
    }

    pub fn is_content_editable(&self) -> bool {
        matches!(self.attr("contenteditable"), Some(v) if !v.eq_ignore_ascii_case("false"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Document,
    Subtree,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeData {
    Fragment { kind: FragmentKind },
    Element(Element),
    Text { text: String },
}

/// A node in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// For subtree fragments, the element the subtree is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<NodeId>,
    pub data: NodeData,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match &self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self.data, NodeData::Fragment { .. })
    }
}
