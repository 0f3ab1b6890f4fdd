//! Field records produced by a scan.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use formpilot_dom::{NodeRef, PassId};

/// Semantic type of a discovered field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Single-line text-like input, with its declared sub-kind
    /// (`text`, `email`, `tel`, `date`, ...).
    Text(String),
    Select,
    SelectMultiple,
    TextArea,
    Checkbox,
    Radio,
    File,
    UploadButton,
    AddButton,
    Button,
    /// Content-editable region or ARIA text widget.
    Editable,
    /// Anything else, by tag.
    Other(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text(sub) => sub,
            FieldKind::Select => "select",
            FieldKind::SelectMultiple => "select-multiple",
            FieldKind::TextArea => "textarea",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
            FieldKind::File => "file",
            FieldKind::UploadButton => "upload-button",
            FieldKind::AddButton => "add-button",
            FieldKind::Button => "button",
            FieldKind::Editable => "editable",
            FieldKind::Other(tag) => tag,
        }
    }

    pub fn is_text_like(&self) -> bool {
        matches!(self, FieldKind::Text(_))
    }

    pub fn is_choice_list(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::SelectMultiple)
    }

    pub fn is_clickable(&self) -> bool {
        matches!(
            self,
            FieldKind::UploadButton | FieldKind::AddButton | FieldKind::Button
        )
    }

    pub fn is_upload(&self) -> bool {
        matches!(self, FieldKind::File | FieldKind::UploadButton)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One discovered field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    /// Native `id`, or a generated `gen_` token.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub value: String,
    /// Handle to the live node; stale once the next pass starts.
    #[serde(skip)]
    pub node: NodeRef,
}

/// The field set of one scan.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObservationPass {
    #[serde(skip)]
    pub pass: PassId,
    pub fields: Vec<FieldRecord>,
}

impl ObservationPass {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRecord> {
        self.fields.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Field count per kind.
    pub fn stats(&self) -> BTreeMap<String, usize> {
        let mut stats = BTreeMap::new();
        for field in &self.fields {
            *stats.entry(field.kind.as_str().to_string()).or_insert(0) += 1;
        }
        stats
    }
}

impl<'a> IntoIterator for &'a ObservationPass {
    type Item = &'a FieldRecord;
    type IntoIter = std::slice::Iter<'a, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
