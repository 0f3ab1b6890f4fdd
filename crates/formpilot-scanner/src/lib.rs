//! # FormPilot Scanner
//!
//! Discovers the fields of a page and describes each one.
//!
//! ```text
//! traversal ──> classifier ──> labels ──> values ──> assembler
//!  (nodes)       (kind)        (label)    (value)    (FieldRecord)
//! ```
//!
//! All stages are read-only with respect to the page, except that the
//! assembler starts a new pass generation on every scan.

pub mod assembler;
pub mod classifier;
pub mod field;
pub mod labels;
pub mod traversal;
pub mod values;

pub use assembler::Assembler;
pub use field::{FieldKind, FieldRecord, ObservationPass};
pub use labels::LabelResolver;
