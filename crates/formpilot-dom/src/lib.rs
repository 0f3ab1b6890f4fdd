//! # FormPilot DOM
//!
//! In-memory document model that every stage of the form pipeline reads and
//! writes.
//!
//! ## Model
//!
//! ```text
//! Document (arena)
//! ├── #document fragment
//! │   └── html > body > form > input ...
//! │                      └── <x-widget>  ── Subtree { Shadow(Open) }
//! │                                          └── #subtree fragment > input ...
//! └── events: [focus, input, change, blur, click, ...]
//! ```
//!
//! - Nodes are addressed by [`NodeId`], an index into the arena.
//! - Isolated subtrees (shadow roots, frames) hang off their host element and
//!   are only reachable through [`Document::subtree_root`], which refuses
//!   closed shadow roots and cross-origin frames.
//! - Every observation pass stamps its node handles with a [`PassId`]. A
//!   [`NodeRef`] from an older pass no longer resolves.
//! - [`Page`] wraps a document for shared use: serialized access, mutation
//!   broadcast, and activation handlers that let a host model page
//!   transitions.
//!
//! Documents are loaded from HTML ([`Document::from_html`]) or from a JSON
//! snapshot ([`Document::from_json`]).

mod document;
mod document_write;
mod error;
mod events;
mod html;
mod node;
mod page;
mod style;
mod types;

pub use document::{collapse_whitespace, Descendants, Document};
pub use error::DomError;
pub use events::{DispatchedEvent, EventKind};
pub use node::{
    Attributes, Element, FormState, FragmentKind, Node, NodeData, NodeId, NodeRef, PassId,
    ShadowMode, Subtree, SubtreeKind,
};
pub use page::{ActivationHandler, Mutation, Page};
pub use style::{ComputedStyle, Display, InlineStyle, Visibility};
pub use types::{Rect, ViewportInfo};
