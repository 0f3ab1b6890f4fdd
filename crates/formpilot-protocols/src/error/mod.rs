//! Error types for the FormPilot protocol layer.

mod store;

pub use store::*;
