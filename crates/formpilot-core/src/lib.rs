//! # FormPilot Core
//!
//! Turns discovered fields into page writes.
//!
//! - [`matcher`] - Deterministic rule table mapping labels to profile values
//! - [`injector`] - Fills fields and clicks controls on a live [`Page`]
//! - [`navigation`] - Finds the control that advances a multi-step flow
//!
//! [`Page`]: formpilot_dom::Page

pub mod injector;
pub mod matcher;
pub mod navigation;

pub use injector::{InjectError, Injector};
pub use matcher::{Domain, MatchExplanation, Rule, explain, match_field, match_label, rules};
pub use navigation::{KeywordProceedClassifier, ProceedClassifier, find_proceed_control};
