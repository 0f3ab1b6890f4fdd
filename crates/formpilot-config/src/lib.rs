//! # FormPilot Config
//!
//! Configuration management for FormPilot: loop timings, scanner
//! thresholds, store location and logging.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
