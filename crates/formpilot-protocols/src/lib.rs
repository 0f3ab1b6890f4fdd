//! # FormPilot Protocols
//!
//! Records and traits shared across the FormPilot crates.
//! Contains only data definitions and interfaces - no implementations.
//!
//! ## Contents
//!
//! - [`Profile`] - The user record the matcher reads answers from
//! - [`AppSettings`] - User-facing switches such as auto-submit
//! - [`AgentStatus`] / [`LogEntry`] - Control loop state as seen by consumers
//! - [`ProfileStore`] - Persistence collaborator for profile and settings

pub mod agent;
pub mod error;
pub mod profile;
pub mod settings;
pub mod store;

pub use agent::{AgentStatus, LogEntry};
pub use error::StoreError;
pub use profile::{
    Basics, Demographics, Education, Experience, Legal, Location, LocationPreferences, Meta,
    Preferences, Profile, ResumeFile, Salary, Sponsorship, Urls, VisaStatus, WorkAuthorization,
};
pub use settings::AppSettings;
pub use store::ProfileStore;
