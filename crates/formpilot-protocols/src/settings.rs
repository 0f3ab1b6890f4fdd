//! Application settings record.

use serde::{Deserialize, Serialize};

/// User-facing switches persisted alongside the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Model identifier kept for hosts that offer generated answers.
    pub model: String,
    /// UI language (`en`, `zh`).
    pub language: String,
    /// Whether submit/apply controls count as proceed controls.
    pub auto_submit: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            language: "en".to_string(),
            auto_submit: false,
        }
    }
}
