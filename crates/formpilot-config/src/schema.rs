//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::loader::ConfigLoader;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Control loop timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Interval between ticks.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Wait after each successful fill.
    #[serde(default = "default_fill_settle")]
    pub fill_settle_ms: u64,

    /// Wait before re-observing after a tick that made progress.
    #[serde(default = "default_refill_settle")]
    pub refill_settle_ms: u64,

    /// Wait after clicking a proceed control.
    #[serde(default = "default_navigation_settle")]
    pub navigation_settle_ms: u64,

    /// Wait between scrolling a control into view and clicking it.
    #[serde(default = "default_click_settle")]
    pub click_settle_ms: u64,

    /// Tick budget. 0 means unlimited.
    #[serde(default)]
    pub max_ticks: u32,
}

impl AgentConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn fill_settle(&self) -> Duration {
        Duration::from_millis(self.fill_settle_ms)
    }

    pub fn refill_settle(&self) -> Duration {
        Duration::from_millis(self.refill_settle_ms)
    }

    pub fn navigation_settle(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_ms)
    }

    pub fn click_settle(&self) -> Duration {
        Duration::from_millis(self.click_settle_ms)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            fill_settle_ms: default_fill_settle(),
            refill_settle_ms: default_refill_settle(),
            navigation_settle_ms: default_navigation_settle(),
            click_settle_ms: default_click_settle(),
            max_ticks: 0,
        }
    }
}

fn default_tick_interval() -> u64 {
    1500
}

fn default_fill_settle() -> u64 {
    100
}

fn default_refill_settle() -> u64 {
    500
}

fn default_navigation_settle() -> u64 {
    3000
}

fn default_click_settle() -> u64 {
    500
}

/// Field discovery thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Minimum width and height, in pixels, for non-clickable fields.
    #[serde(default = "default_min_control_size")]
    pub min_control_size: f64,

    /// Minimum width and height, in pixels, for clickable fields.
    #[serde(default = "default_min_clickable_size")]
    pub min_clickable_size: f64,

    /// Labels must be shorter than this many characters.
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,

    /// Button text is truncated to this many characters.
    #[serde(default = "default_button_label_len")]
    pub button_label_len: usize,

    /// Ancestor levels searched for a label.
    #[serde(default = "default_ancestor_depth")]
    pub ancestor_depth: usize,

    /// Preceding siblings searched for a label.
    #[serde(default = "default_sibling_depth")]
    pub sibling_depth: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_control_size: default_min_control_size(),
            min_clickable_size: default_min_clickable_size(),
            max_label_len: default_max_label_len(),
            button_label_len: default_button_label_len(),
            ancestor_depth: default_ancestor_depth(),
            sibling_depth: default_sibling_depth(),
        }
    }
}

fn default_min_control_size() -> f64 {
    10.0
}

fn default_min_clickable_size() -> f64 {
    5.0
}

fn default_max_label_len() -> usize {
    100
}

fn default_button_label_len() -> usize {
    50
}

fn default_ancestor_depth() -> usize {
    3
}

fn default_sibling_depth() -> usize {
    2
}

/// Profile store location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding `profile.json` and `settings.json`.
    #[serde(default = "default_store_dir")]
    pub dir: String,
}

impl StoreConfig {
    /// The directory with `~` expanded.
    pub fn resolved_dir(&self) -> PathBuf {
        PathBuf::from(ConfigLoader::expand_path(&self.dir))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
        }
    }
}

fn default_store_dir() -> String {
    "~/.formpilot".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write a daily-rolling log file.
    #[serde(default)]
    pub file: bool,

    /// Directory for log files. Defaults to `<store.dir>/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: false,
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
