//! Control loop status and log records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of the fill agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentStatus {
    /// Waiting to be started.
    #[default]
    Idle,
    /// Scanning the page for fields.
    Observing,
    /// Resolving values for the fields that need one.
    Planning,
    /// Writing values into fields.
    Executing,
    /// A proceed control was clicked; waiting for the next step.
    Navigating,
    /// A navigation failed.
    Recovering,
    /// Nothing left to fill and nothing to proceed to.
    Succeeded,
    /// Stopped by the user, by a fault or by the tick budget.
    Stopped,
}

impl AgentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AgentStatus::Succeeded | AgentStatus::Stopped)
    }

    /// Started and not yet finished.
    pub fn is_active(self) -> bool {
        self != AgentStatus::Idle && !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentStatus::Idle => "IDLE",
            AgentStatus::Observing => "OBSERVING",
            AgentStatus::Planning => "PLANNING",
            AgentStatus::Executing => "EXECUTING",
            AgentStatus::Navigating => "NAVIGATING",
            AgentStatus::Recovering => "RECOVERING",
            AgentStatus::Succeeded => "SUCCEEDED",
            AgentStatus::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of the agent's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
