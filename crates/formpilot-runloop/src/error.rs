//! Error types for the control loop.

use thiserror::Error;

use formpilot_protocols::AgentStatus;

/// Errors raised by the control loop.
#[derive(Debug, Error)]
pub enum RunLoopError {
    /// The loop is already running.
    #[error("Control loop is already running ({0})")]
    AlreadyRunning(AgentStatus),

    /// A tick task panicked or was aborted. Carries the panic message.
    #[error("{0}")]
    TickFault(String),
}

/// Result type for control loop operations.
pub type RunLoopResult<T> = Result<T, RunLoopError>;
