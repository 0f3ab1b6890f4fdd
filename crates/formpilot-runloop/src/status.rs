//! Agent status and log, owned by the control loop.

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::info;

use formpilot_protocols::{AgentStatus, LogEntry};

struct BoardState {
    status: AgentStatus,
    logs: Vec<LogEntry>,
}

/// Current [`AgentStatus`] plus the append-only log.
///
/// Consumers read it or subscribe to status changes; only the control loop
/// mutates it.
pub struct StatusBoard {
    state: RwLock<BoardState>,
    status_tx: watch::Sender<AgentStatus>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        let (status_tx, _) = watch::channel(AgentStatus::Idle);
        Self {
            state: RwLock::new(BoardState {
                status: AgentStatus::Idle,
                logs: Vec::new(),
            }),
            status_tx,
        }
    }

    pub fn status(&self) -> AgentStatus {
        self.state.read().status
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.state.read().logs.clone()
    }

    /// Log messages without timestamps.
    pub fn messages(&self) -> Vec<String> {
        self.state
            .read()
            .logs
            .iter()
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<AgentStatus> {
        self.status_tx.subscribe()
    }

    /// Move to `next` and log the change. Terminal states only change
    /// through [`StatusBoard::restart`].
    pub(crate) fn transition(&self, next: AgentStatus) -> bool {
        {
            let mut state = self.state.write();
            if state.status.is_terminal() {
                return false;
            }
            state.status = next;
            state
                .logs
                .push(LogEntry::new(format!("State changed to: [{}]", next)));
        }
        info!(status = %next, "Agent state changed");
        self.status_tx.send_replace(next);
        true
    }

    pub(crate) fn log(&self, message: impl Into<String>) {
        let entry = LogEntry::new(message);
        info!(message = %entry.message, "Agent log");
        self.state.write().logs.push(entry);
    }

    /// Clear the log and return to `Idle` with a single opening entry.
    pub(crate) fn restart(&self, message: impl Into<String>) {
        {
            let mut state = self.state.write();
            state.status = AgentStatus::Idle;
            state.logs = vec![LogEntry::new(message)];
        }
        self.status_tx.send_replace(AgentStatus::Idle);
    }
}
