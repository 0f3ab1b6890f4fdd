//! The tick-driven fill loop.
//!
//! Each tick observes the page, fills what the profile can answer, and
//! otherwise looks for a control that advances the flow. Status and log are
//! published through the [`StatusBoard`].

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use formpilot_config::{AgentConfig, Config};
use formpilot_core::{
    find_proceed_control, match_field, Injector, KeywordProceedClassifier, ProceedClassifier,
};
use formpilot_dom::{collapse_whitespace, Document, NodeId, NodeRef, Page};
use formpilot_protocols::{AgentStatus, AppSettings, LogEntry, Profile, ProfileStore};
use formpilot_scanner::values::{extract, needs_value};
use formpilot_scanner::{Assembler, FieldRecord, ObservationPass};

use crate::error::{RunLoopError, RunLoopResult};
use crate::latch::SingleFlight;
use crate::observer::RefreshObserver;
use crate::status::StatusBoard;

const START_MESSAGE: &str = "Agent active. Starting fill loop...";

/// Drives observe, plan, execute and navigate over one [`Page`].
pub struct ControlLoop {
    page: Arc<Page>,
    store: Arc<dyn ProfileStore>,
    observer: Arc<RefreshObserver>,
    injector: Injector,
    classifier: Option<Arc<dyn ProceedClassifier>>,
    config: AgentConfig,
    board: StatusBoard,
    latch: Arc<SingleFlight>,
    ticks: AtomicU32,
    cancel: Mutex<CancellationToken>,
}

impl ControlLoop {
    pub fn new(page: Arc<Page>, store: Arc<dyn ProfileStore>, config: &Config) -> Self {
        let latch = Arc::new(SingleFlight::new());
        let assembler = Arc::new(Assembler::new(config.scanner.clone()));
        let observer = Arc::new(RefreshObserver::new(
            Arc::clone(&page),
            assembler,
            Arc::clone(&latch),
        ));
        Self {
            page,
            store,
            observer,
            injector: Injector::new(&config.agent),
            classifier: None,
            config: config.agent.clone(),
            board: StatusBoard::new(),
            latch,
            ticks: AtomicU32::new(0),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Use `classifier` instead of the keyword classifier built from the
    /// stored settings.
    pub fn with_proceed_classifier(mut self, classifier: Arc<dyn ProceedClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn status(&self) -> AgentStatus {
        self.board.status()
    }

    pub fn logs(&self) -> Vec<LogEntry> {
        self.board.logs()
    }

    pub fn board(&self) -> &StatusBoard {
        &self.board
    }

    pub fn observer(&self) -> &Arc<RefreshObserver> {
        &self.observer
    }

    pub fn page(&self) -> &Arc<Page> {
        &self.page
    }

    /// Ticks run since the last start.
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Token cancelled when the loop stops.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.lock().clone()
    }

    /// Begin observing. Allowed from `Idle` or a terminal state.
    pub fn start(&self) -> RunLoopResult<()> {
        let status = self.status();
        if status.is_active() {
            return Err(RunLoopError::AlreadyRunning(status));
        }
        *self.cancel.lock() = CancellationToken::new();
        self.ticks.store(0, Ordering::Release);
        self.board.restart(START_MESSAGE);
        self.board.transition(AgentStatus::Observing);
        Ok(())
    }

    /// Force `Stopped` from any non-terminal state. An in-flight tick
    /// finishes its current step but makes no further transitions.
    pub fn stop(&self) -> bool {
        if self.status().is_terminal() {
            return false;
        }
        self.board.log("Agent manually stopped.");
        self.halt();
        true
    }

    fn halt(&self) {
        self.board.transition(AgentStatus::Stopped);
        self.cancel.lock().cancel();
    }

    /// Run one tick. Returns `false` when the tick was dropped: the loop is
    /// not active, a previous tick or refresh still holds the latch, or the
    /// tick budget is spent.
    pub async fn tick(self: &Arc<Self>) -> bool {
        if !self.status().is_active() {
            return false;
        }
        let Some(_guard) = self.latch.try_acquire() else {
            debug!("Tick dropped, page is busy");
            return false;
        };

        let budget = self.config.max_ticks;
        let count = self.ticks.fetch_add(1, Ordering::AcqRel) + 1;
        if budget > 0 && count > budget {
            self.board
                .log(format!("Tick budget of {} exhausted. Stopping.", budget));
            self.halt();
            return false;
        }

        // Panics inside the tick surface as a JoinError instead of
        // unwinding through the caller.
        let this = Arc::clone(self);
        let outcome = tokio::spawn(async move { this.observe_and_act().await }).await;
        if let Err(e) = outcome {
            self.fault(RunLoopError::TickFault(join_error_message(e)));
        }
        true
    }

    fn fault(&self, err: RunLoopError) {
        error!(error = %err, "Tick failed");
        self.board.log(format!("Error: {}", err));
        self.halt();
    }

    async fn observe_and_act(&self) {
        let pass = self.observer.scan_and_publish();
        let pending = self.page.read(|doc| pending_fields(doc, &pass));
        debug!(fields = pass.len(), pending = pending.len(), "Observed page");

        if !pending.is_empty() {
            if let Some(profile) = self.load_profile().await {
                if self.plan_and_fill(&pending, &profile).await {
                    sleep(self.config.refill_settle()).await;
                    self.board.transition(AgentStatus::Observing);
                    return;
                }
            }
        }

        if !self.status().is_terminal() {
            self.proceed().await;
        }
    }

    async fn load_profile(&self) -> Option<Profile> {
        match self.store.get_profile().await {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "Profile unavailable");
                self.board.log(format!("Profile unavailable: {}", e));
                None
            }
        }
    }

    /// Match and fill the pending fields. Returns whether any value changed.
    async fn plan_and_fill(&self, pending: &[FieldRecord], profile: &Profile) -> bool {
        if !self.board.transition(AgentStatus::Planning) {
            return false;
        }
        let plan: Vec<(&FieldRecord, String)> = pending
            .iter()
            .filter_map(|field| {
                match_field(field, profile)
                    .filter(|value| !value.is_empty())
                    .map(|value| (field, value))
            })
            .collect();
        debug!(planned = plan.len(), pending = pending.len(), "Planned fills");
        if plan.is_empty() || !self.board.transition(AgentStatus::Executing) {
            return false;
        }

        let mut progressed = false;
        for (field, value) in plan {
            if self.status().is_terminal() {
                break;
            }
            let before = self.current_value(field);
            if !self.injector.fill(&self.page, &field.node, &value) {
                continue;
            }
            if self.current_value(field) != before {
                progressed = true;
                self.board
                    .log(format!("Filled '{}' with '{}'", field.label, value));
            }
            sleep(self.config.fill_settle()).await;
        }
        progressed
    }

    fn current_value(&self, field: &FieldRecord) -> Option<String> {
        self.page.read(|doc| {
            doc.resolve(&field.node)
                .ok()
                .map(|id| extract(doc, id, &field.kind))
        })
    }

    async fn proceed(&self) {
        let classifier = match &self.classifier {
            Some(classifier) => Arc::clone(classifier),
            None => Arc::new(KeywordProceedClassifier::from_settings(
                &self.load_settings().await,
            )),
        };
        let target = self.page.read(|doc| {
            find_proceed_control(doc, classifier.as_ref())
                .map(|id| (doc.node_ref(id), control_caption(doc, id)))
        });

        let Some((node, caption)) = target else {
            self.board.log("No fields left to fill and no way forward.");
            self.board.transition(AgentStatus::Succeeded);
            return;
        };
        self.board
            .log(format!("Found navigation button: [{}]", caption));
        if !self.board.transition(AgentStatus::Navigating) {
            return;
        }
        if self.click(&node).await {
            self.board.log("Clicked Next. Waiting for page load...");
            sleep(self.config.navigation_settle()).await;
            self.board.transition(AgentStatus::Observing);
        } else {
            self.board.transition(AgentStatus::Recovering);
            self.board.log("Failed to click button (blocked or hidden)");
            self.halt();
        }
    }

    async fn click(&self, node: &NodeRef) -> bool {
        self.injector.click(&self.page, node).await
    }

    async fn load_settings(&self) -> AppSettings {
        self.store.get_settings().await.unwrap_or_else(|e| {
            warn!(error = %e, "Settings unavailable, using defaults");
            AppSettings::default()
        })
    }

    /// Tick at the configured interval until cancelled or a terminal state
    /// is reached. Missed ticks are skipped.
    pub async fn run(self: Arc<Self>) {
        let cancel = self.cancellation();
        let mut ticker = interval(self.config.tick_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(interval_ms = self.config.tick_interval_ms, "Control loop running");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            // Outside the select so cancellation never interrupts a tick.
            self.tick().await;
            if self.status().is_terminal() {
                break;
            }
        }
        info!(status = %self.status(), "Control loop finished");
    }

    /// Start the loop and its refresh observer on the current runtime.
    ///
    /// The returned handle completes when the loop reaches a terminal state
    /// or is stopped; the observer is cancelled with it.
    pub fn spawn(self: &Arc<Self>) -> RunLoopResult<JoinHandle<()>> {
        self.start()?;
        let cancel = self.cancellation();
        tokio::spawn(Arc::clone(&self.observer).run(cancel.child_token()));
        let this = Arc::clone(self);
        Ok(tokio::spawn(async move {
            this.run().await;
            cancel.cancel();
        }))
    }
}

/// Fields whose live value is still empty.
fn pending_fields(doc: &Document, pass: &ObservationPass) -> Vec<FieldRecord> {
    pass.iter()
        .filter(|field| {
            doc.resolve(&field.node)
                .is_ok_and(|id| needs_value(doc, id, &field.kind))
        })
        .cloned()
        .collect()
}

fn control_caption(doc: &Document, node: NodeId) -> String {
    let text = collapse_whitespace(&doc.inner_text(node));
    if !text.is_empty() {
        return text;
    }
    doc.attr(node, "value")
        .or_else(|| doc.attr(node, "aria-label"))
        .map(collapse_whitespace)
        .filter(|caption| !caption.is_empty())
        .unwrap_or_else(|| "Next".to_string())
}

fn join_error_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "tick task was cancelled".to_string();
    }
    panic_message(err.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return (*s).to_string();
    }
    match payload.downcast::<String>() {
        Ok(s) => *s,
        Err(_) => "tick panicked".to_string(),
    }
}

#[cfg(test)]
#[path = "control_loop_tests.rs"]
mod tests;
