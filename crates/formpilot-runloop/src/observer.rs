//! Mutation-driven refresh of the published field set.
//!
//! The observer never fills. It re-runs the assembler when the page grows or
//! navigates and publishes the result for overlay consumers.

use std::sync::Arc;

use tokio::sync::{broadcast::error::RecvError, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use formpilot_dom::Page;
use formpilot_scanner::{Assembler, ObservationPass};

use crate::latch::SingleFlight;

/// Publishes the latest [`ObservationPass`] of a page.
pub struct RefreshObserver {
    page: Arc<Page>,
    assembler: Arc<Assembler>,
    latch: Arc<SingleFlight>,
    fields: watch::Sender<Arc<ObservationPass>>,
}

impl RefreshObserver {
    pub fn new(page: Arc<Page>, assembler: Arc<Assembler>, latch: Arc<SingleFlight>) -> Self {
        let (fields, _) = watch::channel(Arc::new(ObservationPass::default()));
        Self {
            page,
            assembler,
            latch,
            fields,
        }
    }

    pub fn fields(&self) -> watch::Receiver<Arc<ObservationPass>> {
        self.fields.subscribe()
    }

    /// Most recently published field set.
    pub fn latest(&self) -> Arc<ObservationPass> {
        self.fields.borrow().clone()
    }

    /// Scan and publish. The caller must hold the latch.
    pub(crate) fn scan_and_publish(&self) -> Arc<ObservationPass> {
        let pass = Arc::new(self.assembler.scan(&self.page));
        self.fields.send_replace(Arc::clone(&pass));
        pass
    }

    /// Run one refresh pass now, or defer it if the latch is held.
    pub fn refresh(&self) -> bool {
        match self.latch.try_acquire() {
            Some(_guard) => {
                let pass = self.scan_and_publish();
                debug!(fields = pass.len(), "Refreshed field set");
                true
            }
            None => {
                self.latch.defer_refresh();
                debug!("Refresh deferred");
                false
            }
        }
    }

    /// Listen for page mutations until cancelled or the page goes away.
    pub async fn run(self: Arc<Self>, cancel: CancellationToken) {
        let mut mutations = self.page.subscribe();
        info!("Refresh observer started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = mutations.recv() => match event {
                    Ok(mutation) => {
                        debug!(?mutation, "Page mutated");
                        self.refresh();
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Mutation listener lagged");
                        self.refresh();
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = self.latch.deferred_refresh_ready() => {
                    if self.latch.take_deferred_refresh() {
                        self.refresh();
                    }
                }
            }
        }
        info!("Refresh observer stopped");
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod tests;
