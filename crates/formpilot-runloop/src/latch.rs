//! Single-flight latch shared by ticks and refresh passes.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// At most one tick or refresh pass holds the page at a time.
///
/// Ticks that find the latch held are dropped. Refresh requests that find it
/// held are remembered, and one trailing refresh is signalled on release.
#[derive(Debug, Default)]
pub struct SingleFlight {
    busy: AtomicBool,
    refresh_pending: AtomicBool,
    released: Notify,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { latch: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Remember that a refresh was requested while the latch was held.
    ///
    /// If the holder released in the meantime its release saw no pending
    /// request, so the signal is raised here instead.
    pub fn defer_refresh(&self) {
        self.refresh_pending.store(true, Ordering::SeqCst);
        if !self.busy.load(Ordering::SeqCst) {
            self.released.notify_one();
        }
    }

    /// Consume the deferred refresh request, if any.
    pub fn take_deferred_refresh(&self) -> bool {
        self.refresh_pending.swap(false, Ordering::AcqRel)
    }

    /// Resolves after a release that left a deferred refresh behind.
    pub async fn deferred_refresh_ready(&self) {
        self.released.notified().await;
    }
}

/// Holds the latch until dropped.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    latch: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        // Paired with `defer_refresh`: at least one side sees the other.
        self.latch.busy.store(false, Ordering::SeqCst);
        if self.latch.refresh_pending.load(Ordering::SeqCst) {
            self.latch.released.notify_one();
        }
    }
}
