//! # Debouncer
//!
//! A trailing-edge, cancel-and-reschedule timer. Each call to [`Debouncer::schedule`] aborts
//! the pending timer (if any) and starts a new one, so the task only fires after a full quiet
//! window with no further calls.
//!
//! Every schedule bumps a generation counter and hands it to the fired task. A task that was
//! already past its sleep when it got replaced can still deliver its message, so the receiver
//! should compare the generation it carries with [`Debouncer::generation`] and drop stale ones.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::trace;

pub struct Debouncer {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Generation of the most recent schedule.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True when `generation` belongs to the most recent, not yet cancelled schedule.
    pub fn is_current(&self, generation: u64) -> bool {
        self.is_pending() && generation == self.generation
    }

    /// True from a schedule until it is settled or cancelled, including the moment
    /// between the timer firing and its settle being handled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the quiet window. `fire` receives this schedule's generation and runs
    /// once the window elapses without another call.
    pub fn schedule<F, Fut>(&mut self, fire: F) -> u64
    where
        F: FnOnce(u64) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.abort_pending();
        self.generation += 1;
        let generation = self.generation;
        let delay = self.delay;
        trace!(generation, ?delay, "Debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fire(generation).await;
        }));
        generation
    }

    /// Mark the current schedule as consumed. Returns false for a stale generation.
    pub fn settle(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            trace!(generation, current = self.generation, "Stale debounce ignored");
            return false;
        }
        self.pending = None;
        true
    }

    /// Drop the pending timer without firing it.
    pub fn cancel(&mut self) {
        self.abort_pending();
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
