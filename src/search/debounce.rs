//! Cancellable scheduled callbacks

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Runs the most recently scheduled callback once `delay` passes without a
/// newer one.
///
/// Scheduling supersedes whatever is pending. After [`Debouncer::cancel`]
/// returns, the superseded callback is guaranteed not to run: callbacks
/// fire under the same lock that cancellation takes, and only if their
/// ticket is still current.
pub struct Debouncer {
    delay: Duration,
    generation: Arc<Mutex<u64>>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(Mutex::new(0)),
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `callback`, replacing any pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.abort_pending();
        let ticket = {
            let mut generation = self.generation.lock();
            *generation += 1;
            *generation
        };

        let generation = Arc::clone(&self.generation);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let current = generation.lock();
            if *current == ticket {
                callback();
            }
        }));
    }

    /// Drops the pending callback. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        *self.generation.lock() += 1;
        self.abort_pending();
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
