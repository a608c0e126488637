//! Cooperative cancellation for the polling loops
//!
//! The distance driver and the stream watcher are blocking busy-waits with
//! fixed sleep intervals; the token gives callers a way to abort them cleanly
//! (interrupt handler, session teardown) without leaving the droid rolling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Cancellation token threaded through every long-running wait.
///
/// Cloning is cheap; all clones observe the same cancellation.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip the token. All pending and future waits resolve immediately.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register interest before checking the flag so a cancel landing
            // between the check and the await cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
