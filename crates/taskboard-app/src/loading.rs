//! Busy flag shared between the holder and whoever renders it.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle to a busy flag; clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingState {
    busy: Arc<AtomicBool>,
}

impl LoadingState {
    /// Flag starting in the given state.
    #[must_use]
    pub fn new(initial: bool) -> Self {
        Self {
            busy: Arc::new(AtomicBool::new(initial)),
        }
    }

    /// Current value.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Mark busy.
    pub fn start(&self) {
        self.busy.store(true, Ordering::Release);
    }

    /// Mark idle.
    pub fn stop(&self) {
        self.busy.store(false, Ordering::Release);
    }

    /// Flip the flag.
    pub fn toggle(&self) {
        self.busy.fetch_xor(true, Ordering::AcqRel);
    }

    /// Run `op` with the flag raised and return its output untouched.
    ///
    /// The flag is lowered when `op` finishes, fails, panics or is dropped
    /// before completion.
    pub async fn with_loading<F: Future>(&self, op: F) -> F::Output {
        self.start();
        let _reset = ResetOnDrop(&self.busy);
        op.await
    }
}

struct ResetOnDrop<'a>(&'a AtomicBool);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
