//! Trailing-edge debounce for rapidly changing input.

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

#[derive(Debug)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds the latest input until it has been quiet for `delay`.
///
/// Each [`push`](Self::push) restarts the window, so only the last value of a
/// burst is ever released, and it is released once. Dropping the debouncer or
/// calling [`cancel`](Self::cancel) discards a pending value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Debouncer with the given quiet window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Configured quiet window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a new input value, restarting the window.
    pub fn push(&mut self, value: T) {
        self.push_at(value, Instant::now());
    }

    /// Record a new input value observed at `now`.
    pub fn push_at(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// True while a value is waiting for its window to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value becomes ready.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Release the pending value if its window has elapsed.
    pub fn take_ready(&mut self) -> Option<T> {
        self.take_ready_at(Instant::now())
    }

    /// Release the pending value if its window has elapsed by `now`.
    pub fn take_ready_at(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref()?.deadline > now {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Discard the pending value; returns whether one was discarded.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Wait for the pending value's window to elapse and release it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.flush()
    }
}
