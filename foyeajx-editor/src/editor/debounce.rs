//! Single-slot deferred task.
//!
//! At most one value is pending. Scheduling again replaces it and restarts the
//! quiescence window; nothing is released until the window passes untouched.

use std::time::{Duration, Instant};
use tracing::trace;

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

#[derive(Debug)]
pub struct DebounceSlot<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> DebounceSlot<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Park `value` until `now + delay`. Returns the value it displaced, if any.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let due = now + self.delay;
        let replaced = self.pending.replace(Pending { value, due }).map(|p| p.value);
        trace!(replaced = replaced.is_some(), "debounce rescheduled");
        replaced
    }

    /// Drop the pending value. Returns true if there was one.
    pub fn cancel(&mut self) -> bool {
        let had = self.pending.take().is_some();
        if had {
            trace!("debounce cancelled");
        }
        had
    }

    /// Take the pending value regardless of its deadline.
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending value only if its window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.take()
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Time left before the pending value is released; zero once overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due_at().map(|due| due.saturating_duration_since(now))
    }
}
