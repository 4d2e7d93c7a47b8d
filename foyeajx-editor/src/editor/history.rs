// Undo/redo history module for the editor.
//
// Every entry is a full snapshot of the document markup. Typing is coalesced
// through a debounce slot so a burst of keystrokes lands as one entry per pause;
// programmatic edits are recorded immediately and cancel any pending burst.

use std::collections::VecDeque;
use std::time::Duration;

use foyeajx_core::HistoryConfig;
use tracing::{debug, trace, warn};

use super::clock::{Clock, SystemClock};
use super::debounce::DebounceSlot;

#[derive(Debug)]
pub struct History<C: Clock = SystemClock> {
    states: VecDeque<String>,
    /// `None` iff `states` is empty.
    current_index: Option<usize>,
    max_states: usize,
    pending: DebounceSlot<String>,
    clock: C,
}

impl History<SystemClock> {
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> History<C> {
    pub fn with_clock(config: HistoryConfig, clock: C) -> Self {
        let max_states = if config.capacity == 0 {
            warn!("history capacity 0 requested, keeping a single snapshot");
            1
        } else {
            config.capacity
        };

        Self {
            states: VecDeque::with_capacity(max_states.min(128)),
            current_index: None,
            max_states,
            pending: DebounceSlot::new(Duration::from_millis(config.debounce_ms)),
            clock,
        }
    }

    /// Forget everything and start over from `initial`. Used when the edited note changes.
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.pending.cancel();
        self.states.clear();
        self.states.push_back(initial.into());
        self.current_index = Some(0);
        debug!("history reset");
    }

    /// Propose the document's full current content.
    ///
    /// Debounced proposals wait for the quiescence window and replace each other.
    /// An immediate proposal is committed now and drops any debounced one still
    /// waiting, so a stale keystroke snapshot can never land on top of it.
    pub fn record(&mut self, content: impl Into<String>, immediate: bool) {
        // a pause that has already elapsed counts even if the host has not polled yet
        self.poll();

        let content = content.into();
        if immediate {
            if self.pending.cancel() {
                debug!("pending debounced snapshot dropped by immediate record");
            }
            self.commit(content);
        } else {
            let now = self.clock.now();
            self.pending.schedule(content, now);
        }
    }

    /// Commit the debounced snapshot if its window has elapsed. Returns true if the log grew.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        match self.pending.take_due(now) {
            Some(content) => self.commit(content),
            None => false,
        }
    }

    /// Commit the debounced snapshot now, whatever its deadline.
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(content) => self.commit(content),
            None => false,
        }
    }

    /// Step back one snapshot and return it for the caller to write into the document.
    pub fn undo(&mut self) -> Option<String> {
        self.flush();
        let index = self.current_index.filter(|&i| i > 0)? - 1;
        self.current_index = Some(index);
        trace!(index, "undo");
        self.states.get(index).cloned()
    }

    /// Step forward one snapshot, if an undo left one there.
    pub fn redo(&mut self) -> Option<String> {
        self.flush();
        let index = self.current_index? + 1;
        if index >= self.states.len() {
            return None;
        }
        self.current_index = Some(index);
        trace!(index, "redo");
        self.states.get(index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        match self.current_index {
            Some(i) => i > 0 || self.pending_differs(),
            None => false,
        }
    }

    pub fn can_redo(&self) -> bool {
        match self.current_index {
            Some(i) => i + 1 < self.states.len() && !self.pending_differs(),
            None => false,
        }
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.states.get(i))
            .map(String::as_str)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn max_states(&self) -> usize {
        self.max_states
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// When the pending snapshot becomes due, for hosts that arm a real timer.
    pub fn pending_remaining(&self) -> Option<Duration> {
        self.pending.remaining(self.clock.now())
    }

    /// Oldest first.
    pub fn snapshots(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    fn pending_differs(&self) -> bool {
        self.pending
            .peek()
            .is_some_and(|p| Some(p.as_str()) != self.current())
    }

    fn commit(&mut self, content: String) -> bool {
        if self.current() == Some(content.as_str()) {
            trace!("snapshot unchanged, not recorded");
            return false;
        }

        if let Some(i) = self.current_index {
            let pruned = self.states.len() - (i + 1);
            if pruned > 0 {
                debug!(pruned, "dropping redo branch");
                self.states.truncate(i + 1);
            }
        }

        self.states.push_back(content);
        while self.states.len() > self.max_states {
            self.states.pop_front();
            trace!("evicted oldest snapshot");
        }
        self.current_index = Some(self.states.len() - 1);
        debug!(len = self.states.len(), "snapshot recorded");
        true
    }
}
