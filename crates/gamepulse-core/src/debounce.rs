//! Quiescence debouncer for the search box
//!
//! Time is passed in by the caller as an offset from any fixed origin, so
//! the browser binding can feed `performance.now()` and tests can feed
//! synthetic instants.

use std::time::Duration;

/// Input must be quiet this long before the search commits
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(700);

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    window: Duration,
    pending: Option<String>,
    deadline: Option<Duration>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    /// Record a keystroke; restarts the quiet window.
    pub fn input(&mut self, text: impl Into<String>, now: Duration) {
        self.pending = Some(text.into());
        self.deadline = Some(now + self.window);
    }

    /// Take the pending text once the window has elapsed.
    pub fn poll(&mut self, now: Duration) -> Option<String> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending text immediately (Enter key, blur).
    pub fn flush(&mut self) -> Option<String> {
        self.deadline = None;
        self.pending.take()
    }

    /// Drop pending text without committing.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    /// When the pending text becomes due
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Time left until `poll` would yield, from `now`
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
