use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge rate limiter.
///
/// Every offer replaces the pending item and restarts the quiet window; the
/// item becomes due once the window passes without another offer.
#[derive(Debug)]
pub struct DebounceGate<S> {
    window: Duration,
    pending: Option<S>,
    deadline: Option<Instant>,
}

impl<S> DebounceGate<S> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// A window too large to represent as an instant holds the item with no
    /// deadline; it is only released by a later offer.
    pub fn offer(&mut self, item: S, now: Instant) {
        self.pending = Some(item);
        self.deadline = now.checked_add(self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the latest item once its quiet window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<S> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
        self.deadline = None;
    }
}
