use std::time::Duration;

use tokio::time::Instant;

/// Single one-shot poll timer; arming replaces any earlier deadline.
#[derive(Debug, Default)]
pub struct PollScheduler {
    deadline: Option<Instant>,
}

impl PollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero, or an interval too large to represent as an instant, leaves the
    /// scheduler disarmed.
    pub fn arm(&mut self, interval: Duration, now: Instant) {
        self.deadline = if interval.is_zero() {
            None
        } else {
            now.checked_add(interval)
        };
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per armed deadline, when it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
