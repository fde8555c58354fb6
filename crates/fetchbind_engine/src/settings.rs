use std::time::Duration;

use fetchbind_core::PollSettings;

/// Quiet window used when no explicit debounce is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindSettings {
    /// Quiet window of the debounce gate in front of the view.
    pub debounce: Duration,
    /// Delay between an applied outcome and the next automatic refetch. Zero disables polling.
    pub poll_interval: Duration,
    /// Keep the last good value when a poll-driven refetch fails.
    pub poll_ignores_errors: bool,
    /// Upper bound for a single fetch attempt.
    pub fetch_timeout: Option<Duration>,
}

impl Default for BindSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            poll_interval: Duration::ZERO,
            poll_ignores_errors: false,
            fetch_timeout: None,
        }
    }
}

impl BindSettings {
    pub fn poll(&self) -> PollSettings {
        PollSettings {
            interval: self.poll_interval,
            ignore_errors: self.poll_ignores_errors,
        }
    }
}
