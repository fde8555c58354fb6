use std::time::Duration;

use crate::{FetchError, FetchOutcome};

/// Monotonic tag of an accepted request; `0` means nothing was issued yet.
pub type Generation = u64;

/// Snapshot handed to the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncState<T> {
    pub value: Option<T>,
    pub error: Option<FetchError>,
    pub loading: bool,
}

impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            value: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> AsyncState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition for an accepted request: loading on, error cleared, value kept.
    pub fn request_accepted(self) -> Self {
        Self {
            error: None,
            loading: true,
            ..self
        }
    }

    /// Transition for an applied outcome.
    ///
    /// A failure only keeps the previous value when the triggering request
    /// asked to ignore errors; otherwise the value is cleared.
    pub fn outcome_applied(self, outcome: FetchOutcome<T>) -> Self {
        let FetchOutcome {
            result,
            ignore_error,
        } = outcome;
        match result {
            Ok(value) => Self {
                value: Some(value),
                error: None,
                loading: false,
            },
            Err(error) => Self {
                value: if ignore_error { self.value } else { None },
                error: Some(error),
                loading: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Settled,
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollSettings {
    /// Delay between an applied outcome and the next automatic refetch.
    pub interval: Duration,
    /// Ignore-error flag attached to poll-driven requests.
    pub ignore_errors: bool,
}

impl PollSettings {
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            ignore_errors: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.interval.is_zero()
    }
}

/// Everything the fold owns: the view state plus the bookkeeping needed to
/// discard superseded outcomes and decide on poll timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindState<T> {
    state: AsyncState<T>,
    phase: Phase,
    bound: bool,
    generation: Generation,
    pending: Option<Generation>,
    poll: PollSettings,
    poll_armed: bool,
}

impl<T> Default for BindState<T> {
    fn default() -> Self {
        Self::new(PollSettings::default())
    }
}

impl<T> BindState<T> {
    pub fn new(poll: PollSettings) -> Self {
        Self {
            state: AsyncState::new(),
            phase: Phase::Idle,
            bound: false,
            generation: 0,
            pending: None,
            poll,
            poll_armed: false,
        }
    }

    pub fn view(&self) -> AsyncState<T>
    where
        T: Clone,
    {
        self.state.clone()
    }

    pub fn state(&self) -> &AsyncState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Generation of the fetch whose outcome would still be applied.
    pub fn pending(&self) -> Option<Generation> {
        self.pending
    }

    pub fn poll(&self) -> PollSettings {
        self.poll
    }

    pub fn is_poll_armed(&self) -> bool {
        self.poll_armed
    }

    pub fn is_torn_down(&self) -> bool {
        self.phase == Phase::TornDown
    }

    pub(crate) fn mark_bound(&mut self) {
        self.bound = true;
    }

    pub(crate) fn accept_request(&mut self) -> Generation {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.phase = Phase::Loading;
        self.state = std::mem::take(&mut self.state).request_accepted();
        self.generation
    }

    /// Applies `outcome` if it belongs to the latest request still in flight.
    /// Returns `false` when the outcome was stale and left the state untouched.
    pub(crate) fn apply_outcome(
        &mut self,
        generation: Generation,
        outcome: FetchOutcome<T>,
    ) -> bool {
        if self.pending != Some(generation) {
            return false;
        }
        self.pending = None;
        self.phase = Phase::Settled;
        self.state = std::mem::take(&mut self.state).outcome_applied(outcome);
        true
    }

    pub(crate) fn arm_poll(&mut self) {
        self.poll_armed = true;
    }

    /// Consumes the armed flag; `false` means the fire was stale.
    pub(crate) fn take_poll_fire(&mut self) -> bool {
        std::mem::replace(&mut self.poll_armed, false)
    }

    /// Stores the new interval and returns whether a timer was armed.
    pub(crate) fn set_poll_interval(&mut self, interval: Duration) -> bool {
        self.poll.interval = interval;
        if interval.is_zero() {
            std::mem::replace(&mut self.poll_armed, false)
        } else {
            false
        }
    }

    pub(crate) fn tear_down(&mut self) {
        self.phase = Phase::TornDown;
        self.pending = None;
        self.poll_armed = false;
    }
}
