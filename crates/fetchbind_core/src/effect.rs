use std::time::Duration;

use crate::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Run the fetch operation with the current params, superseding any fetch in flight.
    StartFetch {
        generation: Generation,
        ignore_error: bool,
    },
    /// State changed; offer a snapshot to the debounce gate.
    Render,
    /// (Re)arm the single poll timer from now.
    ArmPoll { interval: Duration },
    /// Cancel the poll timer if armed.
    DisarmPoll,
    /// Drop timers, pending emissions and the fetch in flight.
    Release,
}
