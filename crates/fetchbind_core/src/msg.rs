use std::time::Duration;

use crate::{FetchOutcome, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<T> {
    /// The view was bound; issues the initial load.
    Bind,
    /// Explicit refetch from the owner or from a rendered frame.
    RefetchRequested { ignore_error: bool },
    /// Params were replaced. Absorbed until the binder is bound.
    ParamsChanged,
    /// The armed poll timer fired.
    PollElapsed,
    /// A fetch attempt finished, possibly after being superseded.
    FetchCompleted {
        generation: Generation,
        outcome: FetchOutcome<T>,
    },
    /// New poll interval; zero disables polling.
    PollIntervalChanged(Duration),
    /// The binder is going away.
    TearDown,
}
