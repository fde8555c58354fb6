use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The fetch operation reported an error.
    Failed,
    /// The fetch operation exceeded the configured timeout.
    Timeout,
    /// The fetch operation panicked.
    Panicked,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Failed => write!(f, "fetch failed"),
            FailureKind::Timeout => write!(f, "fetch timed out"),
            FailureKind::Panicked => write!(f, "fetch panicked"),
        }
    }
}

/// Error surfaced to the view through [`AsyncState::error`](crate::AsyncState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Failed, message)
    }

    /// Flattens any error into a [`FailureKind::Failed`] with its display text.
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::failed(err.to_string())
    }
}

/// Result of one fetch attempt, tagged with the ignore-error flag of the
/// request that started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome<T> {
    pub result: Result<T, FetchError>,
    pub ignore_error: bool,
}

impl<T> FetchOutcome<T> {
    pub fn new(result: Result<T, FetchError>, ignore_error: bool) -> Self {
        Self {
            result,
            ignore_error,
        }
    }

    pub fn success(value: T, ignore_error: bool) -> Self {
        Self::new(Ok(value), ignore_error)
    }

    pub fn failure(error: FetchError, ignore_error: bool) -> Self {
        Self::new(Err(error), ignore_error)
    }
}
