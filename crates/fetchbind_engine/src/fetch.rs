use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;

use fetchbind_core::{FailureKind, FetchError};

/// The caller-supplied fetch operation.
///
/// `cancel` fires when the attempt is superseded or the binder is torn down.
/// The attempt's future is dropped at that point; the token lets an
/// implementation notice it from tasks it spawned on its own.
#[async_trait::async_trait]
pub trait Fetcher<P, T>: Send + Sync
where
    P: Send + 'static,
    T: Send + 'static,
{
    async fn fetch(&self, params: P, cancel: CancellationToken) -> Result<T, FetchError>;
}

/// Function-backed fetcher: wraps `F: Fn(P, CancellationToken) -> Fut` and
/// produces a fresh future per attempt.
#[derive(Debug)]
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait::async_trait]
impl<P, T, F, Fut> Fetcher<P, T> for FnFetcher<F>
where
    P: Send + 'static,
    T: Send + 'static,
    F: Fn(P, CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, FetchError>> + Send,
{
    async fn fetch(&self, params: P, cancel: CancellationToken) -> Result<T, FetchError> {
        (self.f)(params, cancel).await
    }
}

/// Runs one attempt, folding panics and timeouts into [`FetchError`].
///
/// Returns `None` once `cancel` fires; the attempt is dropped at that point
/// together with everything it holds.
pub(crate) async fn run_fetch<P, T>(
    fetcher: Arc<dyn Fetcher<P, T>>,
    params: P,
    cancel: CancellationToken,
    timeout: Option<Duration>,
) -> Option<Result<T, FetchError>>
where
    P: Send + 'static,
    T: Send + 'static,
{
    let attempt = AssertUnwindSafe(fetcher.fetch(params, cancel.clone())).catch_unwind();
    let bounded = async move {
        let caught = match timeout {
            Some(limit) => match tokio::time::timeout(limit, attempt).await {
                Ok(caught) => caught,
                Err(_) => {
                    return Err(FetchError::new(
                        FailureKind::Timeout,
                        format!("no result after {limit:?}"),
                    ))
                }
            },
            None => attempt.await,
        };
        caught.unwrap_or_else(|payload| {
            Err(FetchError::new(
                FailureKind::Panicked,
                panic_message(payload.as_ref()),
            ))
        })
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = bounded => Some(result),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "fetch operation panicked".to_string()
    }
}
