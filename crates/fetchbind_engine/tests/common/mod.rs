#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use fetchbind_engine::{
    BindSettings, BinderHandle, ChannelViewSink, FetchError, Fetcher, FnFetcher, ViewFrame,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(bind_logging::initialize_for_tests);
}

/// Switchable fetch operation that counts its invocations.
#[derive(Clone, Default)]
pub struct Backend {
    pub calls: Arc<AtomicUsize>,
    pub failing: Arc<AtomicBool>,
}

impl Backend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Echoes the params after `delay`, or fails while switched to failing.
    pub fn fetcher(&self, delay: Duration) -> Arc<dyn Fetcher<String, String>> {
        let backend = self.clone();
        FnFetcher::arc(move |params: String, _cancel: CancellationToken| {
            let backend = backend.clone();
            async move {
                backend.calls.fetch_add(1, Ordering::SeqCst);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if backend.failing.load(Ordering::SeqCst) {
                    Err(FetchError::failed("backend unavailable"))
                } else {
                    Ok(params)
                }
            }
        })
    }
}

pub fn spawn_binder(
    params: &str,
    fetcher: Arc<dyn Fetcher<String, String>>,
    settings: BindSettings,
) -> (
    BinderHandle<String, String>,
    UnboundedReceiver<ViewFrame<String>>,
) {
    let (sink, frames) = ChannelViewSink::channel();
    let handle = BinderHandle::spawn(params.to_string(), fetcher, sink, settings);
    (handle, frames)
}

pub async fn next_frame(frames: &mut UnboundedReceiver<ViewFrame<String>>) -> ViewFrame<String> {
    timeout(Duration::from_secs(60), frames.recv())
        .await
        .expect("frame within a minute")
        .expect("binder still running")
}

/// Asserts that a live binder emits nothing for `quiet`.
pub async fn assert_no_frame(frames: &mut UnboundedReceiver<ViewFrame<String>>, quiet: Duration) {
    if let Ok(frame) = timeout(quiet, frames.recv()).await {
        panic!("unexpected frame: {:?}", frame.map(|frame| frame.state));
    }
}
