use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use fetchbind_core::AsyncState;

/// One debounced emission: an owned state snapshot plus a way back in.
#[derive(Debug, Clone)]
pub struct ViewFrame<T> {
    pub state: AsyncState<T>,
    pub refetch: RefetchHandle,
}

/// Narrow refetch capability handed to the view.
///
/// Holds no strong reference to the binder; calls after teardown do nothing.
#[derive(Clone)]
pub struct RefetchHandle {
    request: Arc<dyn Fn(bool) + Send + Sync>,
}

impl RefetchHandle {
    pub(crate) fn new(request: impl Fn(bool) + Send + Sync + 'static) -> Self {
        Self {
            request: Arc::new(request),
        }
    }

    pub fn refetch(&self, ignore_error: bool) {
        (self.request)(ignore_error);
    }
}

impl fmt::Debug for RefetchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefetchHandle").finish_non_exhaustive()
    }
}

pub trait ViewSink<T>: Send + Sync {
    fn render(&self, frame: ViewFrame<T>);
}

pub struct ChannelViewSink<T> {
    tx: mpsc::UnboundedSender<ViewFrame<T>>,
}

impl<T> ChannelViewSink<T> {
    pub fn new(tx: mpsc::UnboundedSender<ViewFrame<T>>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ViewFrame<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl<T: Send> ViewSink<T> for ChannelViewSink<T> {
    fn render(&self, frame: ViewFrame<T>) {
        let _ = self.tx.send(frame);
    }
}
