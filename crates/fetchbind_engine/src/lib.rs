//! Fetchbind engine: the binder actor and the timers, fetch seam and view
//! seam it drives.
mod debounce;
mod engine;
mod fetch;
mod poll;
mod settings;
mod view;

pub use debounce::DebounceGate;
pub use engine::BinderHandle;
pub use fetch::{FnFetcher, Fetcher};
pub use poll::PollScheduler;
pub use settings::{BindSettings, DEFAULT_DEBOUNCE};
pub use view::{ChannelViewSink, RefetchHandle, ViewFrame, ViewSink};

pub use fetchbind_core::{AsyncState, FailureKind, FetchError};
