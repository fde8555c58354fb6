//! Fetchbind core: pure state machine for binding a view to a repeatable fetch.
mod effect;
mod msg;
mod outcome;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{FailureKind, FetchError, FetchOutcome};
pub use state::{AsyncState, BindState, Generation, Phase, PollSettings};
pub use update::update;
