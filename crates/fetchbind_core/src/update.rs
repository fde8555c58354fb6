use crate::{BindState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not change anything (stale outcomes, stale poll fires,
/// anything after teardown) return the state untouched and no effects.
pub fn update<T>(mut state: BindState<T>, msg: Msg<T>) -> (BindState<T>, Vec<Effect>) {
    if state.is_torn_down() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Bind => {
            if state.is_bound() {
                return (state, Vec::new());
            }
            state.mark_bound();
            accept_request(&mut state, false)
        }
        Msg::RefetchRequested { ignore_error } => accept_request(&mut state, ignore_error),
        Msg::ParamsChanged => {
            // The first change happens before bind and is served by the bind fetch.
            if !state.is_bound() {
                return (state, Vec::new());
            }
            accept_request(&mut state, false)
        }
        Msg::PollElapsed => {
            if !state.take_poll_fire() {
                return (state, Vec::new());
            }
            let ignore_error = state.poll().ignore_errors;
            accept_request(&mut state, ignore_error)
        }
        Msg::FetchCompleted {
            generation,
            outcome,
        } => {
            if !state.apply_outcome(generation, outcome) {
                return (state, Vec::new());
            }
            let poll = state.poll();
            if poll.is_enabled() {
                state.arm_poll();
                vec![
                    Effect::Render,
                    Effect::ArmPoll {
                        interval: poll.interval,
                    },
                ]
            } else {
                vec![Effect::Render]
            }
        }
        Msg::PollIntervalChanged(interval) => {
            if state.set_poll_interval(interval) {
                vec![Effect::DisarmPoll]
            } else {
                Vec::new()
            }
        }
        Msg::TearDown => {
            state.tear_down();
            vec![Effect::Release]
        }
    };

    (state, effects)
}

fn accept_request<T>(state: &mut BindState<T>, ignore_error: bool) -> Vec<Effect> {
    let generation = state.accept_request();
    vec![
        Effect::StartFetch {
            generation,
            ignore_error,
        },
        Effect::Render,
    ]
}
