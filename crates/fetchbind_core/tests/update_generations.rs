use std::time::Duration;

use fetchbind_core::{
    update, BindState, Effect, FetchError, FetchOutcome, Msg, Phase, PollSettings,
};
use pretty_assertions::assert_eq;

fn completed(generation: u64, value: &'static str) -> Msg<&'static str> {
    Msg::FetchCompleted {
        generation,
        outcome: FetchOutcome::success(value, false),
    }
}

#[test]
fn superseded_outcome_is_discarded_in_any_completion_order() {
    let (state, _) = update(BindState::default(), Msg::Bind);
    let (state, _) = update(state, Msg::RefetchRequested { ignore_error: false });
    let (state, _) = update(state, Msg::RefetchRequested { ignore_error: false });
    assert_eq!(state.generation(), 3);

    // Newest completes first, then the older ones trickle in.
    let (state, effects) = update(state, completed(3, "third"));
    assert_eq!(effects, vec![Effect::Render]);
    let (state, effects) = update(state, completed(1, "first"));
    assert!(effects.is_empty());
    let (state, effects) = update(state, completed(2, "second"));
    assert!(effects.is_empty());

    assert_eq!(state.view().value, Some("third"));
    assert!(!state.view().loading);
}

#[test]
fn older_outcome_arriving_first_does_not_settle() {
    let (state, _) = update(BindState::default(), Msg::Bind);
    let (state, _) = update(state, Msg::RefetchRequested { ignore_error: false });

    let (state, effects) = update(state, completed(1, "stale"));
    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Loading);
    assert_eq!(state.view().value, None);
    assert!(state.view().loading);

    let (state, _) = update(state, completed(2, "fresh"));
    assert_eq!(state.view().value, Some("fresh"));
}

#[test]
fn outcome_is_applied_at_most_once() {
    let (state, _) = update(BindState::default(), Msg::Bind);
    let (state, _) = update(state, completed(1, "once"));
    let (state, effects) = update(state, completed(1, "twice"));

    assert!(effects.is_empty());
    assert_eq!(state.view().value, Some("once"));
}

#[test]
fn applied_outcome_arms_poll_when_enabled() {
    let poll = PollSettings::every(Duration::from_millis(1000));
    let (state, _) = update(BindState::new(poll), Msg::Bind);
    let (state, effects) = update(state, completed(1, "v"));

    assert_eq!(
        effects,
        vec![
            Effect::Render,
            Effect::ArmPoll {
                interval: Duration::from_millis(1000),
            },
        ]
    );
    assert!(state.is_poll_armed());
}

#[test]
fn failed_outcome_also_arms_poll() {
    let poll = PollSettings::every(Duration::from_millis(250));
    let (state, _) = update(BindState::<&str>::new(poll), Msg::Bind);
    let (_state, effects) = update(
        state,
        Msg::FetchCompleted {
            generation: 1,
            outcome: FetchOutcome::failure(FetchError::failed("down"), false),
        },
    );

    assert!(effects.contains(&Effect::ArmPoll {
        interval: Duration::from_millis(250),
    }));
}

#[test]
fn raw_request_never_arms_poll() {
    let poll = PollSettings::every(Duration::from_millis(1000));
    let (state, effects) = update(BindState::<&str>::new(poll), Msg::Bind);

    assert!(!state.is_poll_armed());
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::ArmPoll { .. })));
}

#[test]
fn disabled_poll_never_arms() {
    let (state, _) = update(BindState::default(), Msg::Bind);
    let (state, effects) = update(state, completed(1, "v"));

    assert_eq!(effects, vec![Effect::Render]);
    assert!(!state.is_poll_armed());
}

#[test]
fn poll_fire_issues_request_with_configured_flag() {
    let poll = PollSettings {
        interval: Duration::from_millis(500),
        ignore_errors: true,
    };
    let (state, _) = update(BindState::new(poll), Msg::Bind);
    let (state, _) = update(state, completed(1, "v"));
    let (state, effects) = update(state, Msg::PollElapsed);

    assert_eq!(
        effects,
        vec![
            Effect::StartFetch {
                generation: 2,
                ignore_error: true,
            },
            Effect::Render,
        ]
    );
    assert!(!state.is_poll_armed());
}

#[test]
fn unarmed_poll_fire_is_stale() {
    let (state, _) = update(BindState::<&str>::default(), Msg::Bind);
    let (next, effects) = update(state.clone(), Msg::PollElapsed);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn zero_interval_disarms_armed_poll() {
    let poll = PollSettings::every(Duration::from_millis(1000));
    let (state, _) = update(BindState::new(poll), Msg::Bind);
    let (state, _) = update(state, completed(1, "v"));

    let (state, effects) = update(state, Msg::PollIntervalChanged(Duration::ZERO));
    assert_eq!(effects, vec![Effect::DisarmPoll]);
    assert!(!state.is_poll_armed());

    let (state, effects) = update(state, Msg::PollElapsed);
    assert!(effects.is_empty());
    assert_eq!(state.generation(), 1);
}

#[test]
fn enabling_poll_waits_for_next_outcome() {
    let (state, _) = update(BindState::default(), Msg::Bind);
    let (state, _) = update(state, completed(1, "v"));

    let (state, effects) = update(
        state,
        Msg::PollIntervalChanged(Duration::from_millis(300)),
    );
    assert!(effects.is_empty());

    let (state, _) = update(state, Msg::RefetchRequested { ignore_error: false });
    let (_state, effects) = update(state, completed(2, "w"));
    assert!(effects.contains(&Effect::ArmPoll {
        interval: Duration::from_millis(300),
    }));
}
