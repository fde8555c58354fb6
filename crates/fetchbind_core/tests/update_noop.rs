use fetchbind_core::{update, BindState, Msg};

#[test]
fn update_after_teardown_is_noop() {
    let (state, _) = update(BindState::<u32>::default(), Msg::TearDown);
    let (next, effects) = update(state.clone(), Msg::RefetchRequested { ignore_error: false });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
