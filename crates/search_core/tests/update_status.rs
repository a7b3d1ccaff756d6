use search_core::{update, AppState, BridgeStatus, Msg};

#[test]
fn repeated_status_leaves_search_state_alone() {
    let (state, _) = update(AppState::new(), Msg::SearchInput("foo".to_string()));
    let (state, effects) = update(state, Msg::BridgeStatus(BridgeStatus::Disconnected));
    let (next, more_effects) = update(state.clone(), Msg::BridgeStatus(BridgeStatus::Disconnected));

    assert!(effects.is_empty());
    assert!(more_effects.is_empty());
    assert_eq!(state.view(), next.view());
    assert_eq!(next.query(), "foo");
    assert_eq!(next.awaiting(), Some(1));
}
