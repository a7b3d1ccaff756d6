use search_logging::{search_debug, search_info};

use crate::state::ResultsState;
use crate::{AppState, Effect, Msg, Payload};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchInput(value) => {
            state.mark_dirty();
            if value.is_empty() {
                // Clearing never reaches the backend; any reply still in flight is stale.
                state.set_query(value);
                state.collapse();
                Vec::new()
            } else {
                let seq = state.begin_query();
                state.set_query(value.clone());
                vec![Effect::SendQuery { seq, query: value }]
            }
        }
        Msg::ResultsReceived { seq, payload } => {
            if state.accepts_reply(seq) {
                state.set_results(into_results(payload));
                state.mark_dirty();
            } else {
                state.record_dropped_reply();
                search_debug!(
                    "Dropping stale reply seq={:?} (awaiting {:?}, {} items)",
                    seq,
                    state.awaiting(),
                    payload.len()
                );
            }
            Vec::new()
        }
        Msg::BridgeStatus(status) => {
            search_info!("Bridge status changed to {:?}", status);
            state.set_bridge(status);
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

fn into_results(payload: Payload) -> ResultsState {
    if payload.is_empty_state() {
        return ResultsState::Empty;
    }
    match payload {
        Payload::Records(records) => ResultsState::Items(records),
        Payload::Missing | Payload::Malformed => ResultsState::Empty,
    }
}
