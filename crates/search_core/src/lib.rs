//! Search UI core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod result;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use result::{Payload, SearchResult};
pub use state::{AppState, BridgeStatus, QuerySeq, RenderPolicy};
pub use update::update;
pub use view_model::{ResultRowView, ResultsView, SearchViewModel, NO_RESULTS_TEXT};
