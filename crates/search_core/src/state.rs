use crate::view_model::{ResultRowView, ResultsView, SearchViewModel, NO_RESULTS_TEXT};
use crate::SearchResult;

/// Monotonic tag for dispatched queries. Never sent to the backend.
pub type QuerySeq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgeStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

/// How replies are matched against the query currently shown in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderPolicy {
    /// Render every reply as it arrives, even if a newer query is in flight.
    ArrivalOrder,
    /// Render only the reply tagged with the latest dispatched, still-visible
    /// query. Tags are assigned in reply order, so this assumes the backend
    /// answers in query order.
    #[default]
    LatestOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ResultsState {
    #[default]
    Cleared,
    Empty,
    Items(Vec<SearchResult>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    policy: RenderPolicy,
    query: String,
    expanded: bool,
    next_seq: QuerySeq,
    awaiting: Option<QuerySeq>,
    results: ResultsState,
    bridge: BridgeStatus,
    dropped_replies: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RenderPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Sequence number of the query whose reply would currently be rendered.
    pub fn awaiting(&self) -> Option<QuerySeq> {
        self.awaiting
    }

    /// Replies discarded as stale since startup.
    pub fn dropped_replies(&self) -> u64 {
        self.dropped_replies
    }

    pub fn view(&self) -> SearchViewModel {
        let results = match &self.results {
            ResultsState::Cleared => ResultsView::Cleared,
            ResultsState::Empty => ResultsView::Placeholder {
                text: NO_RESULTS_TEXT.to_string(),
            },
            ResultsState::Items(items) => ResultsView::Rows(
                items
                    .iter()
                    .map(|item| ResultRowView {
                        name: item.name.clone(),
                        full_path: item.full_path.clone(),
                    })
                    .collect(),
            ),
        };

        SearchViewModel {
            query: self.query.clone(),
            expanded: self.expanded,
            results,
            bridge: self.bridge,
        }
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(crate) fn collapse(&mut self) {
        self.expanded = false;
        self.awaiting = None;
        self.results = ResultsState::Cleared;
    }

    /// Expands the search box and allocates the tag for the next outbound query.
    pub(crate) fn begin_query(&mut self) -> QuerySeq {
        self.expanded = true;
        self.next_seq += 1;
        self.awaiting = Some(self.next_seq);
        self.next_seq
    }

    pub(crate) fn accepts_reply(&self, seq: Option<QuerySeq>) -> bool {
        match self.policy {
            RenderPolicy::ArrivalOrder => true,
            RenderPolicy::LatestOnly => seq.is_some() && self.awaiting == seq,
        }
    }

    pub(crate) fn record_dropped_reply(&mut self) {
        self.dropped_replies += 1;
    }

    pub(crate) fn set_results(&mut self, results: ResultsState) {
        self.results = results;
    }

    pub(crate) fn set_bridge(&mut self, status: BridgeStatus) {
        self.bridge = status;
    }
}
