use crate::BridgeStatus;

/// Text of the single item shown when a reply carries no results.
pub const NO_RESULTS_TEXT: &str = "No results found";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub query: String,
    pub expanded: bool,
    pub results: ResultsView,
    pub bridge: BridgeStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    /// Container emptied; nothing rendered.
    #[default]
    Cleared,
    /// Single placeholder item.
    Placeholder { text: String },
    /// One item per record, in payload order.
    Rows(Vec<ResultRowView>),
}

impl ResultsView {
    /// Number of items the results container will hold once rendered.
    pub fn item_count(&self) -> usize {
        match self {
            ResultsView::Cleared => 0,
            ResultsView::Placeholder { .. } => 1,
            ResultsView::Rows(rows) => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub name: String,
    pub full_path: String,
}
