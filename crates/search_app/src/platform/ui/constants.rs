use crate::platform::dom::ElementId;

pub const SEARCH_BOX_CONTAINER: ElementId = ElementId::new("search-box-container");
pub const SEARCH_BAR: ElementId = ElementId::new("search-bar");
pub const SEARCH_RESULTS: ElementId = ElementId::new("search-results");
pub const SEARCH_STATUS: ElementId = ElementId::new("search-status");

/// Set on the container while the query is non-empty.
pub const CLASS_EXPANDED: &str = "expanded";
pub const CLASS_RESULT: &str = "result";
pub const CLASS_NO_RESULTS: &str = "no-results";
