/// One matched item as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResult {
    pub name: String,
    pub full_path: String,
}

impl SearchResult {
    pub fn new(name: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
        }
    }
}

/// Inbound message body, already decoded from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Falsy reply (`null`, `false`, `0`, `""`).
    Missing,
    /// Ordered result list; may be empty.
    Records(Vec<SearchResult>),
    /// Truthy but not a list.
    Malformed,
}

impl Payload {
    /// True when the reply should render as the "no results" placeholder.
    pub fn is_empty_state(&self) -> bool {
        match self {
            Payload::Missing | Payload::Malformed => true,
            Payload::Records(records) => records.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Records(records) => records.len(),
            Payload::Missing | Payload::Malformed => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
