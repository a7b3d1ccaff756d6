use crate::QuerySeq;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Forward the raw query to the backend. Fire-and-forget.
    SendQuery { seq: QuerySeq, query: String },
}
