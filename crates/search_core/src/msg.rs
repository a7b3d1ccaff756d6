#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A key was released in the search bar; carries the bar's current value.
    SearchInput(String),
    /// Backend reply for the query tagged `seq`; `None` if it answered nothing we sent.
    ResultsReceived {
        seq: Option<crate::QuerySeq>,
        payload: crate::Payload,
    },
    /// Backend channel came up or went away.
    BridgeStatus(crate::BridgeStatus),
}
