use std::io;

use thiserror::Error;

use crate::codec::CodecError;

pub type QuerySeq = u64;

/// One record of a reply, with missing or non-text fields already blanked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRecord {
    pub name: String,
    pub full_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `null`, `false`, `0` or `""`.
    Falsy,
    Records(Vec<ResultRecord>),
    /// Anything else, including lines that are not JSON.
    Unexpected,
}

impl Reply {
    pub fn len(&self) -> usize {
        match self {
            Reply::Records(records) => records.len(),
            Reply::Falsy | Reply::Unexpected => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeEvent {
    Connected,
    /// A reply line. `seq` is the oldest unanswered query, or `None` when the
    /// backend spoke without being asked. The wire carries no tag, so this
    /// pairing is only correct for backends that answer in query order.
    Reply {
        seq: Option<QuerySeq>,
        reply: Reply,
    },
    Disconnected {
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to start backend `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("backend {0} was not captured")]
    MissingPipe(&'static str),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
