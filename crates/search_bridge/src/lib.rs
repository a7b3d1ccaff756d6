//! Search bridge: the message channel between the UI and the backend process.
mod backend;
mod bridge;
mod codec;
mod types;

pub use backend::{Backend, BackendCommand, Connection, ProcessBackend};
pub use bridge::{BridgeHandle, EventSink};
pub use codec::{decode_reply, encode_query, CodecError};
pub use types::{BridgeError, BridgeEvent, QuerySeq, Reply, ResultRecord};
