use std::sync::{mpsc, Arc, Mutex};

use search_bridge::{
    Backend, BackendCommand, BridgeError, BridgeEvent, BridgeHandle, EventSink, ProcessBackend,
    Reply,
};
use search_core::{BridgeStatus, Effect, Msg, Payload, SearchResult};
use search_logging::{search_info, search_warn};

pub struct EffectRunner {
    bridge: BridgeHandle,
}

impl EffectRunner {
    pub fn new(command: BackendCommand, msg_tx: mpsc::Sender<Msg>) -> Result<Self, BridgeError> {
        search_info!("Starting backend {:?} {:?}", command.program, command.args);
        Self::with_backend(Arc::new(ProcessBackend::new(command)), msg_tx)
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Result<Self, BridgeError> {
        let sink = Arc::new(MsgSink {
            tx: Mutex::new(msg_tx),
        });
        let bridge = BridgeHandle::new(backend, sink)?;
        Ok(Self { bridge })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendQuery { seq, query } => {
                    search_info!("SendQuery seq={} query_len={}", seq, query.len());
                    self.bridge.send_query(seq, query);
                }
            }
        }
    }
}

/// Turns bridge events into UI messages.
struct MsgSink {
    tx: Mutex<mpsc::Sender<Msg>>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: BridgeEvent) {
        let msg = map_event(event);
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(msg);
        }
    }
}

fn map_event(event: BridgeEvent) -> Msg {
    match event {
        BridgeEvent::Connected => Msg::BridgeStatus(BridgeStatus::Connected),
        BridgeEvent::Disconnected { reason } => {
            search_warn!("Backend unavailable: {}", reason);
            Msg::BridgeStatus(BridgeStatus::Disconnected)
        }
        BridgeEvent::Reply { seq, reply } => {
            search_info!("Reply seq={:?} items={}", seq, reply.len());
            Msg::ResultsReceived {
                seq,
                payload: map_reply(reply),
            }
        }
    }
}

fn map_reply(reply: Reply) -> Payload {
    match reply {
        Reply::Falsy => Payload::Missing,
        Reply::Unexpected => {
            search_warn!("Reply is neither falsy nor a result list");
            Payload::Malformed
        }
        Reply::Records(records) => Payload::Records(
            records
                .into_iter()
                .map(|record| SearchResult::new(record.name, record.full_path))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use search_bridge::{Connection, ResultRecord};
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    use super::*;

    #[test]
    fn replies_map_to_payloads() {
        assert_eq!(map_reply(Reply::Falsy), Payload::Missing);
        assert_eq!(map_reply(Reply::Unexpected), Payload::Malformed);
        assert_eq!(
            map_reply(Reply::Records(vec![ResultRecord {
                name: "foo.txt".to_string(),
                full_path: "/a/foo.txt".to_string(),
            }])),
            Payload::Records(vec![SearchResult::new("foo.txt", "/a/foo.txt")])
        );
    }

    #[test]
    fn bridge_lifecycle_maps_to_status() {
        assert_eq!(
            map_event(BridgeEvent::Connected),
            Msg::BridgeStatus(BridgeStatus::Connected)
        );
        assert_eq!(
            map_event(BridgeEvent::Disconnected {
                reason: "gone".to_string()
            }),
            Msg::BridgeStatus(BridgeStatus::Disconnected)
        );
    }

    /// Replies `[]` to every query.
    struct EmptyBackend;

    #[async_trait::async_trait]
    impl Backend for EmptyBackend {
        async fn connect(&self) -> Result<Connection, BridgeError> {
            let (client_out, server_in) = tokio::io::duplex(1024);
            let (mut server_out, client_in) = tokio::io::duplex(1024);
            tokio::spawn(async move {
                let mut lines = BufReader::new(server_in).lines();
                while let Ok(Some(_)) = lines.next_line().await {
                    if server_out.write_all(b"[]\n").await.is_err() {
                        break;
                    }
                }
            });
            Ok(Connection::new(client_out, client_in))
        }
    }

    #[test]
    fn send_query_effect_round_trips_to_a_message() {
        let (msg_tx, msg_rx) = mpsc::channel();
        let runner = EffectRunner::with_backend(Arc::new(EmptyBackend), msg_tx).unwrap();
        runner.enqueue(vec![Effect::SendQuery {
            seq: 4,
            query: "foo".to_string(),
        }]);

        let timeout = Duration::from_secs(5);
        assert_eq!(
            msg_rx.recv_timeout(timeout).unwrap(),
            Msg::BridgeStatus(BridgeStatus::Connected)
        );
        assert_eq!(
            msg_rx.recv_timeout(timeout).unwrap(),
            Msg::ResultsReceived {
                seq: Some(4),
                payload: Payload::Records(Vec::new()),
            }
        );
    }
}
