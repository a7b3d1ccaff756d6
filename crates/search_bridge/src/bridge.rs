use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;

use search_logging::{search_debug, search_info, search_warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::codec::{decode_reply, encode_query};
use crate::{Backend, BridgeError, BridgeEvent, QuerySeq, Reply};

/// Receives bridge events on the bridge thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BridgeEvent);
}

enum BridgeCommand {
    Query { seq: QuerySeq, query: String },
}

/// UI-side handle. Dropping it closes the channel and stops the backend.
pub struct BridgeHandle {
    cmd_tx: mpsc::UnboundedSender<BridgeCommand>,
}

impl BridgeHandle {
    pub fn new(backend: Arc<dyn Backend>, sink: Arc<dyn EventSink>) -> Result<Self, BridgeError> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("search-bridge".to_string())
            .spawn(move || {
                runtime.block_on(run_bridge(backend, cmd_rx, sink));
            })?;

        Ok(Self { cmd_tx })
    }

    /// Queue a query for the backend. Fire-and-forget.
    pub fn send_query(&self, seq: QuerySeq, query: impl Into<String>) {
        if self
            .cmd_tx
            .send(BridgeCommand::Query {
                seq,
                query: query.into(),
            })
            .is_err()
        {
            search_warn!("Bridge thread is gone; query seq={} dropped", seq);
        }
    }
}

type PendingQueue = Arc<Mutex<VecDeque<QuerySeq>>>;

async fn run_bridge(
    backend: Arc<dyn Backend>,
    mut cmd_rx: mpsc::UnboundedReceiver<BridgeCommand>,
    sink: Arc<dyn EventSink>,
) {
    let connection = match backend.connect().await {
        Ok(connection) => connection,
        Err(err) => {
            search_warn!("Backend connection failed: {}", err);
            sink.emit(BridgeEvent::Disconnected {
                reason: err.to_string(),
            });
            drain_disconnected(&mut cmd_rx).await;
            return;
        }
    };
    search_info!("Backend connected");
    sink.emit(BridgeEvent::Connected);

    // Held until the bridge exits; dropping it kills the backend process.
    let (mut writer, reader, _child) = connection.into_parts();
    let pending: PendingQueue = Arc::default();
    let mut reader_task = tokio::spawn(read_replies(reader, pending.clone(), sink.clone()));

    loop {
        tokio::select! {
            command = cmd_rx.recv() => {
                let Some(BridgeCommand::Query { seq, query }) = command else {
                    search_debug!("Bridge handle dropped; closing backend channel");
                    reader_task.abort();
                    return;
                };
                if let Err(err) = write_query(writer.as_mut(), &pending, seq, &query).await {
                    search_warn!("Failed to send query seq={}: {}", seq, err);
                    reader_task.abort();
                    sink.emit(BridgeEvent::Disconnected {
                        reason: err.to_string(),
                    });
                    break;
                }
            }
            reason = &mut reader_task => {
                let reason = reason.unwrap_or_else(|err| format!("reader task failed: {err}"));
                search_warn!("Backend disconnected: {}", reason);
                sink.emit(BridgeEvent::Disconnected { reason });
                break;
            }
        }
    }

    drain_disconnected(&mut cmd_rx).await;
}

async fn write_query(
    writer: &mut (dyn tokio::io::AsyncWrite + Send + Unpin),
    pending: &PendingQueue,
    seq: QuerySeq,
    query: &str,
) -> Result<(), BridgeError> {
    let line = encode_query(query)?;
    // Registered before writing so a fast reply always finds its tag.
    let depth = pending.lock().map_or(0, |mut queue| {
        queue.push_back(seq);
        queue.len()
    });
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    search_debug!(
        "Sent query seq={} len={} unanswered={}",
        seq,
        query.len(),
        depth
    );
    Ok(())
}

/// Reads reply lines until the backend closes its output; returns the reason.
async fn read_replies(
    reader: Box<dyn AsyncRead + Send + Unpin>,
    pending: PendingQueue,
    sink: Arc<dyn EventSink>,
) -> String {
    let mut lines = BufReader::new(reader).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return "backend closed its output".to_string(),
            Err(err) => return format!("failed to read from backend: {err}"),
        };
        if line.trim().is_empty() {
            continue;
        }

        // Tags follow reply order; a backend that answers out of order gets
        // its replies tagged with the wrong queries.
        let (seq, remaining) = pending
            .lock()
            .map_or((None, 0), |mut queue| (queue.pop_front(), queue.len()));
        let reply = match decode_reply(&line) {
            Ok(reply) => reply,
            Err(err) => {
                search_warn!("Undecodable reply for seq={:?}: {}", seq, err);
                Reply::Unexpected
            }
        };
        if seq.is_none() {
            search_debug!("Unsolicited reply with {} records", reply.len());
        }
        search_debug!(
            "Received reply seq={:?} unanswered={}: {:?}",
            seq,
            remaining,
            reply
        );
        sink.emit(BridgeEvent::Reply { seq, reply });
    }
}

async fn drain_disconnected(cmd_rx: &mut mpsc::UnboundedReceiver<BridgeCommand>) {
    while let Some(BridgeCommand::Query { seq, .. }) = cmd_rx.recv().await {
        search_debug!("Backend unavailable; query seq={} dropped", seq);
    }
}
