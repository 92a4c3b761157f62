//! Persistent TCP client transport.
//!
//! A single long-lived connection carries all tool calls issued by one
//! orchestrator. Requests are correlated with responses by numeric id, so
//! several calls may be in flight at once and responses may arrive out of
//! issue order. The connection is established lazily on the first call and
//! re-established transparently after a failure.
//!
//! An optional liveness probe sends `ping` on a fixed interval. Probe
//! failure never fails in-flight calls; it only marks the connection dead
//! so the next call reconnects.

use std::collections::HashMap;
use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, info, warn};

use crate::core::transport::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::domains::tools::ToolOutcome;

use super::error::ClientError;
use super::transport::{ToolCallRequest, ToolTransport, outcome_from_response};

/// Streaming/persistent transport variant over TCP.
pub struct TcpToolTransport {
    addr: String,
    call_timeout: Duration,
    probe_interval: Option<Duration>,
    conn: Mutex<Option<Arc<Connection>>>,
}

/// One live connection: write half, pending-response map, liveness flag.
struct Connection {
    writer: Mutex<OwnedWriteHalf>,
    pending: StdMutex<HashMap<u64, oneshot::Sender<JsonRpcResponse>>>,
    next_id: AtomicU64,
    alive: AtomicBool,
}

impl Connection {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Write one request frame.
    async fn send(&self, request: &JsonRpcRequest) -> Result<(), ClientError> {
        let mut line =
            serde_json::to_string(request).map_err(|e| ClientError::protocol(e.to_string()))?;
        line.push('\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Send a request and wait (bounded) for its correlated response.
    async fn request(
        &self,
        id: u64,
        request: JsonRpcRequest,
        timeout: Duration,
    ) -> Result<JsonRpcResponse, ClientError> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().expect("pending map poisoned").insert(id, tx);

        if let Err(e) = self.send(&request).await {
            self.pending.lock().expect("pending map poisoned").remove(&id);
            return Err(e);
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(response)) => Ok(response),
            // Sender dropped: the reader task ended, i.e. the peer hung up.
            Ok(Err(_)) => Err(ClientError::ConnectionClosed),
            Err(_) => {
                self.pending.lock().expect("pending map poisoned").remove(&id);
                Err(ClientError::Timeout(timeout))
            }
        }
    }
}

impl TcpToolTransport {
    /// Create a transport for the given server address. No connection is
    /// made until the first call.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        call_timeout: Duration,
        probe_interval: Option<Duration>,
    ) -> Self {
        Self {
            addr: format!("{}:{}", host.into(), port),
            call_timeout,
            probe_interval,
            conn: Mutex::new(None),
        }
    }

    /// Establish the connection if there is no live one. Idempotent:
    /// repeated calls against a healthy connection return it unchanged.
    async fn ensure_connected(&self) -> Result<Arc<Connection>, ClientError> {
        let mut guard = self.conn.lock().await;

        if let Some(conn) = guard.as_ref() {
            if conn.is_alive() {
                return Ok(conn.clone());
            }
        }

        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| ClientError::connect(&self.addr, e))?;
        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY for {}: {}", self.addr, e);
        }
        let (read_half, write_half) = stream.into_split();

        let conn = Arc::new(Connection {
            writer: Mutex::new(write_half),
            pending: StdMutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            alive: AtomicBool::new(true),
        });

        // Reader task: demultiplex responses to their waiting callers.
        let reader_conn = conn.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(read_half).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                let response: JsonRpcResponse = match serde_json::from_str(&line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!("Discarding unparseable frame: {}", e);
                        continue;
                    }
                };
                match response.id.as_ref().and_then(|v| v.as_u64()) {
                    Some(id) => {
                        let tx = reader_conn
                            .pending
                            .lock()
                            .expect("pending map poisoned")
                            .remove(&id);
                        if let Some(tx) = tx {
                            let _ = tx.send(response);
                        } else {
                            debug!(id, "Response with no waiting caller");
                        }
                    }
                    // Server push without a correlation id; nothing waits on it.
                    None => debug!("Ignoring uncorrelated server frame"),
                }
            }
            reader_conn.mark_dead();
            // Dropping the senders wakes pending callers with ConnectionClosed.
            reader_conn
                .pending
                .lock()
                .expect("pending map poisoned")
                .clear();
        });

        // Handshake before the connection is handed out.
        let id = conn.next_id();
        let init = JsonRpcRequest::call(
            id,
            "initialize",
            json!({
                "protocolVersion": "2024-11-05",
                "clientInfo": {
                    "name": "lettercount-agent",
                    "version": env!("CARGO_PKG_VERSION")
                }
            }),
        );
        let response = conn.request(id, init, self.call_timeout).await?;
        if let Some(error) = response.error {
            conn.mark_dead();
            return Err(ClientError::protocol(format!(
                "initialize rejected: {}",
                error.message
            )));
        }
        info!(addr = %self.addr, "Connected to tool server");

        if let Some(interval) = self.probe_interval {
            Self::spawn_probe(conn.clone(), interval, self.call_timeout);
        }

        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Periodic liveness probe for an established connection.
    fn spawn_probe(conn: Arc<Connection>, interval: Duration, timeout: Duration) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                if !conn.is_alive() {
                    break;
                }
                let id = conn.next_id();
                let ping = JsonRpcRequest::call(id, "ping", json!({}));
                match conn.request(id, ping, timeout).await {
                    Ok(_) => debug!("Liveness probe ok"),
                    Err(e) => {
                        warn!("Liveness probe failed, marking connection dead: {}", e);
                        conn.mark_dead();
                        break;
                    }
                }
            }
        });
    }
}

#[async_trait]
impl ToolTransport for TcpToolTransport {
    async fn call(&self, request: &ToolCallRequest) -> Result<ToolOutcome, ClientError> {
        let conn = self.ensure_connected().await?;

        let id = conn.next_id();
        let rpc = JsonRpcRequest::call(id, "tools/call", request.params());

        debug!(tool = %request.tool, id, "Sending tool call over TCP");

        match conn.request(id, rpc, self.call_timeout).await {
            Ok(response) => outcome_from_response(response),
            Err(e) => {
                // A wire-level fault invalidates the connection; the next
                // call reconnects. A timeout alone does not.
                if matches!(e, ClientError::Io(_) | ClientError::ConnectionClosed) {
                    conn.mark_dead();
                }
                Err(e)
            }
        }
    }

    async fn close(&self) {
        let mut guard = self.conn.lock().await;
        if let Some(conn) = guard.take() {
            conn.mark_dead();
            info!(addr = %self.addr, "Disconnected from tool server");
        }
    }
}
