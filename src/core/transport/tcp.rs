//! TCP transport implementation.
//!
//! Persistent socket transport carrying line-delimited JSON-RPC messages.
//! Each accepted connection gets its own task; responses are written back on
//! the same connection, correlated by the request id, so a client may keep
//! several calls in flight at once.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::rpc::{self, JsonRpcRequest, JsonRpcResponse};
use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        Self::serve(listener, server).await
    }

    /// Accept connections on an already-bound listener.
    pub async fn serve(listener: TcpListener, server: McpServer) -> TransportResult<()> {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);

                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                    }

                    let server_clone = server.clone();
                    tokio::spawn(async move {
                        if let Err(e) = Self::handle_connection(server_clone, stream).await {
                            warn!("Error while serving client {}: {}", peer_addr, e);
                        } else {
                            info!("Client {} disconnected cleanly", peer_addr);
                        }
                    });
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Avoid spinning on persistent accept errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Handle a single TCP connection until the peer hangs up.
    async fn handle_connection(server: McpServer, stream: TcpStream) -> TransportResult<()> {
        let (read_half, mut write_half) = stream.into_split();
        let mut lines = BufReader::new(read_half).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => rpc::process_request(&server, request),
                Err(e) => {
                    warn!("Unparseable frame: {}", e);
                    JsonRpcResponse::parse_error(None)
                }
            };

            let mut payload = serde_json::to_string(&response)?;
            payload.push('\n');
            write_half.write_all(payload.as_bytes()).await?;
        }

        Ok(())
    }
}
