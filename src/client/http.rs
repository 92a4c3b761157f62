//! One-shot HTTP client transport.
//!
//! Each tool call is a single JSON-RPC POST; no connection state is held
//! between calls. The request timeout doubles as the bounded wait for the
//! outcome.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::core::transport::rpc::{JsonRpcRequest, JsonRpcResponse};
use crate::domains::tools::ToolOutcome;

use super::error::ClientError;
use super::transport::{ToolCallRequest, ToolTransport, outcome_from_response};

/// Request/response transport variant: one HTTP POST per tool call.
pub struct HttpToolTransport {
    url: String,
    call_timeout: Duration,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpToolTransport {
    /// Create a transport targeting a JSON-RPC endpoint URL.
    pub fn new(url: impl Into<String>, call_timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(call_timeout).build()?;

        Ok(Self {
            url: url.into(),
            call_timeout,
            client,
            next_id: AtomicU64::new(1),
        })
    }
}

#[async_trait]
impl ToolTransport for HttpToolTransport {
    async fn call(&self, request: &ToolCallRequest) -> Result<ToolOutcome, ClientError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let rpc = JsonRpcRequest::call(id, "tools/call", request.params());

        debug!(tool = %request.tool, id, url = %self.url, "Sending tool call over HTTP");

        let response = self
            .client
            .post(&self.url)
            .json(&rpc)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.call_timeout)
                } else {
                    ClientError::Http(e)
                }
            })?;

        let response: JsonRpcResponse = response.json().await?;
        outcome_from_response(response)
    }
}
