//! Client-side tool transport abstraction.
//!
//! The agent issues tool calls through `ToolTransport` without caring which
//! wire variant carries them. Both variants return exactly one
//! `ToolOutcome` per request; wire-level faults surface as `ClientError`
//! instead.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use crate::core::transport::rpc::JsonRpcResponse;
use crate::domains::tools::ToolOutcome;

use super::error::ClientError;

/// A single request to invoke a named tool with concrete arguments.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallRequest {
    /// Tool name as registered on the server.
    pub tool: String,

    /// Arguments, dynamically typed at the protocol boundary.
    pub arguments: serde_json::Value,
}

impl ToolCallRequest {
    pub fn new(tool: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }

    /// The `tools/call` params payload for this request.
    pub fn params(&self) -> serde_json::Value {
        json!({
            "name": self.tool,
            "arguments": self.arguments,
        })
    }
}

/// Transport-agnostic tool invocation.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Send one tool call and wait (bounded) for its outcome.
    ///
    /// Connection establishment is lazy and idempotent; callers never
    /// connect explicitly.
    async fn call(&self, request: &ToolCallRequest) -> Result<ToolOutcome, ClientError>;

    /// Tear down any live connection. Default is a no-op for one-shot
    /// transports.
    async fn close(&self) {}
}

/// Map a JSON-RPC response to a tool outcome.
///
/// A JSON-RPC level error (unknown tool, malformed params) is still an
/// outcome from the caller's point of view; only a response that fits
/// neither shape is a protocol fault.
pub(crate) fn outcome_from_response(response: JsonRpcResponse) -> Result<ToolOutcome, ClientError> {
    if let Some(error) = response.error {
        return Ok(ToolOutcome::Error {
            message: error.message,
        });
    }

    let result = response
        .result
        .ok_or_else(|| ClientError::protocol("response carried neither result nor error"))?;

    let is_error = result
        .get("isError")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let text = result
        .get("content")
        .and_then(|c| c.as_array())
        .and_then(|items| items.first())
        .and_then(|item| item.get("text"))
        .and_then(|t| t.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(if is_error {
        ToolOutcome::Error { message: text }
    } else {
        ToolOutcome::Success { content: text }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_shape() {
        let request = ToolCallRequest::new("countEs", json!({ "word": "tree" }));
        let params = request.params();
        assert_eq!(params["name"], "countEs");
        assert_eq!(params["arguments"]["word"], "tree");
    }

    #[test]
    fn test_outcome_from_success_response() {
        let response = JsonRpcResponse::success(
            Some(json!(1)),
            json!({ "content": [{ "type": "text", "text": "2" }], "isError": false }),
        );
        let outcome = outcome_from_response(response).unwrap();
        assert_eq!(
            outcome,
            ToolOutcome::Success {
                content: "2".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_from_error_result() {
        let response = JsonRpcResponse::success(
            Some(json!(1)),
            json!({ "content": [{ "type": "text", "text": "bad word" }], "isError": true }),
        );
        let outcome = outcome_from_response(response).unwrap();
        assert!(outcome.is_error());
    }

    #[test]
    fn test_outcome_from_rpc_error() {
        let response = JsonRpcResponse::invalid_params(Some(json!(1)), "Unknown tool: nope");
        let outcome = outcome_from_response(response).unwrap();
        match outcome {
            ToolOutcome::Error { message } => assert!(message.contains("nope")),
            other => panic!("Expected error outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_from_empty_response_is_protocol_fault() {
        let response = JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            result: None,
            error: None,
        };
        assert!(outcome_from_response(response).is_err());
    }
}
