//! Tool routing pipeline.
//!
//! Every tool request passes through `dispatch`, which records the inbound
//! payload, runs the tool body under a panic boundary, and records the
//! outcome. A panic inside a tool must never tear down the serving
//! connection; it is converted into an `Error` outcome with a generic
//! message, while the full detail stays in the server log.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rmcp::model::{CallToolResult, Content};
use serde_json::json;
use tracing::{error, info};

/// Result of a single tool request. Exactly one outcome is produced per
/// request; failures are values, never panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool ran to completion.
    Success { content: String },

    /// Validation or execution failed.
    Error { message: String },
}

impl ToolOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The textual payload, regardless of variant.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { content } => content,
            Self::Error { message } => message,
        }
    }

    /// Convert into the rmcp result type for the STDIO transport.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success { content } => CallToolResult::success(vec![Content::text(content)]),
            Self::Error { message } => CallToolResult::error(vec![Content::text(message)]),
        }
    }

    /// JSON payload for the `tools/call` result on the TCP/HTTP transports.
    ///
    /// The shape matches what rmcp produces for `CallToolResult`, so clients
    /// see one dialect no matter which transport served them.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "content": [{ "type": "text", "text": self.text() }],
            "isError": self.is_error(),
        })
    }
}

/// Run one tool request through the pipeline.
///
/// `execute` is the tool's capability function. It is expected to be total;
/// a panic out of it is a programming error and is contained here.
pub fn dispatch<F>(tool: &str, payload: &str, execute: F) -> ToolOutcome
where
    F: FnOnce() -> String,
{
    info!(tool, payload, "Tool request received");

    let outcome = match panic::catch_unwind(AssertUnwindSafe(execute)) {
        Ok(content) => ToolOutcome::Success { content },
        Err(cause) => {
            error!(tool, "Tool execution panicked: {}", panic_message(&cause));
            ToolOutcome::Error {
                message: "Tool execution failed".to_string(),
            }
        }
    };

    match &outcome {
        ToolOutcome::Success { content } => info!(tool, result = %content, "Tool request completed"),
        ToolOutcome::Error { message } => info!(tool, error = %message, "Tool request failed"),
    }

    outcome
}

/// Best-effort extraction of a panic payload for the server-side log.
fn panic_message(cause: &Box<dyn Any + Send>) -> String {
    if let Some(msg) = cause.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = cause.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_success() {
        let outcome = dispatch("echo", "hello", || "hello".to_string());
        assert_eq!(
            outcome,
            ToolOutcome::Success {
                content: "hello".to_string()
            }
        );
        assert!(!outcome.is_error());
    }

    #[test]
    fn test_dispatch_contains_panic() {
        let outcome = dispatch("boom", "payload", || panic!("internal detail"));
        match outcome {
            ToolOutcome::Error { message } => {
                // Generic message only - no internal detail leaks to the caller.
                assert_eq!(message, "Tool execution failed");
                assert!(!message.contains("internal detail"));
            }
            other => panic!("Expected error outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_outcome_json_shape() {
        let success = ToolOutcome::Success {
            content: "2".to_string(),
        };
        let value = success.to_json();
        assert_eq!(value["isError"], serde_json::json!(false));
        assert_eq!(value["content"][0]["text"], serde_json::json!("2"));

        let error = ToolOutcome::Error {
            message: "bad input".to_string(),
        };
        let value = error.to_json();
        assert_eq!(value["isError"], serde_json::json!(true));
        assert_eq!(value["content"][0]["text"], serde_json::json!("bad input"));
    }

    #[test]
    fn test_outcome_into_call_result() {
        let result = ToolOutcome::Success {
            content: "3".to_string(),
        }
        .into_call_result();
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let result = ToolOutcome::Error {
            message: "nope".to_string(),
        }
        .into_call_result();
        assert!(result.is_error.unwrap_or(false));
    }
}
