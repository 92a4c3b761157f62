//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry is the adapter surface for the TCP/HTTP JSON-RPC transports:
//! it maps tool names to handlers and exposes tool metadata for listing.
//! The STDIO transport uses the rmcp router built in `router.rs` instead;
//! both must advertise the same tools.

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::warn;

use crate::core::config::Config;

use super::definitions::CountEsTool;
use super::error::ToolError;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![CountEsTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![CountEsTool::to_tool()]
    }

    /// Dispatch a JSON-RPC tool call to the appropriate handler.
    ///
    /// An unknown tool name is the only hard error here; validation and
    /// execution failures are reported inside the returned payload as
    /// `isError: true`, so the caller always gets exactly one outcome.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            CountEsTool::NAME => Ok(CountEsTool::rpc_handler(arguments, self.config.clone())),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
