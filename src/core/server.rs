//! MCP Server implementation and lifecycle management.
//!
//! The main server handler implements the MCP protocol by delegating to the
//! tools domain. Tools are defined in `domains/tools/definitions/` with one
//! file per tool; the ToolRouter for STDIO is built dynamically in
//! `domains/tools/router.rs`, and the ToolRegistry dispatches calls for the
//! TCP/HTTP JSON-RPC transports. Adding a new tool does not require
//! modifying this file.

use std::sync::Arc;

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};

use super::config::Config;
use crate::domains::tools::{ToolError, ToolRegistry, build_tool_router};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls over STDIO.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            tool_router: build_tool_router::<Self>(config.clone()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // JSON-RPC Transport Support Methods (TCP and HTTP)
    // ========================================================================

    /// List all available tools as JSON metadata.
    ///
    /// Reads the ToolRegistry, the same source that dispatches `tools/call`
    /// on these transports, so listing and dispatch cannot drift.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name.
    ///
    /// Dispatches through the ToolRegistry. Validation and execution
    /// failures are reported inside the returned payload; only an unknown
    /// tool name is an `Err`.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.config.clone());
        registry.call_tool(name, arguments)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Letter-counting MCP server. Exposes the countEs tool, which counts \
                 occurrences of the letter 'e' in a word."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tools() {
        let server = McpServer::new(Config::default());
        let tools = server.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], serde_json::json!("countEs"));
        assert!(tools[0]["inputSchema"].is_object());
    }

    #[test]
    fn test_call_tool_round_trip() {
        let server = McpServer::new(Config::default());
        let result = server
            .call_tool("countEs", serde_json::json!({ "word": "splendiferous" }))
            .unwrap();
        assert_eq!(result["isError"], serde_json::json!(false));
        assert_eq!(result["content"][0]["text"], serde_json::json!("2"));
    }

    #[test]
    fn test_call_tool_unknown() {
        let server = McpServer::new(Config::default());
        assert!(server.call_tool("nope", serde_json::json!({})).is_err());
    }
}
