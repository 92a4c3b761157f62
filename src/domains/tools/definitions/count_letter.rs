//! Letter-counting tool definition.
//!
//! Exposes `countEs`: count case-insensitive occurrences of the configured
//! target letter in a word. The counting function itself is deliberately
//! trivial; the interesting part is the adapter surface around it (schema,
//! validation, routing pipeline, transport handlers).

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{instrument, warn};

use crate::core::config::Config;
use crate::domains::tools::pipeline::{self, ToolOutcome};

use super::super::error::ToolError;

// ============================================================================
// Capability Executor
// ============================================================================

/// Count case-insensitive occurrences of `target` in `word`.
///
/// Total function: any well-formed string yields a count. The count is
/// non-negative and never exceeds the number of characters in `word`.
pub fn count_occurrences(word: &str, target: char) -> usize {
    word.chars()
        .filter(|c| c.to_lowercase().eq(target.to_lowercase()))
        .count()
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the letter-counting tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CountEsParams {
    /// Word to inspect.
    pub word: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Letter-counting tool - counts occurrences of the target letter in a word.
pub struct CountEsTool;

impl CountEsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "countEs";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Count occurrences of letter 'e' in a word";

    /// Run the word through the routing pipeline and return the outcome.
    #[instrument(skip_all, fields(word = %word))]
    fn run(word: &str, config: &Config) -> ToolOutcome {
        let target = config.tools.target_letter;
        let word_owned = word.to_string();
        pipeline::dispatch(Self::NAME, word, move || {
            count_occurrences(&word_owned, target).to_string()
        })
    }

    /// Execute the tool logic (for the STDIO transport via rmcp).
    pub fn execute(params: &CountEsParams, config: &Config) -> CallToolResult {
        Self::run(&params.word, config).into_call_result()
    }

    /// Handler for the TCP/HTTP JSON-RPC transports.
    ///
    /// Arguments are dynamically typed at this boundary; a missing or
    /// non-string `word` is rejected here, before the routing pipeline and
    /// the executor are ever reached.
    pub fn rpc_handler(arguments: serde_json::Value, config: Arc<Config>) -> serde_json::Value {
        match arguments.get("word").and_then(|v| v.as_str()) {
            Some(word) => Self::run(word, &config).to_json(),
            None => {
                warn!("Rejected {} call: 'word' must be a string", Self::NAME);
                ToolOutcome::Error {
                    message: ToolError::invalid_arguments("'word' must be a string").to_string(),
                }
                .to_json()
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CountEsParams>().into(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the STDIO transport.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let result = match serde_json::from_value::<CountEsParams>(
                    serde_json::Value::Object(args),
                ) {
                    Ok(params) => Self::execute(&params, &config),
                    Err(e) => CallToolResult::error(vec![Content::text(
                        ToolError::invalid_arguments(e.to_string()).to_string(),
                    )]),
                };
                Ok::<CallToolResult, McpError>(result)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn test_count_occurrences_basic() {
        assert_eq!(count_occurrences("splendiferous", 'e'), 2);
        assert_eq!(count_occurrences("Eel", 'e'), 2);
    }

    #[test]
    fn test_count_occurrences_empty() {
        assert_eq!(count_occurrences("", 'e'), 0);
    }

    #[test]
    fn test_count_occurrences_no_match() {
        assert_eq!(count_occurrences("rhythm", 'e'), 0);
        assert_eq!(count_occurrences("abba", 'e'), 0);
    }

    #[test]
    fn test_count_occurrences_case_invariant() {
        let word = "Splendiferous";
        let upper = word.to_uppercase();
        let lower = word.to_lowercase();
        assert_eq!(
            count_occurrences(&upper, 'e'),
            count_occurrences(&lower, 'e')
        );
    }

    #[test]
    fn test_count_occurrences_bounded_by_length() {
        for word in ["eeee", "tree", "", "EeEe"] {
            let count = count_occurrences(word, 'e');
            assert!(count <= word.chars().count());
        }
    }

    #[test]
    fn test_execute_returns_count() {
        let params = CountEsParams {
            word: "splendiferous".to_string(),
        };
        let result = CountEsTool::execute(&params, &test_config());
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        assert_eq!(text, "2");
    }

    #[test]
    fn test_rpc_handler_valid_word() {
        let config = Arc::new(test_config());
        let result =
            CountEsTool::rpc_handler(serde_json::json!({ "word": "splendiferous" }), config);
        assert_eq!(result["isError"], serde_json::json!(false));
        assert_eq!(result["content"][0]["text"], serde_json::json!("2"));
    }

    #[test]
    fn test_rpc_handler_wrong_type() {
        let config = Arc::new(test_config());
        let result = CountEsTool::rpc_handler(serde_json::json!({ "word": 1 }), config);
        assert_eq!(result["isError"], serde_json::json!(true));
        let message = result["content"][0]["text"].as_str().unwrap();
        assert!(message.contains("word"));
    }

    #[test]
    fn test_rpc_handler_missing_word() {
        let config = Arc::new(test_config());
        let result = CountEsTool::rpc_handler(serde_json::json!({}), config);
        assert_eq!(result["isError"], serde_json::json!(true));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = CountEsTool::to_tool();
        assert_eq!(tool.name.as_ref(), "countEs");
        assert!(tool.description.is_some());
    }
}
