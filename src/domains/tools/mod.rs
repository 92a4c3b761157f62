//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `pipeline.rs` - Routing pipeline: observability hooks and fault isolation
//! - `router.rs` - ToolRouter builder for the STDIO transport
//! - `registry.rs` - Central tool registry and JSON-RPC dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, execute(), and rpc_handler()
//! 3. Export in `definitions/mod.rs`
//! 4. Add route in `router.rs` using `with_route()`
//! 5. Register in `registry.rs` for TCP/HTTP support

pub mod definitions;
mod error;
pub mod pipeline;
mod registry;
pub mod router;

pub use error::ToolError;
pub use pipeline::ToolOutcome;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
