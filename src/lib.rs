//! Letter-counting MCP server and tool-mediated agent.
//!
//! The crate ships two halves:
//!
//! - A server exposing the `countEs` tool over STDIO (MCP via rmcp), TCP
//!   (line-delimited JSON-RPC), or HTTP (JSON-RPC over POST).
//! - An agent that invokes the tool through a client transport, finalizes
//!   the answer, and serves it behind a small HTTP facade.

pub mod agent;
pub mod client;
pub mod core;
pub mod domains;

pub use agent::{AgentConfig, LetterCountAgent};
pub use client::{ClientConfig, ToolTransport};
pub use core::{Config, McpServer, TransportService};
