//! Transport layer for the MCP server.
//!
//! This module provides the server-side transport implementations:
//! - **STDIO**: Standard input/output (default for MCP), served by rmcp
//! - **TCP**: Persistent socket with line-delimited JSON-RPC messages
//! - **HTTP**: One-shot JSON-RPC over POST requests
//!
//! TCP and HTTP share one JSON-RPC dialect (`rpc.rs`); the client-side
//! transports in `crate::client` speak the same dialect, so both variants
//! have identical semantics from the caller's point of view.

mod config;
mod error;
mod service;

pub mod http;
pub mod rpc;
pub mod stdio;
pub mod tcp;

pub use config::{HttpConfig, TcpConfig, TransportConfig};
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
