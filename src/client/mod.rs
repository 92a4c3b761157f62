//! Client-side transport layer.
//!
//! The agent orchestrator talks to the tool server through the
//! `ToolTransport` trait; two interchangeable variants implement it:
//!
//! - `HttpToolTransport` - one-shot JSON-RPC over HTTP POST
//! - `TcpToolTransport` - persistent line-delimited JSON-RPC with lazy
//!   connection, id correlation, and an optional liveness probe

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod http;
pub mod tcp;
pub mod transport;

pub use config::{ClientConfig, Endpoint};
pub use error::ClientError;
pub use http::HttpToolTransport;
pub use tcp::TcpToolTransport;
pub use transport::{ToolCallRequest, ToolTransport};

/// Build the transport variant selected by the configuration.
pub fn build_transport(config: &ClientConfig) -> Result<Arc<dyn ToolTransport>, ClientError> {
    match &config.endpoint {
        Endpoint::Http { url } => Ok(Arc::new(HttpToolTransport::new(
            url.clone(),
            config.call_timeout,
        )?)),
        Endpoint::Tcp { host, port } => Ok(Arc::new(TcpToolTransport::new(
            host.clone(),
            *port,
            config.call_timeout,
            config.probe_interval,
        ))),
    }
}
