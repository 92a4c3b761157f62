//! Client transport error types.
//!
//! These are wire-level failures, distinct from a domain `Error` outcome:
//! a tool that answers "isError: true" produced an outcome; a connection
//! that never answered produced one of these.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur in the client-side transports.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to establish a connection to the tool server.
    #[error("Failed to connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// No response arrived within the bounded wait.
    #[error("Tool call timed out after {0:?}")]
    Timeout(Duration),

    /// The connection closed before a response arrived.
    #[error("Connection closed before a response arrived")]
    ConnectionClosed,

    /// HTTP request failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO failure on an established connection.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer sent something that is not valid for the dialect.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl ClientError {
    /// Create a connect error.
    pub fn connect(endpoint: impl Into<String>, source: std::io::Error) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create a protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }
}
