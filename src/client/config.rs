//! Client transport configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bounded wait for one tool call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Probe interval used when probing is enabled without an explicit value.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(300);

/// Where and how the client reaches the tool server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint and transport variant.
    pub endpoint: Endpoint,

    /// Bounded wait for each tool call.
    #[serde(default = "default_call_timeout")]
    pub call_timeout: Duration,

    /// Liveness probe interval for the persistent variant. `None` disables
    /// probing (the default).
    #[serde(default)]
    pub probe_interval: Option<Duration>,
}

/// Transport variant selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Endpoint {
    /// One-shot JSON-RPC over HTTP POST.
    Http { url: String },

    /// Persistent line-delimited JSON-RPC over TCP.
    Tcp { host: String, port: u16 },
}

fn default_call_timeout() -> Duration {
    DEFAULT_CALL_TIMEOUT
}

impl ClientConfig {
    /// Config for the one-shot HTTP variant.
    pub fn http(url: impl Into<String>) -> Self {
        Self {
            endpoint: Endpoint::Http { url: url.into() },
            call_timeout: DEFAULT_CALL_TIMEOUT,
            probe_interval: None,
        }
    }

    /// Config for the persistent TCP variant.
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self {
            endpoint: Endpoint::Tcp {
                host: host.into(),
                port,
            },
            call_timeout: DEFAULT_CALL_TIMEOUT,
            probe_interval: None,
        }
    }

    /// Get a description of this endpoint for logging.
    pub fn description(&self) -> String {
        match &self.endpoint {
            Endpoint::Http { url } => format!("HTTP {}", url),
            Endpoint::Tcp { host, port } => format!("TCP {}:{}", host, port),
        }
    }
}
