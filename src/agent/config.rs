//! Agent configuration.
//!
//! Populated from environment variables prefixed with `AGENT_`, mirroring
//! how the server side reads its `MCP_` variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::config::DEFAULT_PROBE_INTERVAL;
use crate::client::ClientConfig;

/// System directive under which every invocation runs.
pub const DEFAULT_DIRECTIVE: &str =
    "Count the number of letter 'e's in the provided word. Limit your response just the number.";

/// Full configuration for the agent binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// How the agent reaches the tool server.
    pub client: ClientConfig,

    /// How the tool result becomes the final answer.
    pub finalize: FinalizePolicy,

    /// HTTP facade bind settings.
    pub facade: FacadeConfig,

    /// System directive passed to the orchestrator.
    pub directive: String,

    /// Log level filter (e.g., "info", "debug", "trace").
    pub log_level: String,
}

/// Finalization policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalizePolicy {
    /// The tool result is the answer.
    Verbatim,

    /// The tool result is reworded by the chat model.
    Reword,
}

/// Bind settings for the HTTP facade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacadeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
        }
    }
}

impl FacadeConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::tcp("127.0.0.1", 3000),
            finalize: FinalizePolicy::Verbatim,
            facade: FacadeConfig::default(),
            directive: DEFAULT_DIRECTIVE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from environment variables.
    ///
    /// - `AGENT_ENDPOINT`: "tcp" (default) or "http"
    /// - `AGENT_TCP_HOST` / `AGENT_TCP_PORT`: persistent variant address
    /// - `AGENT_HTTP_URL`: one-shot variant endpoint
    /// - `AGENT_CALL_TIMEOUT_SECS`: bounded wait per tool call
    /// - `AGENT_PROBE_INTERVAL_SECS`: enable the liveness probe ("0" keeps
    ///   it disabled, any other value overrides the 300s default)
    /// - `AGENT_FINALIZE`: "verbatim" (default) or "reword"
    /// - `AGENT_FACADE_HOST` / `AGENT_FACADE_PORT`: facade bind address
    /// - `AGENT_DIRECTIVE`, `AGENT_LOG_LEVEL`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let endpoint = std::env::var("AGENT_ENDPOINT").unwrap_or_else(|_| "tcp".to_string());
        config.client = match endpoint.to_lowercase().as_str() {
            "http" => {
                let url = std::env::var("AGENT_HTTP_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8080/mcp".to_string());
                ClientConfig::http(url)
            }
            "tcp" => {
                let host =
                    std::env::var("AGENT_TCP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
                let port = std::env::var("AGENT_TCP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000);
                ClientConfig::tcp(host, port)
            }
            other => {
                warn!("Unknown AGENT_ENDPOINT '{}', using tcp", other);
                ClientConfig::tcp("127.0.0.1", 3000)
            }
        };

        if let Ok(secs) = std::env::var("AGENT_CALL_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.client.call_timeout = Duration::from_secs(secs),
                _ => warn!("AGENT_CALL_TIMEOUT_SECS must be a positive integer, keeping default"),
            }
        }

        if let Ok(secs) = std::env::var("AGENT_PROBE_INTERVAL_SECS") {
            config.client.probe_interval = match secs.parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    warn!(
                        "AGENT_PROBE_INTERVAL_SECS must be an integer, using {}s",
                        DEFAULT_PROBE_INTERVAL.as_secs()
                    );
                    Some(DEFAULT_PROBE_INTERVAL)
                }
            };
        }

        if let Ok(policy) = std::env::var("AGENT_FINALIZE") {
            config.finalize = match policy.to_lowercase().as_str() {
                "reword" => FinalizePolicy::Reword,
                "verbatim" => FinalizePolicy::Verbatim,
                other => {
                    warn!("Unknown AGENT_FINALIZE '{}', using verbatim", other);
                    FinalizePolicy::Verbatim
                }
            };
        }

        if let Ok(host) = std::env::var("AGENT_FACADE_HOST") {
            config.facade.host = host;
        }
        if let Ok(port) = std::env::var("AGENT_FACADE_PORT") {
            match port.parse() {
                Ok(port) => config.facade.port = port,
                Err(_) => warn!("AGENT_FACADE_PORT must be a port number, keeping default"),
            }
        }

        if let Ok(directive) = std::env::var("AGENT_DIRECTIVE") {
            config.directive = directive;
        }
        if let Ok(level) = std::env::var("AGENT_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Endpoint;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.finalize, FinalizePolicy::Verbatim);
        assert_eq!(config.facade.address(), "127.0.0.1:8081");
        assert!(config.directive.contains("letter 'e'"));
    }

    #[test]
    fn test_http_endpoint_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("AGENT_ENDPOINT", "http");
            std::env::set_var("AGENT_HTTP_URL", "http://localhost:9999/mcp");
        }
        let config = AgentConfig::from_env();
        match &config.client.endpoint {
            Endpoint::Http { url } => assert_eq!(url, "http://localhost:9999/mcp"),
            other => panic!("Expected http endpoint, got {:?}", other),
        }
        unsafe {
            std::env::remove_var("AGENT_ENDPOINT");
            std::env::remove_var("AGENT_HTTP_URL");
        }
    }

    #[test]
    fn test_probe_interval_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("AGENT_PROBE_INTERVAL_SECS", "60");
        }
        let config = AgentConfig::from_env();
        assert_eq!(
            config.client.probe_interval,
            Some(Duration::from_secs(60))
        );
        unsafe {
            std::env::remove_var("AGENT_PROBE_INTERVAL_SECS");
        }
    }

    #[test]
    fn test_finalize_policy_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("AGENT_FINALIZE", "reword");
        }
        let config = AgentConfig::from_env();
        assert_eq!(config.finalize, FinalizePolicy::Reword);
        unsafe {
            std::env::remove_var("AGENT_FINALIZE");
        }
    }
}
