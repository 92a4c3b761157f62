//! Server entry point.
//!
//! Initializes logging, loads configuration, and starts the tool server on
//! the configured transport.

use anyhow::Result;
use tracing::info;

use lettercount_mcp::core::{logging, Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    logging::init(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // Create the tool server
    let server = McpServer::new(config.clone());

    info!("Server initialized");

    // Create and run the transport service
    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}
