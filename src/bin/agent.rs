//! Agent entry point.
//!
//! Initializes logging, builds the client transport and agent from the
//! environment, and serves the HTTP facade.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use lettercount_mcp::agent::{
    facade, AgentConfig, Finalizer, FinalizePolicy, LetterCountAgent, TemplateChatModel,
};
use lettercount_mcp::client;
use lettercount_mcp::core::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = AgentConfig::from_env();

    // Initialize logging
    logging::init(&config.log_level);

    info!(
        endpoint = %config.client.description(),
        "Starting lettercount-agent"
    );

    let transport = client::build_transport(&config.client)
        .context("Failed to build the client transport")?;

    let finalizer = match config.finalize {
        FinalizePolicy::Verbatim => Finalizer::Verbatim,
        FinalizePolicy::Reword => Finalizer::Reword(Arc::new(TemplateChatModel::default())),
    };

    let agent = Arc::new(LetterCountAgent::new(
        &config.directive,
        finalizer,
        Arc::clone(&transport),
    ));

    let app = facade::router(agent);
    let address = config.facade.address();

    info!("Agent facade listening on http://{}", address);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind facade to {}", address))?;
    axum::serve(listener, app).await?;

    transport.close().await;

    info!("Agent shutting down");

    Ok(())
}
