//! HTTP facade in front of the agent.
//!
//! Two invocation surfaces, both returning the final answer as plain text:
//!
//! - `GET /countEs/{word}` - word in the path
//! - `POST /camel/countEs` - word as the request body (trimmed)
//!
//! Plus `GET /health` for liveness. Transport faults map to gateway status
//! codes so callers can tell "the tool server is down" from "the agent
//! itself broke".

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tracing::{error, info};

use crate::client::ClientError;

use super::error::AgentError;
use super::orchestrator::LetterCountAgent;

/// Shared facade state.
#[derive(Clone)]
pub struct FacadeState {
    pub agent: Arc<LetterCountAgent>,
}

/// Build the facade router.
pub fn router(agent: Arc<LetterCountAgent>) -> Router {
    Router::new()
        .route("/countEs/{word}", get(count_path_handler))
        .route("/camel/countEs", post(count_body_handler))
        .route("/health", get(health_handler))
        .with_state(FacadeState { agent })
}

async fn count_path_handler(
    State(state): State<FacadeState>,
    Path(word): Path<String>,
) -> Response {
    info!(word = %word, "Facade invocation via path");
    run_agent(&state, &word).await
}

async fn count_body_handler(State(state): State<FacadeState>, body: String) -> Response {
    let word = body.trim();
    info!(word = %word, "Facade invocation via body");
    run_agent(&state, word).await
}

async fn health_handler() -> Response {
    axum::Json(json!({ "status": "healthy", "service": "lettercount-agent" })).into_response()
}

async fn run_agent(state: &FacadeState, word: &str) -> Response {
    match state.agent.run(word).await {
        Ok(answer) => (StatusCode::OK, answer).into_response(),
        Err(err) => {
            error!(error = %err, "Agent invocation failed");
            (status_for(&err), err.to_string()).into_response()
        }
    }
}

/// The tool server being unreachable or slow is a gateway condition; a
/// failure inside the agent is a plain internal error.
fn status_for(err: &AgentError) -> StatusCode {
    match err {
        AgentError::Transport(ClientError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        AgentError::Transport(_) => StatusCode::BAD_GATEWAY,
        AgentError::ToolFailed(_) => StatusCode::BAD_GATEWAY,
        AgentError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
