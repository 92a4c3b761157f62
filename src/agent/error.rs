//! Agent-side error types.

use thiserror::Error;

use crate::agent::model::ModelError;
use crate::client::ClientError;

/// Errors that terminate an agent invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The tool reported an error outcome. The tool's message is carried
    /// here instead of being passed off as a legitimate answer.
    #[error("Tool call failed: {0}")]
    ToolFailed(String),

    /// The transport could not deliver the call or its outcome.
    #[error(transparent)]
    Transport(#[from] ClientError),

    /// The rewording model failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}
