//! Agent orchestrator.
//!
//! One invocation is one short state machine: build the tool call from the
//! user input, send it over the transport, finalize the answer. The
//! directive in this system always implies exactly one call to the
//! letter-counting tool; multi-step planning is out of scope.
//!
//! A tool `Error` outcome terminates the invocation as `AgentError::
//! ToolFailed` rather than being returned as if it were a count. No retries
//! happen at this layer; a transport failure is terminal for the invocation.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::client::{ToolCallRequest, ToolTransport};
use crate::domains::tools::ToolOutcome;
use crate::domains::tools::definitions::CountEsTool;

use super::error::AgentError;
use super::model::ChatModel;
use super::session::AgentSession;

/// How the tool result becomes the final answer.
pub enum Finalizer {
    /// The tool result is the answer, verbatim.
    Verbatim,

    /// The tool result is reworded by a chat model under the directive.
    Reword(Arc<dyn ChatModel>),
}

/// The letter-counting agent.
pub struct LetterCountAgent {
    directive: String,
    finalizer: Finalizer,
    transport: Arc<dyn ToolTransport>,
}

impl LetterCountAgent {
    pub fn new(
        directive: impl Into<String>,
        finalizer: Finalizer,
        transport: Arc<dyn ToolTransport>,
    ) -> Self {
        Self {
            directive: directive.into(),
            finalizer,
            transport,
        }
    }

    /// Run one invocation: word in, final answer out.
    #[instrument(skip(self))]
    pub async fn run(&self, input: &str) -> Result<String, AgentError> {
        let mut session = AgentSession::new(&self.directive, input);

        let request = ToolCallRequest::new(CountEsTool::NAME, json!({ "word": input }));
        session.record_call(request.clone());
        info!(tool = CountEsTool::NAME, "Issuing tool call");

        let outcome = self.transport.call(&request).await?;

        let content = match outcome {
            ToolOutcome::Success { content } => content,
            ToolOutcome::Error { message } => {
                warn!(error = %message, "Tool returned an error outcome");
                return Err(AgentError::ToolFailed(message));
            }
        };

        let answer = match &self.finalizer {
            Finalizer::Verbatim => content,
            Finalizer::Reword(model) => model.complete(&self.directive, &content).await?,
        };

        session.finish(answer.clone());
        info!(answer = %answer, "Final answer produced");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::model::TemplateChatModel;
    use crate::client::ClientError;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Transport stub returning a canned outcome.
    struct StubTransport {
        outcome: ToolOutcome,
    }

    #[async_trait]
    impl ToolTransport for StubTransport {
        async fn call(&self, _request: &ToolCallRequest) -> Result<ToolOutcome, ClientError> {
            Ok(self.outcome.clone())
        }
    }

    /// Transport stub that always fails at the wire level.
    struct DeadTransport;

    #[async_trait]
    impl ToolTransport for DeadTransport {
        async fn call(&self, _request: &ToolCallRequest) -> Result<ToolOutcome, ClientError> {
            Err(ClientError::Timeout(Duration::from_secs(1)))
        }
    }

    fn success_transport(content: &str) -> Arc<dyn ToolTransport> {
        Arc::new(StubTransport {
            outcome: ToolOutcome::Success {
                content: content.to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_verbatim_finalization() {
        let agent = LetterCountAgent::new("directive", Finalizer::Verbatim, success_transport("2"));
        assert_eq!(agent.run("splendiferous").await.unwrap(), "2");
    }

    #[tokio::test]
    async fn test_reword_finalization() {
        let model = Arc::new(TemplateChatModel::new("The count is {result}."));
        let agent = LetterCountAgent::new(
            "directive",
            Finalizer::Reword(model),
            success_transport("2"),
        );
        assert_eq!(agent.run("splendiferous").await.unwrap(), "The count is 2.");
    }

    #[tokio::test]
    async fn test_error_outcome_short_circuits() {
        let transport = Arc::new(StubTransport {
            outcome: ToolOutcome::Error {
                message: "bad word".to_string(),
            },
        });
        let agent = LetterCountAgent::new("directive", Finalizer::Verbatim, transport);
        match agent.run("splendiferous").await {
            Err(AgentError::ToolFailed(message)) => assert_eq!(message, "bad word"),
            other => panic!("Expected ToolFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_terminal() {
        let agent = LetterCountAgent::new("directive", Finalizer::Verbatim, Arc::new(DeadTransport));
        assert!(matches!(
            agent.run("splendiferous").await,
            Err(AgentError::Transport(ClientError::Timeout(_)))
        ));
    }
}
