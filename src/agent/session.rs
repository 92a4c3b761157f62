//! Ephemeral per-invocation agent session.
//!
//! One session exists per orchestrator invocation: it records the directive,
//! the user input, the tool calls issued, and at most one final answer.
//! Nothing is persisted across invocations.

use crate::client::ToolCallRequest;

/// Session state for a single agent invocation.
#[derive(Debug, Clone)]
pub struct AgentSession {
    /// Fixed system directive for this invocation.
    pub directive: String,

    /// Raw user input.
    pub input: String,

    tool_calls: Vec<ToolCallRequest>,
    answer: Option<String>,
}

impl AgentSession {
    pub fn new(directive: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            input: input.into(),
            tool_calls: Vec::new(),
            answer: None,
        }
    }

    /// Record an issued tool call. Calls after the final answer are a logic
    /// error and are ignored.
    pub fn record_call(&mut self, call: ToolCallRequest) {
        if self.answer.is_none() {
            self.tool_calls.push(call);
        }
    }

    /// Produce the final answer. Only the first call takes effect: a session
    /// yields at most one answer.
    pub fn finish(&mut self, answer: impl Into<String>) {
        if self.answer.is_none() {
            self.answer = Some(answer.into());
        }
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        &self.tool_calls
    }

    pub fn is_finished(&self) -> bool {
        self.answer.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_records_calls() {
        let mut session = AgentSession::new("directive", "tree");
        session.record_call(ToolCallRequest::new("countEs", json!({ "word": "tree" })));
        assert_eq!(session.tool_calls().len(), 1);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_at_most_one_answer() {
        let mut session = AgentSession::new("directive", "tree");
        session.finish("2");
        session.finish("99");
        assert_eq!(session.answer(), Some("2"));
    }

    #[test]
    fn test_no_calls_after_answer() {
        let mut session = AgentSession::new("directive", "tree");
        session.finish("2");
        session.record_call(ToolCallRequest::new("countEs", json!({ "word": "tree" })));
        assert!(session.tool_calls().is_empty());
    }
}
