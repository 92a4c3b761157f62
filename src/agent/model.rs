//! Chat-model abstraction.
//!
//! The inference engine is an external collaborator; the orchestrator only
//! needs a text-completion seam. `TemplateChatModel` is the deterministic
//! stand-in used for local wiring and tests.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors from a chat-model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend failed to produce a completion.
    #[error("Model backend error: {0}")]
    Backend(String),
}

/// Text-completion capability consumed by the orchestrator.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Complete `prompt` under the given system directive.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ModelError>;
}

/// Deterministic model that rewords a tool result through a fixed template.
///
/// `{result}` in the template is replaced with the prompt text.
pub struct TemplateChatModel {
    template: String,
}

impl TemplateChatModel {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Default for TemplateChatModel {
    fn default() -> Self {
        Self::new("There are {result} matching letters in the provided word.")
    }
}

#[async_trait]
impl ChatModel for TemplateChatModel {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ModelError> {
        debug!(system, prompt, "Template completion");
        Ok(self.template.replace("{result}", prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_template_substitution() {
        let model = TemplateChatModel::default();
        let answer = model.complete("directive", "2").await.unwrap();
        assert!(answer.contains("2"));
        assert!(!answer.contains("{result}"));
    }

    #[tokio::test]
    async fn test_custom_template() {
        let model = TemplateChatModel::new("count={result}");
        let answer = model.complete("directive", "7").await.unwrap();
        assert_eq!(answer, "count=7");
    }
}
