use async_trait::async_trait;

use crate::core::errors::AgentError;

use super::types::ChatMessage;

/// Contract for the text-generation collaborator.
///
/// Implementations wrap a concrete provider (Ollama, OpenAI, DeepSeek) and
/// must be safe under concurrent invocation; the workflows hold an
/// `Arc<dyn TextGenerator>` and may run many questions at once. All calls
/// are single-shot and return the full text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Plain generation with an optional system instruction.
    async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AgentError>;

    /// Answer a question grounded in retrieved document context.
    async fn generate_with_context(
        &self,
        question: &str,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<String, AgentError>;

    /// Answer a question from general knowledge, no document context.
    async fn generate_general(
        &self,
        question: &str,
        history: &[ChatMessage],
    ) -> Result<String, AgentError>;
}
