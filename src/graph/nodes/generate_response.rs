// Generate Response Node
// Terminal node of the conversation workflow, branching purely on intent

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{AnswerMode, ConversationState, Intent};
use crate::llm::prompts::{GREETING_SYSTEM_PROMPT, HELP_SYSTEM_PROMPT};

pub struct GenerateResponseNode;

impl GenerateResponseNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenerateResponseNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<ConversationState> for GenerateResponseNode {
    fn id(&self) -> &'static str {
        "generate_response"
    }

    fn name(&self) -> &'static str {
        "Response Generation"
    }

    async fn execute(
        &self,
        state: &mut ConversationState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let map_err = |e: crate::core::errors::AgentError| GraphError::new(self.id(), e.to_string());

        let (response, final_mode) = match state.intent {
            Intent::Greeting => {
                let text = ctx
                    .llm
                    .generate(&state.query, Some(GREETING_SYSTEM_PROMPT))
                    .await
                    .map_err(map_err)?;
                (text, AnswerMode::General)
            }
            Intent::Help => {
                let text = ctx
                    .llm
                    .generate(&state.query, Some(HELP_SYSTEM_PROMPT))
                    .await
                    .map_err(map_err)?;
                (text, AnswerMode::General)
            }
            Intent::DocumentQuery if !state.context.is_empty() => {
                let text = ctx
                    .llm
                    .generate_with_context(&state.query, &state.context, &state.chat_history)
                    .await
                    .map_err(map_err)?;
                (text, AnswerMode::Rag)
            }
            // Document query without usable context falls back to plain generation
            _ => {
                let text = ctx
                    .llm
                    .generate_general(&state.query, &state.chat_history)
                    .await
                    .map_err(map_err)?;
                (text, AnswerMode::General)
            }
        };

        state.response = response;
        state.final_mode = final_mode;
        Ok(NodeOutput::Final)
    }
}
