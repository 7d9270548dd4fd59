// Generate General Node
// Terminal node: answer from general knowledge, no document context

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{AnswerMode, RagState};

pub struct GenerateGeneralNode;

impl GenerateGeneralNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenerateGeneralNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for GenerateGeneralNode {
    fn id(&self) -> &'static str {
        "generate_general"
    }

    fn name(&self) -> &'static str {
        "General Generation"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let answer = ctx
            .llm
            .generate_general(&state.query, &state.chat_history)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        state.answer = answer;
        state.sources.clear();
        state.final_mode = AnswerMode::General;
        Ok(NodeOutput::Final)
    }
}
