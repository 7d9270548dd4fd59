// Generate RAG Node
// Terminal node: answer the original question from assembled context

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{AnswerMode, RagState};
use crate::rag::context_builder::{AssemblerConfig, ContextAssembler, ScoreDisplay};

pub struct GenerateRagNode;

impl GenerateRagNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GenerateRagNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for GenerateRagNode {
    fn id(&self) -> &'static str {
        "generate_rag"
    }

    fn name(&self) -> &'static str {
        "RAG Generation"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let assembler = ContextAssembler::new(AssemblerConfig {
            preview_chars: 200,
            max_sources: ctx.settings.max_sources,
            score_display: ScoreDisplay::Relevance,
        });
        let assembled = assembler.assemble(&state.relevant);

        // Always answer the original question, even after a rewrite
        let answer = ctx
            .llm
            .generate_with_context(&state.query, &assembled.context, &state.chat_history)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        state.answer = answer;
        state.sources = assembled.sources;
        state.final_mode = AnswerMode::Rag;
        Ok(NodeOutput::Final)
    }
}
