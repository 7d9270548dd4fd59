// Retrieve Context Node
// Fetch and assemble document context for the conversation workflow

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::ConversationState;
use crate::rag::context_builder::{AssemblerConfig, ContextAssembler, ScoreDisplay};
use crate::rag::store::RetrievedFragment;

pub struct RetrieveContextNode;

impl RetrieveContextNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RetrieveContextNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<ConversationState> for RetrieveContextNode {
    fn id(&self) -> &'static str {
        "retrieve_context"
    }

    fn name(&self) -> &'static str {
        "Context Retrieval"
    }

    async fn execute(
        &self,
        state: &mut ConversationState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let results = ctx
            .index
            .search_with_scores(&state.query, ctx.settings.context_k)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        // Empty results are not an error; generation falls back to the
        // plain path when the context stays empty.
        let fragments: Vec<RetrievedFragment> = results
            .into_iter()
            .map(|(fragment, distance)| RetrievedFragment::new(fragment, distance))
            .collect();

        let assembler = ContextAssembler::new(AssemblerConfig {
            preview_chars: 150,
            max_sources: ctx.settings.max_sources,
            score_display: ScoreDisplay::InverseDistance,
        });
        let assembled = assembler.assemble(&fragments);

        tracing::info!(count = fragments.len(), "retrieved context fragments");
        state.context = assembled.context;
        state.sources = assembled.sources;
        Ok(NodeOutput::Continue)
    }
}
