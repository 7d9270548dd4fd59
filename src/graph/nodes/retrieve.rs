// Retrieve Node
// Similarity search for the active query, scoring every returned fragment

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::RagState;
use crate::rag::store::RetrievedFragment;

pub struct RetrieveNode;

impl RetrieveNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RetrieveNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for RetrieveNode {
    fn id(&self) -> &'static str {
        "retrieve"
    }

    fn name(&self) -> &'static str {
        "Document Retrieval"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        // Prefer the rewritten question when a usable one exists
        let query = state
            .rewritten_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .unwrap_or(&state.query);

        let results = ctx
            .index
            .search_with_scores(query, ctx.settings.retrieve_k)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        state.retrieved = results
            .into_iter()
            .map(|(fragment, distance)| RetrievedFragment::new(fragment, distance))
            .collect();

        tracing::info!(count = state.retrieved.len(), "retrieved fragments");
        Ok(NodeOutput::Continue)
    }
}
