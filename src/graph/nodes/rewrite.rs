// Rewrite Node
// One-shot question restatement for better retrieval

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::RagState;
use crate::llm::prompts::rewrite_prompt;

pub struct RewriteNode;

impl RewriteNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RewriteNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for RewriteNode {
    fn id(&self) -> &'static str {
        "rewrite"
    }

    fn name(&self) -> &'static str {
        "Query Rewrite"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let prompt = rewrite_prompt(&state.query);
        let rewritten = ctx
            .llm
            .generate(&prompt, None)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;
        let rewritten = rewritten.trim().to_string();

        if rewritten.is_empty() {
            // Degenerate output; retrieval will retry with the original question
            tracing::warn!("rewrite produced empty output");
            state.rewritten_query = None;
        } else {
            tracing::info!(rewritten = %rewritten, "rewrote query");
            state.rewritten_query = Some(rewritten);
        }

        state.rewrite_count += 1;
        state.needs_rewrite = false;
        Ok(NodeOutput::Continue)
    }
}
