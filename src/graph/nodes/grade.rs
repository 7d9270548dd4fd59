// Grade Node
// Filter retrieved fragments by relevance score, with graceful fallbacks

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{RagState, REWRITE_BUDGET};
use crate::rag::scoring::is_relevant;

pub struct GradeNode;

impl GradeNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GradeNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for GradeNode {
    fn id(&self) -> &'static str {
        "grade"
    }

    fn name(&self) -> &'static str {
        "Relevance Grading"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let threshold = ctx.settings.grade_threshold;
        let cap = ctx.settings.max_relevant;

        let mut relevant: Vec<_> = state
            .retrieved
            .iter()
            .filter(|f| is_relevant(f.relevance, threshold))
            .cloned()
            .collect();

        if relevant.is_empty() && !state.retrieved.is_empty() {
            // A weak-context answer beats an empty one: keep the top
            // fragments by original rank regardless of score.
            relevant = state.retrieved.iter().take(cap).cloned().collect();
            tracing::info!(
                count = relevant.len(),
                "no fragment passed threshold, keeping top fragments by rank"
            );
        } else {
            relevant.truncate(cap);
            tracing::info!(count = relevant.len(), "fragments passed grading");
        }

        if relevant.is_empty() && state.rewrite_count < REWRITE_BUDGET {
            state.relevant.clear();
            state.needs_rewrite = true;
            return Ok(NodeOutput::Branch("rewrite".to_string()));
        }

        state.needs_rewrite = false;
        state.relevant = relevant;

        if state.relevant.is_empty() {
            // Rewrite budget exhausted and still nothing retrieved
            Ok(NodeOutput::Branch("fallback".to_string()))
        } else {
            Ok(NodeOutput::Branch("relevant".to_string()))
        }
    }
}
