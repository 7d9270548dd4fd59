// Route Node
// Entry point of the RAG workflow: decide RAG mode vs general mode

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{AnswerMode, ModeRequest, RagState};

use super::contains_any;

pub struct RouteNode;

impl RouteNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RouteNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<RagState> for RouteNode {
    fn id(&self) -> &'static str {
        "route"
    }

    fn name(&self) -> &'static str {
        "Query Router"
    }

    async fn execute(
        &self,
        state: &mut RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let detected = match state.mode {
            ModeRequest::Rag => AnswerMode::Rag,
            ModeRequest::General => AnswerMode::General,
            ModeRequest::Auto => self.detect(state, ctx).await?,
        };

        state.detected_mode = detected;
        tracing::info!(mode = detected.as_str(), "routed query");

        Ok(NodeOutput::Branch(detected.as_str().to_string()))
    }
}

impl RouteNode {
    /// Keyword test first, embedding probe second: ordinary conversation
    /// turns should not pay for an embedding lookup.
    async fn detect(
        &self,
        state: &RagState,
        ctx: &NodeContext<'_>,
    ) -> Result<AnswerMode, GraphError> {
        if !ctx.index.has_documents() {
            return Ok(AnswerMode::General);
        }

        if contains_any(&state.query, &ctx.settings.doc_keywords) {
            return Ok(AnswerMode::Rag);
        }

        // Single-fragment similarity probe
        let probe = ctx
            .index
            .search_with_scores(&state.query, 1)
            .await
            .map_err(|e| GraphError::new(self.id(), e.to_string()))?;

        match probe.first() {
            Some((_, distance)) if *distance < ctx.settings.route_probe_bound => {
                Ok(AnswerMode::Rag)
            }
            _ => Ok(AnswerMode::General),
        }
    }
}
