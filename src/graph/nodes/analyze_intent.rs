// Analyze Intent Node
// Entry point of the conversation workflow: classify the question

use async_trait::async_trait;

use crate::graph::node::{GraphError, Node, NodeContext, NodeOutput};
use crate::graph::state::{ConversationState, Intent};

use super::contains_any;

pub struct AnalyzeIntentNode;

impl AnalyzeIntentNode {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnalyzeIntentNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node<ConversationState> for AnalyzeIntentNode {
    fn id(&self) -> &'static str {
        "analyze_intent"
    }

    fn name(&self) -> &'static str {
        "Intent Analysis"
    }

    async fn execute(
        &self,
        state: &mut ConversationState,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError> {
        let settings = ctx.settings;
        let has_documents = ctx.index.has_documents();

        let mut intent = Intent::GeneralQuery;
        let mut requires_context = false;

        // Priority order: greeting, help, then document-referencing language
        if contains_any(&state.query, &settings.greeting_keywords) {
            intent = Intent::Greeting;
        } else if contains_any(&state.query, &settings.help_keywords) {
            intent = Intent::Help;
        } else if contains_any(&state.query, &settings.doc_keywords) && has_documents {
            intent = Intent::DocumentQuery;
            requires_context = true;
        } else if has_documents {
            // No keyword hit; probe the index for anything close
            let probe = ctx
                .index
                .search_with_scores(&state.query, 1)
                .await
                .map_err(|e| GraphError::new(self.id(), e.to_string()))?;
            if !probe.is_empty() {
                intent = Intent::DocumentQuery;
                requires_context = true;
            }
        }

        state.intent = intent;
        state.requires_context = requires_context;
        tracing::info!(
            intent = intent.as_str(),
            requires_context,
            "analyzed intent"
        );

        let condition = if requires_context {
            "needs_context"
        } else {
            "no_context"
        };
        Ok(NodeOutput::Branch(condition.to_string()))
    }
}
