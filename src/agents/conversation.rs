//! Conversation agent: intent classification with conditional retrieval.

use std::sync::Arc;

use serde::Serialize;

use crate::core::config::Settings;
use crate::core::errors::AgentError;
use crate::graph::builder::build_conversation_graph;
use crate::graph::node::NodeContext;
use crate::graph::observer::StepObserver;
use crate::graph::runtime::GraphRuntime;
use crate::graph::state::{AnswerMode, ConversationState, Intent};
use crate::llm::provider::TextGenerator;
use crate::llm::types::ChatMessage;
use crate::rag::context_builder::SourceRef;
use crate::rag::store::DocumentIndex;

/// Caller-visible result of one conversation workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationOutcome {
    pub answer: String,
    pub mode: AnswerMode,
    pub sources: Vec<SourceRef>,
    pub intent: Intent,
}

/// Intent-aware conversation workflow over injected collaborators.
pub struct ConversationAgent {
    index: Arc<dyn DocumentIndex>,
    llm: Arc<dyn TextGenerator>,
    settings: Settings,
    graph: GraphRuntime<ConversationState>,
}

impl ConversationAgent {
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        llm: Arc<dyn TextGenerator>,
        settings: Settings,
    ) -> Result<Self, AgentError> {
        settings.validate()?;
        let graph = build_conversation_graph()?;
        Ok(Self {
            index,
            llm,
            settings,
            graph,
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn StepObserver>) -> Self {
        self.graph.set_observer(observer);
        self
    }

    pub async fn run(
        &self,
        question: &str,
        conversation_id: &str,
        chat_history: Vec<ChatMessage>,
    ) -> Result<ConversationOutcome, AgentError> {
        tracing::info!(conversation_id, "running conversation workflow");

        let mut state = ConversationState::new(question, conversation_id, chat_history);
        let ctx = NodeContext {
            index: self.index.as_ref(),
            llm: self.llm.as_ref(),
            settings: &self.settings,
        };

        self.graph.run(&mut state, &ctx).await.map_err(|err| {
            tracing::error!(error = %err, "conversation workflow failed");
            AgentError::from(err)
        })?;

        Ok(ConversationOutcome {
            answer: state.response,
            mode: state.final_mode,
            sources: state.sources,
            intent: state.intent,
        })
    }
}
