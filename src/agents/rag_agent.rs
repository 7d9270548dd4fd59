//! RAG agent: the route/retrieve/grade/rewrite/generate workflow.

use std::sync::Arc;

use serde::Serialize;

use crate::core::config::Settings;
use crate::core::errors::AgentError;
use crate::graph::builder::build_rag_graph;
use crate::graph::node::NodeContext;
use crate::graph::observer::StepObserver;
use crate::graph::runtime::GraphRuntime;
use crate::graph::state::{AnswerMode, ModeRequest, RagState};
use crate::llm::provider::TextGenerator;
use crate::llm::types::ChatMessage;
use crate::rag::context_builder::SourceRef;
use crate::rag::store::DocumentIndex;

/// Caller-visible result of one RAG workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct RagOutcome {
    pub answer: String,
    pub mode: AnswerMode,
    pub sources: Vec<SourceRef>,
    /// Number of fragments that informed the answer.
    pub relevant_count: usize,
}

/// Multi-step RAG workflow over injected collaborators.
///
/// The graph is built once at construction; each call to [`run`] executes
/// an independent run over fresh state, so a single agent may serve many
/// concurrent questions.
///
/// [`run`]: RagAgent::run
pub struct RagAgent {
    index: Arc<dyn DocumentIndex>,
    llm: Arc<dyn TextGenerator>,
    settings: Settings,
    graph: GraphRuntime<RagState>,
}

impl RagAgent {
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        llm: Arc<dyn TextGenerator>,
        settings: Settings,
    ) -> Result<Self, AgentError> {
        settings.validate()?;
        let graph = build_rag_graph()?;
        Ok(Self {
            index,
            llm,
            settings,
            graph,
        })
    }

    /// Route step-transition events somewhere other than tracing.
    pub fn with_observer(mut self, observer: Arc<dyn StepObserver>) -> Self {
        self.graph.set_observer(observer);
        self
    }

    /// Run the workflow for one question. Collaborator failures propagate
    /// to the caller after logging; the only internal retry is the
    /// single-rewrite path.
    pub async fn run(
        &self,
        question: &str,
        mode: ModeRequest,
        chat_history: Vec<ChatMessage>,
    ) -> Result<RagOutcome, AgentError> {
        tracing::info!(mode = mode.as_str(), "running RAG workflow");

        let mut state = RagState::new(question, mode, chat_history);
        let ctx = NodeContext {
            index: self.index.as_ref(),
            llm: self.llm.as_ref(),
            settings: &self.settings,
        };

        self.graph.run(&mut state, &ctx).await.map_err(|err| {
            tracing::error!(error = %err, "RAG workflow failed");
            AgentError::from(err)
        })?;

        debug_assert!(state.rewrite_count <= crate::graph::state::REWRITE_BUDGET);

        Ok(RagOutcome {
            answer: state.answer,
            mode: state.final_mode,
            relevant_count: state.relevant.len(),
            sources: state.sources,
        })
    }
}
