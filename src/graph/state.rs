// Graph State
// Per-run state records for the RAG and conversation workflows

use serde::{Deserialize, Serialize};

use crate::llm::types::ChatMessage;
use crate::rag::context_builder::SourceRef;
use crate::rag::store::RetrievedFragment;

/// At most one automatic question-restatement retry per run.
pub const REWRITE_BUDGET: u32 = 1;

/// Caller's mode request for the RAG workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeRequest {
    #[default]
    Auto,
    Rag,
    General,
}

impl ModeRequest {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "rag" => ModeRequest::Rag,
            "general" => ModeRequest::General,
            _ => ModeRequest::Auto,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeRequest::Auto => "auto",
            ModeRequest::Rag => "rag",
            ModeRequest::General => "general",
        }
    }
}

/// The mode a run actually answered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerMode {
    Rag,
    #[default]
    General,
}

impl AnswerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerMode::Rag => "rag",
            AnswerMode::General => "general",
        }
    }
}

/// Detected intent for the conversation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Help,
    DocumentQuery,
    #[default]
    GeneralQuery,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Help => "help",
            Intent::DocumentQuery => "document_query",
            Intent::GeneralQuery => "general_query",
        }
    }
}

/// State for one run of the RAG workflow.
///
/// Created fresh per incoming question, mutated by exactly one node at a
/// time, discarded after the outcome is extracted.
#[derive(Debug, Clone)]
pub struct RagState {
    // Input
    pub query: String,
    pub mode: ModeRequest,
    pub chat_history: Vec<ChatMessage>,

    // Processing state
    pub detected_mode: AnswerMode,
    pub retrieved: Vec<RetrievedFragment>,
    pub relevant: Vec<RetrievedFragment>,
    pub needs_rewrite: bool,
    pub rewrite_count: u32,
    pub rewritten_query: Option<String>,

    // Output
    pub answer: String,
    pub sources: Vec<SourceRef>,
    pub final_mode: AnswerMode,
}

impl RagState {
    pub fn new(query: impl Into<String>, mode: ModeRequest, chat_history: Vec<ChatMessage>) -> Self {
        Self {
            query: query.into(),
            mode,
            chat_history,
            detected_mode: AnswerMode::General,
            retrieved: Vec::new(),
            relevant: Vec::new(),
            needs_rewrite: false,
            rewrite_count: 0,
            rewritten_query: None,
            answer: String::new(),
            sources: Vec::new(),
            final_mode: AnswerMode::General,
        }
    }
}

/// State for one run of the conversation workflow.
#[derive(Debug, Clone)]
pub struct ConversationState {
    // Input
    pub query: String,
    pub conversation_id: String,
    pub chat_history: Vec<ChatMessage>,

    // Analysis
    pub intent: Intent,
    pub requires_context: bool,

    // Retrieved context
    pub context: String,
    pub sources: Vec<SourceRef>,

    // Output
    pub response: String,
    pub final_mode: AnswerMode,
}

impl ConversationState {
    pub fn new(
        query: impl Into<String>,
        conversation_id: impl Into<String>,
        chat_history: Vec<ChatMessage>,
    ) -> Self {
        Self {
            query: query.into(),
            conversation_id: conversation_id.into(),
            chat_history,
            intent: Intent::GeneralQuery,
            requires_context: false,
            context: String::new(),
            sources: Vec::new(),
            response: String::new(),
            final_mode: AnswerMode::General,
        }
    }
}
