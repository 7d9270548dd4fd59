pub mod agents;
pub mod core;
pub mod graph;
pub mod llm;
pub mod logging;
pub mod rag;

pub use crate::agents::{ConversationAgent, ConversationOutcome, RagAgent, RagOutcome};
pub use crate::core::config::Settings;
pub use crate::core::errors::AgentError;
pub use crate::graph::state::{AnswerMode, Intent, ModeRequest};
pub use crate::llm::provider::TextGenerator;
pub use crate::llm::types::ChatMessage;
pub use crate::rag::context_builder::SourceRef;
pub use crate::rag::store::{DocumentIndex, Fragment, RetrievedFragment};
