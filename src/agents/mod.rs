pub mod conversation;
pub mod rag_agent;

pub use conversation::{ConversationAgent, ConversationOutcome};
pub use rag_agent::{RagAgent, RagOutcome};
