// Workflow graph module
// LangGraph-style StateGraph architecture for the RAG and conversation
// workflows.

pub mod builder;
pub mod node;
pub mod nodes;
pub mod observer;
pub mod runtime;
pub mod state;

pub use builder::{build_conversation_graph, build_rag_graph};
pub use node::{GraphError, Node, NodeContext, NodeOutput};
pub use observer::{StepObserver, TracingObserver};
pub use runtime::{GraphBuilder, GraphRuntime};
pub use state::{AnswerMode, ConversationState, Intent, ModeRequest, RagState};
