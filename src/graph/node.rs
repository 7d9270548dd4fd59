// Node trait and types
// Base abstraction for graph nodes

use async_trait::async_trait;

use crate::core::config::Settings;
use crate::core::errors::AgentError;
use crate::llm::provider::TextGenerator;
use crate::rag::store::DocumentIndex;

/// Collaborators passed to nodes during execution.
///
/// Both workflows share the same context: the vector index, the
/// generation service, and the tunables. All are injected at agent
/// construction, never reached through globals.
pub struct NodeContext<'a> {
    pub index: &'a dyn DocumentIndex,
    pub llm: &'a dyn TextGenerator,
    pub settings: &'a Settings,
}

/// Output from a node execution
#[derive(Debug, Clone)]
pub enum NodeOutput {
    /// Continue along the default (`Always`) edge
    Continue,
    /// Branch to the edge labeled with this condition
    Branch(String),
    /// Graph execution complete
    Final,
}

/// Graph execution error
///
/// Includes an `execution_trace` recording the sequence of node IDs
/// visited before the error occurred, aiding production debugging.
#[derive(Debug, Clone)]
pub struct GraphError {
    pub node_id: String,
    pub message: String,
    /// Ordered list of node IDs executed before this error, most-recent last.
    pub execution_trace: Vec<String>,
}

impl GraphError {
    pub fn new(node_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            message: message.into(),
            execution_trace: Vec::new(),
        }
    }

    /// Attach the node IDs visited before the failure.
    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.execution_trace = trace;
        self
    }
}

impl From<GraphError> for AgentError {
    fn from(err: GraphError) -> Self {
        if err.execution_trace.is_empty() {
            AgentError::Workflow(format!("{}: {}", err.node_id, err.message))
        } else {
            AgentError::Workflow(format!(
                "{} (trace: {}): {}",
                err.node_id,
                err.execution_trace.join(" -> "),
                err.message
            ))
        }
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.execution_trace.is_empty() {
            write!(f, "GraphError in {}: {}", self.node_id, self.message)
        } else {
            write!(
                f,
                "GraphError in {} (trace: {}): {}",
                self.node_id,
                self.execution_trace.join(" -> "),
                self.message
            )
        }
    }
}

impl std::error::Error for GraphError {}

/// Node trait - all graph nodes implement this, parameterized over the
/// workflow state they operate on. Steps never run concurrently within a
/// run; each node gets exclusive mutable access to the state.
#[async_trait]
pub trait Node<S>: Send + Sync {
    /// Unique identifier for this node
    fn id(&self) -> &'static str;

    /// Human-readable name for display
    fn name(&self) -> &'static str {
        self.id()
    }

    /// Execute the node logic
    async fn execute(
        &self,
        state: &mut S,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeOutput, GraphError>;
}
