// Graph Builder
// Wires the two workflow graphs

use super::node::GraphError;
use super::nodes::{
    AnalyzeIntentNode, GenerateGeneralNode, GenerateRagNode, GenerateResponseNode, GradeNode,
    RetrieveContextNode, RetrieveNode, RewriteNode, RouteNode,
};
use super::runtime::{GraphBuilder, GraphRuntime};
use super::state::{ConversationState, RagState};

/// Build the RAG workflow graph:
/// route -> retrieve -> grade -> (generate_rag | rewrite -> retrieve | generate_general)
///
/// The rewrite edge makes the graph cyclic; the loop is bounded by the
/// rewrite budget checked in grading, with the runtime step limit as a
/// second line of defense.
pub fn build_rag_graph() -> Result<GraphRuntime<RagState>, GraphError> {
    GraphBuilder::new()
        .entry("route")
        .max_steps(12)
        .node(Box::new(RouteNode::new()))
        .node(Box::new(RetrieveNode::new()))
        .node(Box::new(GradeNode::new()))
        .node(Box::new(RewriteNode::new()))
        .node(Box::new(GenerateRagNode::new()))
        .node(Box::new(GenerateGeneralNode::new()))
        .conditional_edge("route", "retrieve", "rag")
        .conditional_edge("route", "generate_general", "general")
        .edge("retrieve", "grade")
        .conditional_edge("grade", "generate_rag", "relevant")
        .conditional_edge("grade", "rewrite", "rewrite")
        .conditional_edge("grade", "generate_general", "fallback")
        .edge("rewrite", "retrieve")
        .build()
}

/// Build the conversation workflow graph:
/// analyze_intent -> (retrieve_context ->)? generate_response
pub fn build_conversation_graph() -> Result<GraphRuntime<ConversationState>, GraphError> {
    GraphBuilder::new()
        .entry("analyze_intent")
        .max_steps(8)
        .node(Box::new(AnalyzeIntentNode::new()))
        .node(Box::new(RetrieveContextNode::new()))
        .node(Box::new(GenerateResponseNode::new()))
        .conditional_edge("analyze_intent", "retrieve_context", "needs_context")
        .conditional_edge("analyze_intent", "generate_response", "no_context")
        .edge("retrieve_context", "generate_response")
        .build()
}
