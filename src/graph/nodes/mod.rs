// Workflow step nodes

mod analyze_intent;
mod generate_general;
mod generate_rag;
mod generate_response;
mod grade;
mod retrieve;
mod retrieve_context;
mod rewrite;
mod route;

pub use analyze_intent::AnalyzeIntentNode;
pub use generate_general::GenerateGeneralNode;
pub use generate_rag::GenerateRagNode;
pub use generate_response::GenerateResponseNode;
pub use grade::GradeNode;
pub use retrieve::RetrieveNode;
pub use retrieve_context::RetrieveContextNode;
pub use rewrite::RewriteNode;
pub use route::RouteNode;

/// Case-insensitive keyword test against a policy table.
pub(crate) fn contains_any(text: &str, keywords: &[String]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|kw| lowered.contains(kw.as_str()))
}
