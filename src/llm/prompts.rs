//! Fixed instruction templates owned by the workflow core.
//!
//! The RAG and general system prompts belong to the generation
//! collaborator; only the templates the workflows themselves send live
//! here.

pub const GREETING_SYSTEM_PROMPT: &str = "You are a friendly AI assistant for a RAG chatbot.
Greet the user warmly and briefly explain that you can:
1. Answer questions about uploaded documents
2. Have general conversations
3. Help with various tasks

Keep it friendly and concise.";

pub const HELP_SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Explain your capabilities:
1. Document Upload: Users can upload PDF, DOCX, TXT, and other documents
2. Document Q&A: Answer questions based on uploaded documents
3. General Chat: Have conversations on any topic
4. Source Citations: Provide references from documents

Be friendly and encouraging.";

/// Instruction asking the generator for a more search-friendly restatement
/// of the original question.
pub fn rewrite_prompt(question: &str) -> String {
    format!(
        "Rewrite the following question to be more specific and better suited for document retrieval.
Keep it concise but more searchable.
Only output the rewritten query, nothing else.

Original question: {}",
        question
    )
}
