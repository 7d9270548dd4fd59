//! DocumentIndex trait — abstract interface for the vector index.
//!
//! Ingestion and embedding computation live outside this crate; the
//! workflows only consume similarity search and the has-documents
//! predicate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::AgentError;

use super::scoring::relevance_score;

/// A chunk of previously ingested text with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragment {
    /// The text content of the fragment.
    pub content: String,
    /// Origin name (filename, URL, etc.) used for citations.
    pub source: String,
    /// Position of this chunk within its origin document.
    pub chunk_index: usize,
}

impl Fragment {
    pub fn new(content: impl Into<String>, source: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
            chunk_index,
        }
    }
}

/// A fragment returned by similarity search, carrying its raw distance
/// and the relevance score derived from it. Owned by the workflow run
/// that retrieved it; scores are recomputed per run, never cached.
#[derive(Debug, Clone)]
pub struct RetrievedFragment {
    pub fragment: Fragment,
    /// The index's native closeness metric, lower = closer.
    pub raw_distance: f32,
    /// Derived score in (0, 1], higher = more relevant.
    pub relevance: f32,
}

impl RetrievedFragment {
    pub fn new(fragment: Fragment, raw_distance: f32) -> Self {
        Self {
            relevance: relevance_score(raw_distance),
            fragment,
            raw_distance,
        }
    }
}

/// Abstract trait for the similarity-search collaborator.
///
/// Implementations must be safe under concurrent invocation; many
/// workflow runs may search at once.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Nearest-neighbor search. Returns up to `k` fragments ordered most
    /// similar first, each with its raw distance. Returns an empty list
    /// when no index exists — never an error for an empty corpus.
    async fn search_with_scores(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<(Fragment, f32)>, AgentError>;

    /// Whether any documents have been ingested.
    fn has_documents(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieved_fragment_derives_relevance_from_distance() {
        let fragment = Fragment::new("refunds are processed in 5 days", "policy.txt", 0);
        let retrieved = RetrievedFragment::new(fragment, 0.2);

        assert_eq!(retrieved.raw_distance, 0.2);
        assert!((retrieved.relevance - (-0.2_f32).exp()).abs() < 1e-6);
    }
}
