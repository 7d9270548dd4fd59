//! Context Assembler.
//!
//! Merges scored fragments into a single prompt-ready context string with
//! per-fragment provenance tags, plus a deduplicated source list for
//! citation. Fragment order is preserved (most relevant first, as
//! delivered by retrieval).

use serde::{Deserialize, Serialize};

use super::store::RetrievedFragment;

const FRAGMENT_DELIMITER: &str = "\n\n---\n\n";

/// How the score column of a source entry is rendered.
///
/// `Relevance` shows the exponential-decay score; `InverseDistance` shows
/// `(1 - raw_distance)`. The latter is a display-only convention used by
/// the conversation workflow and plays no part in relevance gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDisplay {
    Relevance,
    InverseDistance,
}

#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Character budget for the content preview of each source entry.
    pub preview_chars: usize,
    /// Cap on the deduplicated source list.
    pub max_sources: usize,
    pub score_display: ScoreDisplay,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            preview_chars: 200,
            max_sources: 5,
            score_display: ScoreDisplay::Relevance,
        }
    }
}

/// One citation entry in the caller-visible source list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// 1-based display id.
    pub id: usize,
    /// Truncated content preview, ellipsis-suffixed.
    pub content: String,
    /// Origin name.
    pub source: String,
    /// Score rendered as a percentage string, e.g. "81.9%".
    pub score: String,
}

#[derive(Debug, Clone, Default)]
pub struct AssembledContext {
    pub context: String,
    pub sources: Vec<SourceRef>,
}

pub struct ContextAssembler {
    config: AssemblerConfig,
}

impl ContextAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Build the context string and source list from fragments already
    /// filtered to the ones to use. An empty input yields an empty
    /// context and an empty source list, which downstream generation
    /// must treat as "no information found", not as a fault.
    pub fn assemble(&self, fragments: &[RetrievedFragment]) -> AssembledContext {
        if fragments.is_empty() {
            return AssembledContext::default();
        }

        let context = fragments
            .iter()
            .enumerate()
            .map(|(i, f)| format!("[SOURCE {}: {}]\n{}", i + 1, f.fragment.source, f.fragment.content))
            .collect::<Vec<_>>()
            .join(FRAGMENT_DELIMITER);

        // Dedup by origin, first occurrence wins.
        let mut sources: Vec<SourceRef> = Vec::new();
        for fragment in fragments {
            if sources.len() >= self.config.max_sources {
                break;
            }
            if sources.iter().any(|s| s.source == fragment.fragment.source) {
                continue;
            }
            sources.push(SourceRef {
                id: sources.len() + 1,
                content: preview(&fragment.fragment.content, self.config.preview_chars),
                source: fragment.fragment.source.clone(),
                score: self.render_score(fragment),
            });
        }

        AssembledContext { context, sources }
    }

    fn render_score(&self, fragment: &RetrievedFragment) -> String {
        let percent = match self.config.score_display {
            ScoreDisplay::Relevance => fragment.relevance * 100.0,
            ScoreDisplay::InverseDistance => (1.0 - fragment.raw_distance) * 100.0,
        };
        format!("{:.1}%", percent)
    }
}

fn preview(content: &str, budget: usize) -> String {
    let truncated: String = content.chars().take(budget).collect();
    format!("{}...", truncated)
}
