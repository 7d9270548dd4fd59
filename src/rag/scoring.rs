//! Distance-to-relevance conversion.
//!
//! Nearest-neighbor search returns an L2 distance (lower is closer).
//! Exponential decay maps it into (0, 1]: near-duplicate matches land
//! close to 1, far matches decay toward 0 without a hard cutoff. For
//! normalized embeddings distances are typically 0-2, giving scores of
//! roughly 0.13-1.0.

/// Convert a raw distance into a bounded relevance score.
///
/// Negative distances should not occur; they map to 0.
pub fn relevance_score(distance: f32) -> f32 {
    if distance < 0.0 {
        0.0
    } else {
        (-distance).exp()
    }
}

pub fn is_relevant(score: f32, threshold: f32) -> bool {
    score >= threshold
}
