//! Recommendation ranking.

use std::cmp::Ordering;
use std::collections::HashMap;

use providers::Embedder;

use crate::error::EngineError;
use crate::registry::Topic;
use crate::scorer;

/// Collapses a user score vector and a candidate score vector into one scalar:
/// the dot product restricted to the user's topic keys, with missing candidate
/// entries contributing 0.
///
/// Deliberately not cosine similarity between the two score vectors — the sum
/// is unnormalized, so its magnitude grows with the number of registered
/// topics and is not bounded to `[-1, 1]`.
pub fn aggregate_score(
    user_scores: &HashMap<String, f32>,
    candidate_scores: &HashMap<String, f32>,
) -> f32 {
    user_scores
        .iter()
        .map(|(topic, weight)| weight * candidate_scores.get(topic).copied().unwrap_or(0.0))
        .sum()
}

/// Scores each candidate text against `topics`, aggregates against the user's
/// score vector, and returns `(text, score)` pairs sorted descending by score.
/// The sort is stable, so candidates with equal scores keep their input order.
///
/// A candidate whose embedding call fails aborts the whole ranking: a result
/// must account for every requested candidate, never silently omit one. With
/// an empty topic set every candidate scores 0.0 and input order is preserved.
pub async fn rank(
    user_scores: &HashMap<String, f32>,
    candidate_texts: &[String],
    topics: &[Topic],
    embedder: &dyn Embedder,
) -> Result<Vec<(String, f32)>, EngineError> {
    let mut ranked = Vec::with_capacity(candidate_texts.len());
    for text in candidate_texts {
        let candidate_scores = scorer::score(text, topics, embedder).await?;
        ranked.push((text.clone(), aggregate_score(user_scores, &candidate_scores)));
    }

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
