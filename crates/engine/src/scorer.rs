//! Per-topic relevance scoring.

use std::collections::HashMap;

use providers::Embedder;

use crate::error::EngineError;
use crate::registry::Topic;
use crate::similarity::cosine;

/// Scores `text` against every topic in `topics`: one embedding call, then
/// cosine similarity per topic. Values are raw floats in `[-1, 1]`, neither
/// rounded nor clamped.
///
/// Pure with respect to the topic set — an empty set yields an empty map
/// without touching the embedder, so scoring against a fresh registry is valid
/// and cheap rather than an error. A text that embeds to a different dimension
/// than the topics is an error: truncating one vector to fit would produce a
/// plausible-looking but wrong similarity.
pub async fn score(
    text: &str,
    topics: &[Topic],
    embedder: &dyn Embedder,
) -> Result<HashMap<String, f32>, EngineError> {
    if topics.is_empty() {
        return Ok(HashMap::new());
    }

    let embedding = embedder.embed(text).await?;
    if let Some(topic) = topics.iter().find(|t| t.embedding.len() != embedding.len()) {
        return Err(EngineError::DimensionMismatch {
            expected: topic.embedding.len(),
            actual: embedding.len(),
        });
    }
    Ok(topics
        .iter()
        .map(|t| (t.label.clone(), cosine(&embedding, &t.embedding)))
        .collect())
}
