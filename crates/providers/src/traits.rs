//! Capability traits the engine programs against.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::ProviderError;

/// Turns text into a fixed-dimension embedding vector.
///
/// Implementations are expected to be deterministic for identical input within
/// one process lifetime; vectors from different model versions are not
/// comparable.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// Extracts candidate topic strings from free text.
///
/// Output is an untrusted stream: sampling-based generation may return
/// duplicates, near-duplicates, or nothing at all. The registry's dedup step
/// is the only defense against topic explosion.
#[async_trait]
pub trait TopicExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ProviderError>;
}

/// Scores text against a set of toxicity categories, each in `[0, 1]`.
#[async_trait]
pub trait ToxicityClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<HashMap<String, f32>, ProviderError>;
}
