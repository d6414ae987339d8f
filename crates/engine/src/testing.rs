//! Shared test fixtures for the engine unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use providers::{Embedder, ProviderError};

/// Embedder backed by a fixed text → vector table. Unknown texts are an error,
/// which doubles as the failure-injection hook for isolation tests.
pub struct FixtureEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl FixtureEmbedder {
    pub fn new(entries: &[(&str, &[f32])]) -> Self {
        let vectors = entries
            .iter()
            .map(|(text, v)| (text.to_string(), v.to_vec()))
            .collect();
        Self { vectors }
    }
}

#[async_trait]
impl Embedder for FixtureEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| ProviderError::Decode(format!("no fixture vector for {text:?}")))
    }
}
