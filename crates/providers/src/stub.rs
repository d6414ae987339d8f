//! Deterministic offline providers.
//!
//! Stub mode keeps the whole service runnable without a model endpoint: the
//! embedder expands a text hash into a pseudo-random vector, the extractor
//! picks content words, and the classifier matches a small blocklist. Same
//! input always yields the same output, which is what the engine tests lean on.

use std::collections::HashMap;

use async_trait::async_trait;
use fxhash::hash64;

use crate::error::ProviderError;
use crate::normalize::l2_normalize_in_place;
use crate::traits::{Embedder, ToxicityClassifier, TopicExtractor};

/// Hash-seeded embedder. Vectors for unrelated texts land near-orthogonal in
/// high dimensions, so dedup and scoring behave sensibly even offline.
pub struct StubEmbedder {
    dim: usize,
    normalize: bool,
}

impl StubEmbedder {
    pub fn new(dim: usize, normalize: bool) -> Self {
        Self { dim, normalize }
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let mut state = hash64(text.as_bytes()) | 1;
        let mut v = vec![0f32; self.dim];
        for value in v.iter_mut() {
            // Knuth's MMIX LCG constants; top bits mapped onto [-1, 1].
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            *value = ((state >> 40) as f32 / 8_388_608.0) - 1.0;
        }
        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        Ok(v)
    }
}

/// Words too generic to be useful as topic labels.
const STOPWORDS: &[&str] = &[
    "about", "after", "also", "been", "before", "being", "enjoy", "find", "from", "have", "just",
    "like", "looking", "love", "more", "other", "over", "some", "that", "their", "them", "there",
    "these", "they", "this", "want", "weekly", "were", "what", "when", "where", "which", "will",
    "with", "would", "your",
];

/// Keyword-picking extractor: lowercases, keeps content words of four or more
/// characters, dedupes preserving first occurrence, caps at `max_topics`.
pub struct StubTopicExtractor {
    max_topics: usize,
}

impl StubTopicExtractor {
    pub fn new(max_topics: usize) -> Self {
        Self { max_topics }
    }
}

#[async_trait]
impl TopicExtractor for StubTopicExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let mut topics: Vec<String> = Vec::new();
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() >= 4 && !STOPWORDS.contains(w))
        {
            if topics.len() == self.max_topics {
                break;
            }
            if !topics.iter().any(|t| t == word) {
                topics.push(word.to_string());
            }
        }
        Ok(topics)
    }
}

/// Category set mirroring the upstream toxicity model's output labels.
const TOXICITY_CATEGORIES: &[&str] = &[
    "toxicity",
    "severe_toxicity",
    "obscene",
    "threat",
    "insult",
    "identity_attack",
];

const BLOCKLIST: &[&str] = &["hate", "idiot", "kill", "stupid", "trash", "ugly"];

/// Blocklist classifier. A blocklist hit scores the `toxicity` and `insult`
/// categories above the 0.5 decision line; clean text stays well below it.
#[derive(Default)]
pub struct StubToxicityClassifier;

#[async_trait]
impl ToxicityClassifier for StubToxicityClassifier {
    async fn classify(&self, text: &str) -> Result<HashMap<String, f32>, ProviderError> {
        let lowered = text.to_lowercase();
        let flagged = BLOCKLIST.iter().any(|w| lowered.contains(w));

        let scores = TOXICITY_CATEGORIES
            .iter()
            .map(|&category| {
                let score = match (flagged, category) {
                    (true, "toxicity") => 0.92,
                    (true, "insult") => 0.78,
                    (true, _) => 0.30,
                    (false, _) => 0.01,
                };
                (category.to_string(), score)
            })
            .collect();
        Ok(scores)
    }
}
