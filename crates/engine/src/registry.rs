//! Canonical topic set with write-time embedding dedup.

use providers::Embedder;
use tracing::{debug, warn};

use crate::similarity::cosine;

/// Cosine similarity above which a candidate counts as a duplicate of an
/// existing topic. The comparison is strict: exactly 0.7 is not a duplicate.
pub const DEDUP_THRESHOLD: f32 = 0.7;

/// A canonical topic label and its embedding. Identity is the label text,
/// exactly as the extractor produced it (case- and whitespace-sensitive).
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub label: String,
    pub embedding: Vec<f32>,
}

/// Outcome counters for one registration batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterReport {
    /// Candidates inserted as new canonical topics.
    pub inserted: usize,
    /// Candidates skipped as duplicates (by similarity or exact label).
    pub duplicates: usize,
    /// Candidates whose embedding call failed or did not fit and were skipped.
    pub failures: usize,
}

impl RegisterReport {
    pub fn absorb(&mut self, other: RegisterReport) {
        self.inserted += other.inserted;
        self.duplicates += other.duplicates;
        self.failures += other.failures;
    }
}

/// Insertion-ordered mapping from topic label to embedding.
///
/// Created empty at process start, grows monotonically — topics are never
/// removed or merged after insertion — and is lost on restart. The registry is
/// plain data; callers that share it across requests are responsible for
/// serializing access (the server wraps it in a `tokio::sync::RwLock`).
#[derive(Debug, Default)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.topics.iter().any(|t| t.label == label)
    }

    /// Snapshot of the current topic set, in insertion order. Callers own the
    /// copy and may keep using it after the registry moves on.
    pub fn topics(&self) -> Vec<Topic> {
        self.topics.clone()
    }

    /// Current topic labels in insertion order.
    pub fn labels(&self) -> Vec<String> {
        self.topics.iter().map(|t| t.label.clone()).collect()
    }

    /// Registers candidate topics, in input order, deduplicating against the
    /// registry as it stood when the call began.
    ///
    /// Each candidate is embedded and compared against every pre-existing
    /// topic; a cosine similarity strictly above [`DEDUP_THRESHOLD`] discards
    /// it. Candidates inserted earlier in the same batch are deliberately not
    /// consulted, so near-duplicate siblings within one batch can all land —
    /// only an exact label repeat collapses, because identity is the label.
    ///
    /// Embedding failures are isolated per candidate: the item is logged and
    /// counted, and the rest of the batch proceeds. A candidate whose vector
    /// has a different dimension than the registry's topics is counted the
    /// same way — all stored embeddings share one dimension, fixed by the
    /// first insertion. An insertion either fully completes or does not
    /// happen; the registry never shrinks.
    pub async fn register(
        &mut self,
        candidates: &[String],
        embedder: &dyn Embedder,
    ) -> RegisterReport {
        let preexisting = self.topics.len();
        let mut report = RegisterReport::default();

        for candidate in candidates {
            if self.contains(candidate) {
                debug!(topic = %candidate, "skipping exact duplicate label");
                report.duplicates += 1;
                continue;
            }

            let embedding = match embedder.embed(candidate).await {
                Ok(v) => v,
                Err(err) => {
                    warn!(topic = %candidate, error = %err, "embedding failed, skipping candidate");
                    report.failures += 1;
                    continue;
                }
            };

            if let Some(first) = self.topics.first() {
                if first.embedding.len() != embedding.len() {
                    warn!(
                        topic = %candidate,
                        expected = first.embedding.len(),
                        actual = embedding.len(),
                        "embedding dimension mismatch, skipping candidate"
                    );
                    report.failures += 1;
                    continue;
                }
            }

            let duplicate = self.topics[..preexisting]
                .iter()
                .any(|t| cosine(&embedding, &t.embedding) > DEDUP_THRESHOLD);
            if duplicate {
                debug!(topic = %candidate, "skipping near-duplicate of existing topic");
                report.duplicates += 1;
            } else {
                self.topics.push(Topic {
                    label: candidate.clone(),
                    embedding,
                });
                report.inserted += 1;
            }
        }

        report
    }
}
