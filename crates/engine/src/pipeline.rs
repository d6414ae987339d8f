//! Glue between the providers and the engine primitives. The server routes
//! call these two functions and nothing else.

use providers::{Embedder, TopicExtractor};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::ranker;
use crate::registry::{RegisterReport, Topic, TopicRegistry};
use crate::scorer;

/// Ranked recommendations for one request, groups and resources independently.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub groups: Vec<(String, f32)>,
    pub resources: Vec<(String, f32)>,
}

/// Extracts candidate topics from each text and registers them.
///
/// Extraction failures are isolated per text: the text is logged and counted
/// as a failure, and the remaining texts still contribute. An extractor
/// returning no candidates for a text is a valid no-op.
pub async fn initialize_topics(
    texts: &[String],
    extractor: &dyn TopicExtractor,
    embedder: &dyn Embedder,
    registry: &mut TopicRegistry,
) -> RegisterReport {
    let mut report = RegisterReport::default();
    for text in texts {
        match extractor.extract(text).await {
            Ok(candidates) => {
                report.absorb(registry.register(&candidates, embedder).await);
            }
            Err(err) => {
                warn!(error = %err, "topic extraction failed, skipping text");
                report.failures += 1;
            }
        }
    }
    info!(
        inserted = report.inserted,
        duplicates = report.duplicates,
        failures = report.failures,
        registry_size = registry.len(),
        "topic registration finished"
    );
    report
}

/// Scores the user's text against `topics`, then ranks both candidate sets
/// against that one user score vector.
///
/// `topics` is a snapshot the caller took once for this request, so all
/// candidates in both rankings see the same topic set. Any embedding failure
/// — the user's text or any candidate — fails the whole call. Isolation of
/// per-item failures is a registration behavior only; a recommendation
/// response never silently omits a requested candidate.
pub async fn recommend(
    user_text: &str,
    group_texts: &[String],
    resource_texts: &[String],
    topics: &[Topic],
    embedder: &dyn Embedder,
) -> Result<Recommendations, EngineError> {
    let user_scores = scorer::score(user_text, topics, embedder).await?;
    let groups = ranker::rank(&user_scores, group_texts, topics, embedder).await?;
    let resources = ranker::rank(&user_scores, resource_texts, topics, embedder).await?;
    Ok(Recommendations { groups, resources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureEmbedder;

    use async_trait::async_trait;
    use providers::{ProviderError, TopicExtractor};

    /// Extractor with canned output per input text; unknown texts fail.
    struct FixtureExtractor {
        entries: Vec<(String, Vec<String>)>,
    }

    impl FixtureExtractor {
        fn new(entries: &[(&str, &[&str])]) -> Self {
            Self {
                entries: entries
                    .iter()
                    .map(|(text, topics)| {
                        (
                            text.to_string(),
                            topics.iter().map(|t| t.to_string()).collect(),
                        )
                    })
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl TopicExtractor for FixtureExtractor {
        async fn extract(&self, text: &str) -> Result<Vec<String>, ProviderError> {
            self.entries
                .iter()
                .find(|(t, _)| t == text)
                .map(|(_, topics)| topics.clone())
                .ok_or_else(|| ProviderError::Decode(format!("no fixture topics for {text:?}")))
        }
    }

    #[tokio::test]
    async fn initialize_accumulates_across_texts() {
        let extractor = FixtureExtractor::new(&[
            ("about hiking", &["hiking"]),
            ("about coding", &["coding"]),
        ]);
        let embedder = FixtureEmbedder::new(&[("hiking", &[1.0, 0.0]), ("coding", &[0.0, 1.0])]);
        let mut registry = TopicRegistry::new();

        let report = initialize_topics(
            &["about hiking".into(), "about coding".into()],
            &extractor,
            &embedder,
            &mut registry,
        )
        .await;

        assert_eq!(report.inserted, 2);
        assert_eq!(registry.labels(), vec!["hiking", "coding"]);
    }

    #[tokio::test]
    async fn initialize_isolates_extraction_failures() {
        let extractor = FixtureExtractor::new(&[("good", &["hiking"])]);
        let embedder = FixtureEmbedder::new(&[("hiking", &[1.0, 0.0])]);
        let mut registry = TopicRegistry::new();

        let report = initialize_topics(
            &["broken".into(), "good".into()],
            &extractor,
            &embedder,
            &mut registry,
        )
        .await;

        assert_eq!(report.failures, 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn later_texts_dedup_against_earlier_insertions() {
        // Same topic surfaces from two different texts; the second
        // registration call sees the first call's insertion.
        let extractor = FixtureExtractor::new(&[
            ("first text", &["hiking"]),
            ("second text", &["hiking"]),
        ]);
        let embedder = FixtureEmbedder::new(&[("hiking", &[1.0, 0.0])]);
        let mut registry = TopicRegistry::new();

        let report = initialize_topics(
            &["first text".into(), "second text".into()],
            &extractor,
            &embedder,
            &mut registry,
        )
        .await;

        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn recommend_ranks_both_sets_against_one_user_vector() {
        let embedder = FixtureEmbedder::new(&[
            ("outdoorsy user", &[1.0, 0.0]),
            ("hiking club", &[1.0, 0.0]),
            ("chess club", &[0.0, 1.0]),
            ("trail guide", &[0.9, (1.0f32 - 0.81).sqrt()]),
        ]);
        let topics = vec![
            Topic {
                label: "hiking".into(),
                embedding: vec![1.0, 0.0],
            },
            Topic {
                label: "chess".into(),
                embedding: vec![0.0, 1.0],
            },
        ];

        let rec = recommend(
            "outdoorsy user",
            &["chess club".into(), "hiking club".into()],
            &["trail guide".into()],
            &topics,
            &embedder,
        )
        .await
        .unwrap();

        assert_eq!(rec.groups[0].0, "hiking club");
        assert_eq!(rec.groups[1].0, "chess club");
        assert_eq!(rec.resources.len(), 1);
        assert!(rec.resources[0].1 > 0.0);
    }

    #[tokio::test]
    async fn recommend_fails_when_user_text_cannot_be_embedded() {
        let embedder = FixtureEmbedder::new(&[]);
        let topics = vec![Topic {
            label: "hiking".into(),
            embedding: vec![1.0, 0.0],
        }];

        let result = recommend("mystery user", &[], &[], &topics, &embedder).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn recommend_fails_when_a_candidate_cannot_be_embedded() {
        // One unembeddable candidate aborts the request instead of returning
        // a 200-shaped result with that candidate missing.
        let embedder = FixtureEmbedder::new(&[
            ("outdoorsy user", &[1.0, 0.0]),
            ("hiking club", &[1.0, 0.0]),
        ]);
        let topics = vec![Topic {
            label: "hiking".into(),
            embedding: vec![1.0, 0.0],
        }];

        let result = recommend(
            "outdoorsy user",
            &["broken club".into(), "hiking club".into()],
            &[],
            &topics,
            &embedder,
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn recommend_with_empty_registry_scores_zero() {
        let embedder = FixtureEmbedder::new(&[]);

        let rec = recommend(
            "anyone",
            &["g1".into(), "g2".into()],
            &["r1".into()],
            &[],
            &embedder,
        )
        .await
        .unwrap();

        assert_eq!(
            rec.groups,
            vec![("g1".to_string(), 0.0), ("g2".to_string(), 0.0)]
        );
        assert_eq!(rec.resources, vec![("r1".to_string(), 0.0)]);
    }
}
