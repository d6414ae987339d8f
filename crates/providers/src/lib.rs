//! Model providers for the topic-match recommendation service.
//!
//! The recommendation engine never talks to a model runtime directly. It works
//! against three narrow capability traits:
//!
//! - [`Embedder`] — text → fixed-dimension vector
//! - [`TopicExtractor`] — text → candidate topic strings
//! - [`ToxicityClassifier`] — text → per-category toxicity scores
//!
//! Two families of implementations live here:
//!
//! - **API mode** — remote inference over HTTP (Hugging Face style endpoints).
//! - **Stub mode** — deterministic, offline implementations. Useful for tests
//!   and for running the service without any model endpoint configured.
//!
//! [`build_providers`] picks a family from [`ProviderConfig::mode`].

pub mod config;
pub mod error;
pub mod traits;

mod api;
mod normalize;
mod stub;

pub use crate::api::{ApiEmbedder, ApiTopicExtractor, ApiToxicityClassifier};
pub use crate::config::ProviderConfig;
pub use crate::error::ProviderError;
pub use crate::normalize::l2_normalize_in_place;
pub use crate::stub::{StubEmbedder, StubTopicExtractor, StubToxicityClassifier};
pub use crate::traits::{Embedder, ToxicityClassifier, TopicExtractor};

use std::sync::Arc;

/// The full provider set a server instance runs with.
pub type ProviderSet = (
    Arc<dyn Embedder>,
    Arc<dyn TopicExtractor>,
    Arc<dyn ToxicityClassifier>,
);

/// Builds the provider set selected by `cfg.mode`.
///
/// `"api"` requires all three endpoint URLs. Any other mode resolves to the
/// deterministic stubs; an unrecognized mode logs a warning first so a typo in
/// configuration does not silently degrade to stub output.
pub fn build_providers(cfg: &ProviderConfig) -> Result<ProviderSet, ProviderError> {
    match cfg.mode.as_str() {
        "api" => Ok((
            Arc::new(ApiEmbedder::from_config(cfg)?),
            Arc::new(ApiTopicExtractor::from_config(cfg)?),
            Arc::new(ApiToxicityClassifier::from_config(cfg)?),
        )),
        "stub" => Ok(stub_providers(cfg)),
        other => {
            tracing::warn!(mode = %other, "unknown provider mode, falling back to stub");
            Ok(stub_providers(cfg))
        }
    }
}

fn stub_providers(cfg: &ProviderConfig) -> ProviderSet {
    (
        Arc::new(StubEmbedder::new(cfg.stub_embedding_dim, cfg.normalize)),
        Arc::new(StubTopicExtractor::new(cfg.max_topics)),
        Arc::new(StubToxicityClassifier::default()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_mode_builds_stub_set() {
        let cfg = ProviderConfig::default();
        assert!(build_providers(&cfg).is_ok());
    }

    #[test]
    fn api_mode_requires_endpoints() {
        let cfg = ProviderConfig {
            mode: "api".into(),
            ..Default::default()
        };
        assert!(build_providers(&cfg).is_err());
    }

    #[test]
    fn unknown_mode_falls_back_to_stub() {
        let cfg = ProviderConfig {
            mode: "onnx".into(),
            ..Default::default()
        };
        assert!(build_providers(&cfg).is_ok());
    }
}
