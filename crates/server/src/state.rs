use std::sync::Arc;

use engine::TopicRegistry;
use metrics_exporter_prometheus::PrometheusHandle;
use providers::{build_providers, Embedder, ToxicityClassifier, TopicExtractor};
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::metrics;

/// Shared application state.
///
/// The registry is the only mutable state shared across requests. Registration
/// holds the write guard for a whole batch; recommendation takes a snapshot
/// under a short read guard and never observes a half-applied batch.
pub struct ServerState {
    pub config: Arc<ServerConfig>,

    /// Canonical topic set, serialized behind a reader/writer lock.
    pub registry: RwLock<TopicRegistry>,

    pub embedder: Arc<dyn Embedder>,
    pub extractor: Arc<dyn TopicExtractor>,
    pub classifier: Arc<dyn ToxicityClassifier>,

    /// Renders the `/metrics` endpoint.
    pub metrics: PrometheusHandle,
}

impl ServerState {
    /// Create state with providers built from the configured mode. Installs
    /// the process-global metrics recorder, so call this once per process.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let (embedder, extractor, classifier) = build_providers(&config.provider)?;
        let handle = metrics::install_recorder()?;
        Ok(Self::with_metrics_handle(
            config, embedder, extractor, classifier, handle,
        ))
    }

    /// Create state with explicit provider instances. This is the injection
    /// point tests use to run the full HTTP surface against deterministic
    /// fakes. The metrics handle is detached, so many states can coexist in
    /// one process.
    pub fn with_providers(
        config: ServerConfig,
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn TopicExtractor>,
        classifier: Arc<dyn ToxicityClassifier>,
    ) -> Self {
        Self::with_metrics_handle(
            config,
            embedder,
            extractor,
            classifier,
            metrics::detached_handle(),
        )
    }

    fn with_metrics_handle(
        config: ServerConfig,
        embedder: Arc<dyn Embedder>,
        extractor: Arc<dyn TopicExtractor>,
        classifier: Arc<dyn ToxicityClassifier>,
        metrics: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry: RwLock::new(TopicRegistry::new()),
            embedder,
            extractor,
            classifier,
            metrics,
        }
    }
}
