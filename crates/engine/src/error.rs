use providers::ProviderError;
use thiserror::Error;

/// Errors surfaced by engine operations.
///
/// Topic registration isolates per-item failures internally and reports them
/// as counts; scoring and ranking propagate, since a recommendation is only
/// valid if every requested text was scored.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    /// A text embedded to a different dimension than the registry's topics,
    /// e.g. after a stub dimension change or a model swap mid-process.
    /// Comparing such vectors would produce silently wrong similarities.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
