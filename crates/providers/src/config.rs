use serde::{Deserialize, Serialize};

/// Runtime configuration for the model providers.
///
/// # Example
/// ```
/// use providers::ProviderConfig;
///
/// let cfg = ProviderConfig {
///     mode: "api".into(),
///     embedding_url: Some("https://router.huggingface.co/hf-inference/models/sentence-transformers/all-MiniLM-L6-v2/pipeline/feature-extraction".into()),
///     extraction_url: Some("https://router.huggingface.co/hf-inference/models/t5-small".into()),
///     toxicity_url: Some("https://router.huggingface.co/hf-inference/models/unitary/toxic-bert".into()),
///     api_auth_header: Some("Bearer hf_xxx".into()),
///     ..Default::default()
/// };
/// assert_eq!(cfg.mode, "api");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Provider family selector: `"api"` (remote HTTP) or `"stub"` (deterministic, offline).
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Feature-extraction endpoint used by the embedder in api mode.
    #[serde(default)]
    pub embedding_url: Option<String>,
    /// Text2text generation endpoint used by the topic extractor in api mode.
    #[serde(default)]
    pub extraction_url: Option<String>,
    /// Text-classification endpoint used by the toxicity classifier in api mode.
    #[serde(default)]
    pub toxicity_url: Option<String>,
    /// Authorization header sent on every api-mode request (e.g. `"Bearer hf_xxx"`).
    #[serde(default)]
    pub api_auth_header: Option<String>,
    /// Per-request timeout at the provider boundary, in seconds.
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,
    /// Dimension of vectors produced by the stub embedder.
    #[serde(default = "default_stub_embedding_dim")]
    pub stub_embedding_dim: usize,
    /// L2-normalize embedding vectors (recommended for cosine similarity).
    #[serde(default = "default_true")]
    pub normalize: bool,
    /// Number of candidate topics requested per extraction call.
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            embedding_url: None,
            extraction_url: None,
            toxicity_url: None,
            api_auth_header: None,
            api_timeout_secs: default_api_timeout_secs(),
            stub_embedding_dim: default_stub_embedding_dim(),
            normalize: default_true(),
            max_topics: default_max_topics(),
        }
    }
}

fn default_mode() -> String {
    "stub".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_stub_embedding_dim() -> usize {
    384
}

fn default_max_topics() -> usize {
    5
}

fn default_true() -> bool {
    true
}
