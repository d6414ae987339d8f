//! Remote inference providers speaking the Hugging Face inference API shapes.
//!
//! Each provider owns a pooled [`reqwest::Client`] with the configured request
//! timeout, so a hung model endpoint fails the enclosing request instead of
//! blocking the process. No retries happen here; failures surface to the
//! caller, which decides whether the item or the whole request is lost.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::normalize::l2_normalize_in_place;
use crate::traits::{Embedder, ToxicityClassifier, TopicExtractor};

/// Prompt prefix the extraction model was prompted with upstream.
const EXTRACTION_PROMPT: &str = "Extract topics: ";

fn build_client(cfg: &ProviderConfig) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.api_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(ProviderError::Http)
}

fn require_url(url: &Option<String>, field: &str) -> Result<String, ProviderError> {
    url.clone()
        .ok_or_else(|| ProviderError::InvalidConfig(format!("{field} is required for api mode")))
}

async fn post_json(
    client: &reqwest::Client,
    url: &str,
    auth_header: Option<&str>,
    payload: Value,
) -> Result<Value, ProviderError> {
    let mut request = client.post(url).json(&payload);
    if let Some(auth) = auth_header {
        request = request.header(reqwest::header::AUTHORIZATION, auth);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

/// Feature-extraction client: text in, dense vector out.
pub struct ApiEmbedder {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
    normalize: bool,
}

impl ApiEmbedder {
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(cfg)?,
            url: require_url(&cfg.embedding_url, "embedding_url")?,
            auth_header: cfg.api_auth_header.clone(),
            normalize: cfg.normalize,
        })
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let payload = json!({ "inputs": text });
        let body = post_json(&self.client, &self.url, self.auth_header.as_deref(), payload).await?;
        let mut vector = parse_embedding(&body)?;
        if self.normalize {
            l2_normalize_in_place(&mut vector);
        }
        Ok(vector)
    }
}

/// Accepts both the flat (`[f32, ...]`) and singleton-batch (`[[f32, ...]]`)
/// shapes the feature-extraction pipeline returns.
fn parse_embedding(body: &Value) -> Result<Vec<f32>, ProviderError> {
    let values = match body {
        Value::Array(outer) => match outer.first() {
            Some(Value::Array(inner)) => inner.as_slice(),
            _ => outer.as_slice(),
        },
        _ => {
            return Err(ProviderError::Decode(
                "embedding response is not an array".into(),
            ))
        }
    };
    values
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| ProviderError::Decode("embedding element is not a number".into()))
        })
        .collect()
}

/// Text2text generation client used as the topic extractor. Generation is
/// sampling-based, so the output sequence may contain duplicates or be empty.
pub struct ApiTopicExtractor {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
    max_topics: usize,
}

impl ApiTopicExtractor {
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(cfg)?,
            url: require_url(&cfg.extraction_url, "extraction_url")?,
            auth_header: cfg.api_auth_header.clone(),
            max_topics: cfg.max_topics,
        })
    }
}

#[async_trait]
impl TopicExtractor for ApiTopicExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let payload = json!({
            "inputs": format!("{EXTRACTION_PROMPT}{text}"),
            "parameters": {
                "max_length": 50,
                "num_return_sequences": self.max_topics,
                "do_sample": true,
            },
        });
        let body = post_json(&self.client, &self.url, self.auth_header.as_deref(), payload).await?;
        parse_generated_topics(&body)
    }
}

fn parse_generated_topics(body: &Value) -> Result<Vec<String>, ProviderError> {
    let sequences = body
        .as_array()
        .ok_or_else(|| ProviderError::Decode("generation response is not an array".into()))?;

    let mut topics = Vec::with_capacity(sequences.len());
    for seq in sequences {
        let generated = seq
            .get("generated_text")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Decode("sequence missing generated_text".into()))?;
        let topic = generated.trim();
        if !topic.is_empty() && !topics.iter().any(|t| t == topic) {
            topics.push(topic.to_string());
        }
    }
    Ok(topics)
}

/// Text-classification client returning one score per toxicity category.
pub struct ApiToxicityClassifier {
    client: reqwest::Client,
    url: String,
    auth_header: Option<String>,
}

impl ApiToxicityClassifier {
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(cfg)?,
            url: require_url(&cfg.toxicity_url, "toxicity_url")?,
            auth_header: cfg.api_auth_header.clone(),
        })
    }
}

#[async_trait]
impl ToxicityClassifier for ApiToxicityClassifier {
    async fn classify(&self, text: &str) -> Result<HashMap<String, f32>, ProviderError> {
        let payload = json!({ "inputs": text });
        let body = post_json(&self.client, &self.url, self.auth_header.as_deref(), payload).await?;
        parse_classification(&body)
    }
}

/// The classification pipeline wraps results for a single input in an extra
/// array level: `[[{"label": ..., "score": ...}, ...]]`.
fn parse_classification(body: &Value) -> Result<HashMap<String, f32>, ProviderError> {
    let labels = body
        .as_array()
        .and_then(|outer| outer.first())
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::Decode("classification response is not nested array".into()))?;

    let mut scores = HashMap::with_capacity(labels.len());
    for entry in labels {
        let label = entry
            .get("label")
            .and_then(Value::as_str)
            .ok_or_else(|| ProviderError::Decode("classification entry missing label".into()))?;
        let score = entry
            .get("score")
            .and_then(Value::as_f64)
            .ok_or_else(|| ProviderError::Decode("classification entry missing score".into()))?;
        scores.insert(label.to_string(), score as f32);
    }
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_embedding_flat_array() {
        let body = json!([0.1, 0.2, 0.3]);
        let v = parse_embedding(&body).unwrap();
        assert_eq!(v, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn parse_embedding_singleton_batch() {
        let body = json!([[0.5, -0.5]]);
        let v = parse_embedding(&body).unwrap();
        assert_eq!(v, vec![0.5, -0.5]);
    }

    #[test]
    fn parse_embedding_rejects_non_array() {
        let body = json!({"error": "model loading"});
        assert!(parse_embedding(&body).is_err());
    }

    #[test]
    fn parse_embedding_rejects_mixed_elements() {
        let body = json!([0.1, "oops", 0.3]);
        assert!(parse_embedding(&body).is_err());
    }

    #[test]
    fn parse_topics_dedupes_generations() {
        let body = json!([
            {"generated_text": "hiking"},
            {"generated_text": "hiking"},
            {"generated_text": " trail running "},
        ]);
        let topics = parse_generated_topics(&body).unwrap();
        assert_eq!(topics, vec!["hiking", "trail running"]);
    }

    #[test]
    fn parse_topics_empty_generation_list() {
        let body = json!([]);
        let topics = parse_generated_topics(&body).unwrap();
        assert!(topics.is_empty());
    }

    #[test]
    fn parse_classification_nested_shape() {
        let body = json!([[
            {"label": "toxic", "score": 0.91},
            {"label": "insult", "score": 0.12},
        ]]);
        let scores = parse_classification(&body).unwrap();
        assert_eq!(scores.len(), 2);
        assert!((scores["toxic"] - 0.91).abs() < 1e-6);
        assert!((scores["insult"] - 0.12).abs() < 1e-6);
    }

    #[test]
    fn parse_classification_rejects_flat_shape() {
        let body = json!([{"label": "toxic", "score": 0.91}]);
        assert!(parse_classification(&body).is_err());
    }

    #[test]
    fn from_config_requires_urls() {
        let cfg = ProviderConfig {
            mode: "api".into(),
            ..Default::default()
        };
        assert!(ApiEmbedder::from_config(&cfg).is_err());
        assert!(ApiTopicExtractor::from_config(&cfg).is_err());
        assert!(ApiToxicityClassifier::from_config(&cfg).is_err());
    }
}
