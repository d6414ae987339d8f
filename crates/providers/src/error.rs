use thiserror::Error;

/// Errors surfaced by provider implementations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider configuration is incomplete or inconsistent.
    #[error("invalid provider config: {0}")]
    InvalidConfig(String),
    /// Transport-level failure reaching the inference endpoint.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    /// The endpoint answered 2xx but the payload was not in the expected shape.
    #[error("unexpected provider response: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message() {
        let err = ProviderError::InvalidConfig("embedding_url is required".into());
        assert!(err.to_string().contains("invalid provider config"));
        assert!(err.to_string().contains("embedding_url"));
    }

    #[test]
    fn api_error_carries_status() {
        let err = ProviderError::Api {
            status: 503,
            message: "model loading".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("model loading"));
    }

    #[test]
    fn decode_error_message() {
        let err = ProviderError::Decode("expected array of floats".into());
        assert!(err.to_string().contains("unexpected provider response"));
    }
}
