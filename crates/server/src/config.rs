use providers::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Server configuration, loaded from an optional `topic-server` config file
/// overlaid with `TOPIC_SERVER__*` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds. Provider calls also carry their own
    /// client-side timeout; this is the outer bound per request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// The single origin allowed to call the POST endpoints from a browser.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Log filter directive for the tracing subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Expose Prometheus metrics at `GET /metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Model provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            allowed_origin: default_allowed_origin(),
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            provider: ProviderConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config file and environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("topic-server").required(false))
            .add_source(
                config::Environment::with_prefix("TOPIC_SERVER")
                    .prefix_separator("__")
                    .separator("__"),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// The socket address to bind to.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.bind_addr, self.port).parse()?)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5234
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_allowed_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
