//! HTTP API for the topic-match recommendation service.
//!
//! Thin axum layer over the engine. It owns process concerns — configuration,
//! shared state, middleware, CORS, shutdown — and keeps the route handlers
//! small: parse the request, take a registry guard or snapshot, call the
//! engine, shape the response.
//!
//! # Endpoints
//!
//! - `POST /initialize-topics` — extract and register topics from texts
//! - `POST /recommend` — rank group and resource candidates for a user
//! - `POST /mask-toxic` — toxicity screening for a sentence
//! - `GET /`, `GET /health`, `GET /ready` — service info and probes
//! - `GET /metrics` — Prometheus metrics
//!
//! # Quick start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
