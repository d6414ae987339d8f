//! HTTP endpoint implementations.
//!
//! - `topics`: topic extraction and registration
//! - `recommend`: ranked group/resource recommendations
//! - `moderation`: toxicity screening
//! - `health`: liveness and readiness probes, Prometheus metrics

pub mod health;
pub mod moderation;
pub mod recommend;
pub mod topics;

use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::{ServerError, ServerResult};

/// Root endpoint: service name, version, and routes.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "topic-match server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/initialize-topics",
            "/recommend",
            "/mask-toxic",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// Fallback for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
