use std::sync::Arc;
use std::time::SystemTime;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::error::ServerResult;
use crate::state::ServerState;

static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

fn uptime_seconds() -> u64 {
    SERVER_START_TIME.elapsed().map(|d| d.as_secs()).unwrap_or(0)
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "topic-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
    }))
}

/// Readiness probe. Also reports the current registry size, which is the one
/// piece of state an operator cares about after a restart (the registry is
/// in-memory only and starts empty).
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let topic_count = state.registry.read().await.len();

    Ok(Json(json!({
        "status": "ready",
        "service": "topic-server",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds(),
        "provider_mode": state.config.provider.mode,
        "topic_count": topic_count,
    })))
}

/// Prometheus metrics endpoint, rendered from the installed recorder.
pub async fn metrics_export(State(state): State<Arc<ServerState>>) -> String {
    state.metrics.render()
}
