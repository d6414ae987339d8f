use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ServerResult;
use crate::metrics::{
    TOPICS_DEDUPLICATED_TOTAL, TOPICS_INSERTED_TOTAL, TOPIC_REGISTRATION_FAILURES_TOTAL,
};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct InitializeTopicsRequest {
    /// Source texts to mine topics from. An empty list is a valid no-op.
    #[serde(default)]
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct InitializeTopicsResponse {
    pub message: String,
    /// Full current registry key set, in insertion order.
    pub topics: Vec<String>,
}

/// `POST /initialize-topics` — extract candidate topics from each text and
/// register them into the canonical set.
///
/// The write guard is held for the whole batch so concurrent recommendations
/// see either the registry before this call or after it, never mid-batch.
/// Per-item extraction or embedding failures are absorbed by the engine; the
/// response always reflects the registry that resulted.
pub async fn initialize_topics(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<InitializeTopicsRequest>,
) -> ServerResult<impl IntoResponse> {
    let mut registry = state.registry.write().await;
    let report = engine::initialize_topics(
        &request.texts,
        state.extractor.as_ref(),
        state.embedder.as_ref(),
        &mut registry,
    )
    .await;

    metrics::counter!(TOPICS_INSERTED_TOTAL).increment(report.inserted as u64);
    metrics::counter!(TOPICS_DEDUPLICATED_TOTAL).increment(report.duplicates as u64);
    metrics::counter!(TOPIC_REGISTRATION_FAILURES_TOTAL).increment(report.failures as u64);

    Ok(Json(InitializeTopicsResponse {
        message: "Topics initialized successfully.".to_string(),
        topics: registry.labels(),
    }))
}
