use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Text describing the user. Required and must be non-blank.
    #[serde(default)]
    pub user_text: Option<String>,
    /// Candidate group descriptions.
    #[serde(default)]
    pub group_texts: Vec<String>,
    /// Candidate resource descriptions.
    #[serde(default)]
    pub resource_texts: Vec<String>,
}

/// Scores serialize as `[text, score]` pairs, matching the original wire shape.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub groups: Vec<(String, f32)>,
    pub resources: Vec<(String, f32)>,
}

/// `POST /recommend` — rank the group and resource candidates for a user.
///
/// One registry snapshot is taken up front and reused for the user's score
/// vector and both rankings, so every candidate in this request is scored
/// against the same topic set even while a registration batch runs
/// concurrently. An empty registry is valid: everything scores 0.0 in input
/// order.
pub async fn recommend(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<RecommendRequest>,
) -> ServerResult<impl IntoResponse> {
    let user_text = request
        .user_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServerError::BadRequest("user_text is required".to_string()))?;

    let topics = state.registry.read().await.topics();

    let recommendations = engine::recommend(
        user_text,
        &request.group_texts,
        &request.resource_texts,
        &topics,
        state.embedder.as_ref(),
    )
    .await?;

    Ok(Json(RecommendResponse {
        groups: recommendations.groups,
        resources: recommendations.resources,
    }))
}
