use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// A category score above this marks the sentence as toxic.
const TOXICITY_DECISION_THRESHOLD: f32 = 0.5;

#[derive(Debug, Deserialize)]
pub struct MaskToxicRequest {
    #[serde(default)]
    pub sentence: String,
}

#[derive(Debug, Serialize)]
pub struct MaskToxicResponse {
    /// True when the sentence passed moderation (i.e. not toxic).
    pub success: bool,
    pub is_toxic: bool,
    pub scores: HashMap<String, f32>,
}

/// `POST /mask-toxic` — toxicity screening, independent of the topic and
/// recommendation core. The sentence is toxic iff any category score exceeds
/// 0.5.
pub async fn mask_toxic(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<MaskToxicRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.sentence.trim().is_empty() {
        return Err(ServerError::BadRequest("No text provided".to_string()));
    }

    let scores = state.classifier.classify(&request.sentence).await?;
    let is_toxic = scores.values().any(|&s| s > TOXICITY_DECISION_THRESHOLD);

    Ok(Json(MaskToxicResponse {
        success: !is_toxic,
        is_toxic,
        scores,
    }))
}
