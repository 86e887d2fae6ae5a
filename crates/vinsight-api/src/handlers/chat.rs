//! Chat handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vinsight_models::ChatTurn;

use crate::error::{ApiError, ApiResult};
use crate::services::ChatOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub history: Vec<ChatTurn>,
}

/// Ask a question about the processed video.
pub async fn send_chat_message(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("message must not be empty"));
    }

    let ChatOutcome { reply, history } =
        state.insight.chat(&session_id, &request.message).await?;

    Ok(Json(ChatResponse { reply, history }))
}

#[derive(Serialize)]
pub struct ChatHistoryResponse {
    pub history: Vec<ChatTurn>,
}

/// Chat history for the current video.
pub async fn get_chat_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ChatHistoryResponse>> {
    let history = state.insight.chat_history(&session_id).await?;
    Ok(Json(ChatHistoryResponse { history }))
}
