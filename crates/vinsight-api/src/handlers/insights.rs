//! Derived-artifact handlers: summary, roadmap, similar content,
//! audience selection.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

/// Free-text summary of the processed video.
#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub async fn generate_summary(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SummaryResponse>> {
    let summary = state.insight.summary(&session_id).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Free-text learning roadmap (knowledge content only).
#[derive(Serialize)]
pub struct RoadmapResponse {
    pub roadmap: String,
}

pub async fn generate_roadmap(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<RoadmapResponse>> {
    let roadmap = state.insight.roadmap(&session_id).await?;
    Ok(Json(RoadmapResponse { roadmap }))
}

/// Similar-content recommendations (entertainment content only).
#[derive(Serialize)]
pub struct SimilarContentResponse {
    pub genre: String,
    pub key_elements: Vec<String>,
    pub suggestions: Vec<String>,
}

pub async fn get_similar_content(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SimilarContentResponse>> {
    let analysis = state.insight.similar_content(&session_id).await?;
    Ok(Json(SimilarContentResponse {
        genre: analysis.genre,
        key_elements: analysis.key_elements,
        suggestions: analysis.similar_content_suggestions,
    }))
}

/// Audience selection.
#[derive(Debug, Deserialize)]
pub struct AudienceRequest {
    pub audience: String,
}

#[derive(Serialize)]
pub struct AudienceResponse {
    pub audience: String,
    /// Options offered by the latest analysis, if any
    pub audience_options: Vec<String>,
}

pub async fn set_audience(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AudienceRequest>,
) -> ApiResult<Json<AudienceResponse>> {
    let audience = state
        .insight
        .set_audience(&session_id, &request.audience)
        .await?;
    let session = state.insight.session(&session_id).await?;

    Ok(Json(AudienceResponse {
        audience,
        audience_options: session
            .analysis
            .map(|a| a.audience_options)
            .unwrap_or_default(),
    }))
}
