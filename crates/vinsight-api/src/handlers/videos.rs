//! Input-source and processing handlers.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vinsight_models::{VideoId, VideoKind};

use crate::error::{ApiError, ApiResult};
use crate::services::{ProcessOutcome, TranscriptView};
use crate::state::AppState;

/// Accepted upload container extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm", "mkv"];

/// Select a Drive URL as input source.
#[derive(Debug, Deserialize)]
pub struct SourceRequest {
    pub drive_url: String,
}

/// Response after selecting an input source.
#[derive(Serialize)]
pub struct SourceResponse {
    pub video_id: VideoId,
    pub local_path: String,
}

/// Select a Google Drive sharing link as the session's input.
pub async fn select_source(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<SourceRequest>,
) -> ApiResult<Json<SourceResponse>> {
    let context = state
        .insight
        .select_drive_source(&session_id, &request.drive_url)
        .await?;

    Ok(Json(SourceResponse {
        video_id: context.video_id,
        local_path: context.local_path,
    }))
}

/// Upload a video file as the session's input (multipart `file` field).
pub async fn upload_source(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<SourceResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|n| n.to_string())
            .ok_or_else(|| ApiError::bad_request("upload is missing a file name"))?;
        validate_extension(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;

        let context = state
            .insight
            .select_upload_source(&session_id, &filename, &data)
            .await?;

        return Ok(Json(SourceResponse {
            video_id: context.video_id,
            local_path: context.local_path,
        }));
    }

    Err(ApiError::bad_request("no file field in upload"))
}

fn validate_extension(filename: &str) -> ApiResult<()> {
    let ok = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| VIDEO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    if ok {
        Ok(())
    } else {
        Err(ApiError::bad_request(format!(
            "unsupported file type, expected one of: {}",
            VIDEO_EXTENSIONS.join(", ")
        )))
    }
}

/// Response for a completed processing run.
#[derive(Serialize)]
pub struct ProcessResponse {
    pub video_id: VideoId,
    pub kind: VideoKind,
    pub score: f64,
    /// Tabs to offer, depending on classification
    pub sections: Vec<&'static str>,
}

/// Run the processing pipeline on the selected video.
pub async fn process_video(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<ProcessResponse>> {
    let ProcessOutcome { video_id, kind, score, .. } = state.insight.process(&session_id).await?;

    let sections = match kind {
        VideoKind::Knowledge => vec!["Summary", "Roadmap", "Transcript", "Chat"],
        VideoKind::Entertainment => vec!["Summary", "Similar Content", "Transcript", "Chat"],
    };

    Ok(Json(ProcessResponse {
        video_id,
        kind,
        score,
        sections,
    }))
}

/// Get the transcript of the processed video.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<TranscriptView>> {
    Ok(Json(state.insight.transcript(&session_id).await?))
}
