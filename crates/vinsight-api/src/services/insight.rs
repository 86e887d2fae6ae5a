//! Video insight orchestration.
//!
//! Drives the full pipeline for one session: select an input source,
//! push the file through Gemini's upload/activation lifecycle, derive
//! the transcript/classification/analysis, and serve the downstream
//! artifacts (summary, roadmap, similar content, chat) from the
//! session state. Each user action runs to completion before the next
//! one is handled; there is no cancellation.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use vinsight_gemini::{FileState, GeminiClient};
use vinsight_models::{
    AnalysisResult, ChatTurn, TranscriptResult, VideoContext, VideoId, VideoKind,
};

use crate::error::{ApiError, ApiResult};
use crate::sessions::{Session, SessionStore};

/// Result of processing a video end to end.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub video_id: VideoId,
    pub kind: VideoKind,
    pub score: f64,
    pub transcript: TranscriptResult,
    pub analysis: AnalysisResult,
}

/// Transcript as presented to the user.
///
/// The translation is only included when the original language is not
/// English.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptView {
    pub original_language: String,
    pub original_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

/// Reply to one chat message plus the updated history.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub history: Vec<ChatTurn>,
}

/// Orchestrates the processing workflow over the session store.
#[derive(Clone)]
pub struct InsightService {
    gemini: Arc<GeminiClient>,
    sessions: Arc<SessionStore>,
    downloads_dir: PathBuf,
}

impl InsightService {
    pub fn new(
        gemini: Arc<GeminiClient>,
        sessions: Arc<SessionStore>,
        downloads_dir: PathBuf,
    ) -> Self {
        Self {
            gemini,
            sessions,
            downloads_dir,
        }
    }

    /// Select a Google Drive link as the session's input source.
    ///
    /// Downloads the file into the downloads directory and resets the
    /// session slots keyed by the derived video identity.
    pub async fn select_drive_source(
        &self,
        session_id: &str,
        drive_url: &str,
    ) -> ApiResult<VideoContext> {
        let path = vinsight_media::download_drive_file(drive_url, &self.downloads_dir).await?;
        let context = VideoContext::new(
            VideoId::from_source(drive_url),
            path.to_string_lossy().to_string(),
        );
        self.select(session_id, context.clone()).await;
        Ok(context)
    }

    /// Select a directly-uploaded file as the session's input source.
    pub async fn select_upload_source(
        &self,
        session_id: &str,
        filename: &str,
        data: &[u8],
    ) -> ApiResult<VideoContext> {
        let sanitized = vinsight_media::sanitize_filename(filename);
        let path = vinsight_media::save_upload(&self.downloads_dir, filename, data).await?;
        let context = VideoContext::new(
            VideoId::from_source(&sanitized),
            path.to_string_lossy().to_string(),
        );
        self.select(session_id, context.clone()).await;
        Ok(context)
    }

    async fn select(&self, session_id: &str, context: VideoContext) {
        info!(session_id, video_id = %context.video_id, "Input source selected");
        self.sessions
            .with_session(session_id, |s| s.select_source(context))
            .await;
    }

    /// Run the processing pipeline for the session's selected video.
    ///
    /// Upload (with one automatic re-upload on an immediate FAILED),
    /// readiness gate, transcription, classification, then vision
    /// analysis. Any failure aborts the workflow; no partial results
    /// are stored.
    pub async fn process(&self, session_id: &str) -> ApiResult<ProcessOutcome> {
        let context = self
            .sessions
            .snapshot(session_id)
            .await
            .and_then(|s| s.current_video)
            .ok_or_else(|| ApiError::conflict("no input source selected"))?;

        info!(session_id, video_id = %context.video_id, "Processing video");

        let mut file = self.gemini.upload_file(&context.local_path).await?;
        if file.state == FileState::Failed {
            warn!(name = %file.name, "Upload reported FAILED immediately, re-uploading once");
            file = self.gemini.upload_file(&context.local_path).await?;
        }
        self.gemini.wait_until_active(&file).await?;

        let transcript = self.gemini.transcribe(&file).await?;
        let score = self.gemini.classify(&transcript.translated_text).await?;
        let kind = VideoKind::from_score(score.score);
        let analysis = self.gemini.analyze_content(&file).await?;

        info!(session_id, %kind, score = score.score, "Video processed");

        {
            let transcript = transcript.clone();
            let analysis = analysis.clone();
            self.sessions
                .with_session(session_id, move |s| {
                    if let Some(video) = &mut s.current_video {
                        video.kind = Some(kind);
                    }
                    s.transcript = Some(transcript);
                    s.analysis = Some(analysis);
                })
                .await;
        }

        Ok(ProcessOutcome {
            video_id: context.video_id,
            kind,
            score: score.score,
            transcript,
            analysis,
        })
    }

    /// Generate a free-text summary for the processed video.
    pub async fn summary(&self, session_id: &str) -> ApiResult<String> {
        let session = self.processed_session(session_id).await?;
        let kind = self.require_kind(&session)?;

        let prompt = match kind {
            VideoKind::Knowledge => {
                let transcript = self.require_transcript(&session)?;
                format!(
                    "Provide comprehensive and detailed summary for {} for the provided text\n\n{}",
                    session.audience, transcript.translated_text
                )
            }
            VideoKind::Entertainment => {
                let analysis = self.require_analysis(&session)?;
                format!(
                    "Provide comprehensive and detailed entertainment analysis summary for the provided text\n\n{}",
                    to_json(analysis)?
                )
            }
        };

        Ok(self.gemini.generate_text(prompt).await?)
    }

    /// Generate a learning roadmap; knowledge content only.
    pub async fn roadmap(&self, session_id: &str) -> ApiResult<String> {
        let session = self.processed_session(session_id).await?;
        if self.require_kind(&session)? != VideoKind::Knowledge {
            return Err(ApiError::conflict(
                "roadmap is only available for knowledge content",
            ));
        }
        let transcript = self.require_transcript(&session)?;

        let prompt = format!(
            "Create learning roadmap for {}\nTranscript: {}",
            session.audience, transcript.translated_text
        );
        Ok(self.gemini.generate_text(prompt).await?)
    }

    /// Similar-content recommendations; entertainment content only.
    ///
    /// Served from the stored analysis, no model call.
    pub async fn similar_content(&self, session_id: &str) -> ApiResult<AnalysisResult> {
        let session = self.processed_session(session_id).await?;
        if self.require_kind(&session)? != VideoKind::Entertainment {
            return Err(ApiError::conflict(
                "similar content is only available for entertainment content",
            ));
        }
        Ok(self.require_analysis(&session)?.clone())
    }

    /// Transcript view for the processed video.
    pub async fn transcript(&self, session_id: &str) -> ApiResult<TranscriptView> {
        let session = self.processed_session(session_id).await?;
        let transcript = self.require_transcript(&session)?;

        Ok(TranscriptView {
            original_language: transcript.original_language.clone(),
            original_text: transcript.original_text.clone(),
            translated_text: if transcript.is_english() {
                None
            } else {
                Some(transcript.translated_text.clone())
            },
        })
    }

    /// Answer one chat message in the context of the processed video.
    ///
    /// The user turn is appended before the model call, the assistant
    /// turn after; a failed model call rolls the user turn back so the
    /// history keeps alternating user/assistant.
    pub async fn chat(&self, session_id: &str, message: &str) -> ApiResult<ChatOutcome> {
        let session = self.processed_session(session_id).await?;
        let kind = self.require_kind(&session)?;
        let video_id = session
            .current_video_id()
            .ok_or_else(|| ApiError::conflict("no input source selected"))?
            .to_string();

        let context_text = match kind {
            VideoKind::Knowledge => self.require_transcript(&session)?.translated_text.clone(),
            VideoKind::Entertainment => to_json(self.require_analysis(&session)?)?,
        };

        {
            let video_id = video_id.clone();
            let turn = ChatTurn::user(message);
            self.sessions
                .with_session(session_id, move |s| {
                    s.chat_history.entry(video_id).or_default().push(turn);
                })
                .await;
        }

        let prompt = format!(
            "Answer the question from the given context with respect to the given set of audience\nAudience: {}\nQuestion: {}\nContext: {}",
            session.audience, message, context_text
        );

        // Roll the user turn back if no reply arrives, so history keeps
        // alternating strictly
        let reply = match self.gemini.generate_text(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                let video_id = video_id.clone();
                self.sessions
                    .with_session(session_id, move |s| {
                        if let Some(turns) = s.chat_history.get_mut(&video_id) {
                            turns.pop();
                        }
                    })
                    .await;
                return Err(e.into());
            }
        };

        let history = {
            let video_id = video_id.clone();
            let turn = ChatTurn::assistant(reply.clone());
            self.sessions
                .with_session(session_id, move |s| {
                    let turns = s.chat_history.entry(video_id).or_default();
                    turns.push(turn);
                    turns.clone()
                })
                .await
        };

        Ok(ChatOutcome { reply, history })
    }

    /// Chat history for the current video.
    pub async fn chat_history(&self, session_id: &str) -> ApiResult<Vec<ChatTurn>> {
        let session = self.require_session(session_id).await?;
        Ok(session.current_chat().to_vec())
    }

    /// Set the target audience for generated artifacts.
    pub async fn set_audience(&self, session_id: &str, audience: &str) -> ApiResult<String> {
        let audience = audience.trim();
        if audience.is_empty() {
            return Err(ApiError::bad_request("audience must not be empty"));
        }

        let audience = audience.to_string();
        Ok(self
            .sessions
            .with_session(session_id, move |s| {
                s.audience = audience;
                s.audience.clone()
            })
            .await)
    }

    /// Session snapshot for read paths.
    pub async fn session(&self, session_id: &str) -> ApiResult<Session> {
        self.require_session(session_id).await
    }

    async fn require_session(&self, session_id: &str) -> ApiResult<Session> {
        self.sessions
            .snapshot(session_id)
            .await
            .ok_or_else(|| ApiError::not_found(format!("unknown session {session_id}")))
    }

    async fn processed_session(&self, session_id: &str) -> ApiResult<Session> {
        let session = self.require_session(session_id).await?;
        if session.current_video.is_none() {
            return Err(ApiError::conflict("no input source selected"));
        }
        Ok(session)
    }

    fn require_kind(&self, session: &Session) -> ApiResult<VideoKind> {
        session
            .current_video
            .as_ref()
            .and_then(|v| v.kind)
            .ok_or_else(|| ApiError::conflict("video has not been processed yet"))
    }

    fn require_transcript<'a>(&self, session: &'a Session) -> ApiResult<&'a TranscriptResult> {
        session
            .transcript
            .as_ref()
            .ok_or_else(|| ApiError::conflict("no transcript available"))
    }

    fn require_analysis<'a>(&self, session: &'a Session) -> ApiResult<&'a AnalysisResult> {
        session
            .analysis
            .as_ref()
            .ok_or_else(|| ApiError::conflict("no analysis available"))
    }
}

fn to_json<T: Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::internal(e.to_string()))
}
