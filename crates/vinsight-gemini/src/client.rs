//! Gemini API client.
//!
//! Covers the slice of the API this service needs: the Files API
//! (upload, status refresh, delete) and generateContent with
//! persona-specific system instructions, plus typed helpers that run
//! structured responses through the normalizer.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use vinsight_models::{AnalysisResult, ScoreResult, TranscriptResult};

use crate::error::{GeminiError, GeminiResult};
use crate::normalize;
use crate::prompts::{self, Persona};
use crate::readiness::ReadinessGate;
use crate::types::{
    Content, GenerateRequest, GenerateResponse, GenerationPart, Part, RemoteFile,
    UploadFileResponse,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Base URL (overridable for tests)
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum activation polls before giving up
    pub activation_retries: u32,
    /// Wait between activation polls
    pub poll_delay: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(300), // generation over video is slow
            activation_retries: 5,
            poll_delay: Duration::from_secs(5),
        }
    }
}

impl GeminiConfig {
    /// Create config from environment variables.
    ///
    /// `GEMINI_API_KEY` is required; everything else has defaults.
    pub fn from_env() -> GeminiResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::config("GEMINI_API_KEY not set"))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(300),
            ),
            activation_retries: std::env::var("GEMINI_ACTIVATION_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            poll_delay: Duration::from_secs(
                std::env::var("GEMINI_POLL_DELAY_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        })
    }
}

/// Client for the Gemini Files and generateContent APIs.
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(config: GeminiConfig) -> GeminiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GeminiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GeminiResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }

    /// Upload a local video file.
    ///
    /// The returned handle usually starts in `Processing`; callers must
    /// run it through [`GeminiClient::wait_until_active`] before using
    /// it in a generation request.
    pub async fn upload_file(&self, path: impl AsRef<Path>) -> GeminiResult<RemoteFile> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let mime_type = mime_for_path(path);

        info!(
            path = %path.display(),
            size_mb = bytes.len() as f64 / (1024.0 * 1024.0),
            mime_type,
            "Uploading file to Gemini"
        );

        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.config.base_url, self.config.api_key
        );

        let response = self
            .http
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("Content-Type", mime_type)
            .body(bytes)
            .send()
            .await?;

        let envelope: UploadFileResponse = Self::decode(response).await?;
        debug!(name = %envelope.file.name, state = ?envelope.file.state, "Upload accepted");
        Ok(envelope.file)
    }

    /// Re-fetch the current state of an uploaded file.
    pub async fn get_file(&self, name: &str) -> GeminiResult<RemoteFile> {
        let url = format!(
            "{}/v1beta/{}?key={}",
            self.config.base_url, name, self.config.api_key
        );
        let response = self.http.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Delete an uploaded file.
    pub async fn delete_file(&self, name: &str) -> GeminiResult<()> {
        let url = format!(
            "{}/v1beta/{}?key={}",
            self.config.base_url, name, self.config.api_key
        );
        let response = self.http.delete(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::RequestFailed { status, body });
        }
        Ok(())
    }

    /// Block until the file is usable in generation requests.
    ///
    /// Polls with the configured budget and delay; timeout and an
    /// explicit `FAILED` state are reported as distinct errors.
    pub async fn wait_until_active(&self, file: &RemoteFile) -> GeminiResult<()> {
        let gate = ReadinessGate::new(self.config.activation_retries, self.config.poll_delay);
        gate.await_ready(|| async {
            let refreshed = self.get_file(&file.name).await?;
            Ok(refreshed.state)
        })
        .await
    }

    /// Issue a generation request and return the raw response text.
    pub async fn generate(
        &self,
        persona: Persona,
        parts: Vec<GenerationPart>,
    ) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let wire_parts = parts
            .into_iter()
            .map(|p| match p {
                GenerationPart::Text(text) => Part::text(text),
                GenerationPart::File { uri, mime_type } => Part::file(uri, mime_type),
            })
            .collect();

        let request = GenerateRequest {
            contents: vec![Content { parts: wire_parts }],
            system_instruction: Content {
                parts: vec![Part::text(persona.system_instruction())],
            },
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let body: GenerateResponse = Self::decode(response).await?;

        body.candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or(GeminiError::EmptyResponse)
    }

    /// Transcribe and translate a video.
    pub async fn transcribe(&self, file: &RemoteFile) -> GeminiResult<TranscriptResult> {
        let text = self
            .generate(
                Persona::Transcription,
                vec![
                    GenerationPart::text(prompts::TRANSCRIBE_PROMPT),
                    GenerationPart::file(file),
                ],
            )
            .await?;
        normalize::parse_structured(&text)
    }

    /// Run visual/content analysis over a video.
    ///
    /// The remote file is deleted afterwards; analysis is the last call
    /// that needs it. Deletion failures are logged, not fatal.
    pub async fn analyze_content(&self, file: &RemoteFile) -> GeminiResult<AnalysisResult> {
        let text = self
            .generate(
                Persona::Vision,
                vec![
                    GenerationPart::text(prompts::ANALYZE_PROMPT),
                    GenerationPart::file(file),
                ],
            )
            .await?;

        if let Err(e) = self.delete_file(&file.name).await {
            warn!(name = %file.name, error = %e, "Failed to delete remote file");
        }

        normalize::parse_structured(&text)
    }

    /// Score a transcript for educational content.
    pub async fn classify(&self, transcript: &str) -> GeminiResult<ScoreResult> {
        let text = self
            .generate(
                Persona::Content,
                vec![GenerationPart::text(prompts::classify_prompt(transcript))],
            )
            .await?;
        normalize::parse_structured(&text)
    }

    /// Free-text generation with the content persona.
    ///
    /// Used for summaries, roadmaps and chat replies, which are
    /// displayed verbatim and never normalized.
    pub async fn generate_text(&self, prompt: impl Into<String>) -> GeminiResult<String> {
        self.generate(Persona::Content, vec![GenerationPart::Text(prompt.into())])
            .await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> GeminiResult<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::RequestFailed { status, body });
        }
        Ok(response.json().await?)
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("webm") => "video/webm",
        Some("mkv") => "video/x-matroska",
        _ => "video/mp4",
    }
}
