//! Per-session state.
//!
//! Each browser session owns an explicit context object: the currently
//! selected video, its latest transcript and analysis, the chosen
//! audience, and per-video chat history. Sessions are created on first
//! touch and never shared across session ids; only one request per
//! session is expected in flight at a time, so a store-wide RwLock is
//! enough.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::RwLock;

use vinsight_models::{AnalysisResult, ChatTurn, TranscriptResult, VideoContext, VideoId};

/// Default audience before analysis offers options.
pub const DEFAULT_AUDIENCE: &str = "General";

/// State scoped to one interactive session.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub current_video: Option<VideoContext>,
    pub transcript: Option<TranscriptResult>,
    pub analysis: Option<AnalysisResult>,
    pub audience: String,
    /// Chat history per video identity, append-only
    pub chat_history: HashMap<String, Vec<ChatTurn>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            current_video: None,
            transcript: None,
            analysis: None,
            audience: DEFAULT_AUDIENCE.to_string(),
            chat_history: HashMap::new(),
        }
    }
}

impl Session {
    /// Select a new input source.
    ///
    /// Switching identity clears the chat slot for the new video and
    /// drops results derived from the previous source.
    pub fn select_source(&mut self, context: VideoContext) {
        let changed = self
            .current_video
            .as_ref()
            .map(|v| v.video_id != context.video_id)
            .unwrap_or(true);

        if changed {
            self.chat_history
                .insert(context.video_id.to_string(), Vec::new());
            self.transcript = None;
            self.analysis = None;
        }
        self.current_video = Some(context);
    }

    /// Identity of the currently-selected video, if any.
    pub fn current_video_id(&self) -> Option<&VideoId> {
        self.current_video.as_ref().map(|v| &v.video_id)
    }

    /// Chat history for the current video (empty if none).
    pub fn current_chat(&self) -> &[ChatTurn] {
        self.current_video_id()
            .and_then(|id| self.chat_history.get(id.as_str()))
            .map(|turns| turns.as_slice())
            .unwrap_or(&[])
    }
}

/// In-memory session store, keyed by session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against a session, creating it on first touch.
    pub async fn with_session<F, T>(&self, session_id: &str, f: F) -> T
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(session_id.to_string()).or_default();
        f(session)
    }

    /// Clone the current state of a session, if it exists.
    pub async fn snapshot(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(id: &str) -> VideoContext {
        VideoContext::new(VideoId::from_source(id), format!("downloads/{id}"))
    }

    #[tokio::test]
    async fn test_session_created_on_first_touch() {
        let store = SessionStore::new();
        assert!(store.snapshot("s1").await.is_none());

        let audience = store.with_session("s1", |s| s.audience.clone()).await;
        assert_eq!(audience, DEFAULT_AUDIENCE);
        assert!(store.snapshot("s1").await.is_some());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        store
            .with_session("a", |s| s.audience = "Students".to_string())
            .await;

        let b_audience = store.with_session("b", |s| s.audience.clone()).await;
        assert_eq!(b_audience, DEFAULT_AUDIENCE);
    }

    #[test]
    fn test_switching_source_resets_derived_state() {
        let mut session = Session::default();
        session.select_source(context("one.mp4"));
        session.transcript = Some(TranscriptResult {
            original_text: "t".into(),
            translated_text: "t".into(),
            original_language: "en".into(),
        });
        session
            .chat_history
            .get_mut("one.mp4_id")
            .unwrap()
            .push(ChatTurn::user("hi"));

        session.select_source(context("two.mp4"));

        assert!(session.transcript.is_none());
        assert!(session.current_chat().is_empty());
        // History for the previous identity is kept, only the new slot is fresh
        assert_eq!(session.chat_history.get("one.mp4_id").unwrap().len(), 1);
    }

    #[test]
    fn test_reselecting_same_source_keeps_state() {
        let mut session = Session::default();
        session.select_source(context("one.mp4"));
        session
            .chat_history
            .get_mut("one.mp4_id")
            .unwrap()
            .push(ChatTurn::user("hi"));

        session.select_source(context("one.mp4"));
        assert_eq!(session.current_chat().len(), 1);
    }
}
