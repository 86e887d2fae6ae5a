//! Application state.

use std::sync::Arc;

use vinsight_gemini::GeminiClient;

use crate::config::ApiConfig;
use crate::services::InsightService;
use crate::sessions::SessionStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub sessions: Arc<SessionStore>,
    pub insight: InsightService,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let gemini = Arc::new(GeminiClient::from_env()?);
        let sessions = Arc::new(SessionStore::new());
        let insight = InsightService::new(
            gemini,
            Arc::clone(&sessions),
            config.downloads_dir.clone(),
        );

        Ok(Self {
            config,
            sessions,
            insight,
        })
    }
}
