//! Video identity and classification models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a video for caching and chat-history purposes.
///
/// Derived from the input-source descriptor (sanitized file name or the
/// entered URL) with a fixed `_id` suffix, so switching the source
/// changes the identity and resets the history slot keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(pub String);

impl VideoId {
    /// Derive a video ID from an input-source descriptor.
    pub fn from_source(descriptor: &str) -> Self {
        Self(format!("{descriptor}_id"))
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VideoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Content classification of a processed video.
///
/// Knowledge videos get a learning roadmap tab, entertainment videos a
/// similar-content tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoKind {
    Knowledge,
    Entertainment,
}

impl VideoKind {
    /// Classify from an educational-content score in `[0, 1]`.
    ///
    /// Strictly above 0.5 counts as knowledge content.
    pub fn from_score(score: f64) -> Self {
        if score > 0.5 {
            VideoKind::Knowledge
        } else {
            VideoKind::Entertainment
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VideoKind::Knowledge => "knowledge",
            VideoKind::Entertainment => "entertainment",
        }
    }
}

impl fmt::Display for VideoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The currently-selected video within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoContext {
    /// Derived video identity
    pub video_id: VideoId,

    /// Local path of the downloaded/uploaded file
    pub local_path: String,

    /// Classification, set once processing completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<VideoKind>,
}

impl VideoContext {
    /// Create a context for a freshly-selected source, not yet processed.
    pub fn new(video_id: VideoId, local_path: impl Into<String>) -> Self {
        Self {
            video_id,
            local_path: local_path.into(),
            kind: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_source() {
        let id = VideoId::from_source("video_abc123.mp4");
        assert_eq!(id.as_str(), "video_abc123.mp4_id");
    }

    #[test]
    fn test_kind_from_score_threshold() {
        assert_eq!(VideoKind::from_score(0.82), VideoKind::Knowledge);
        assert_eq!(VideoKind::from_score(0.51), VideoKind::Knowledge);
        // Exactly 0.5 is not knowledge content
        assert_eq!(VideoKind::from_score(0.5), VideoKind::Entertainment);
        assert_eq!(VideoKind::from_score(0.1), VideoKind::Entertainment);
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&VideoKind::Knowledge).unwrap();
        assert_eq!(json, "\"knowledge\"");
    }
}
