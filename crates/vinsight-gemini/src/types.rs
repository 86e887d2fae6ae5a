//! Wire types for the Gemini Files and generateContent APIs.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an uploaded file on the Gemini side.
///
/// A file starts in `Processing`, becomes `Active` once usable in
/// generation requests, or ends in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
    #[serde(other)]
    Unspecified,
}

/// Handle to a file managed by the Gemini Files API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteFile {
    /// Resource name, e.g. `files/abc-123`; used to re-fetch status
    pub name: String,

    /// URI referenced in generation requests
    pub uri: String,

    pub state: FileState,

    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Response envelope of the media-upload endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadFileResponse {
    pub file: RemoteFile,
}

/// One part of a generation request, in caller order.
#[derive(Debug, Clone)]
pub enum GenerationPart {
    /// Prompt text
    Text(String),
    /// Reference to an uploaded file
    File { uri: String, mime_type: String },
}

impl GenerationPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn file(file: &RemoteFile) -> Self {
        Self::File {
            uri: file.uri.clone(),
            mime_type: file
                .mime_type
                .clone()
                .unwrap_or_else(|| "video/mp4".to_string()),
        }
    }
}

/// generateContent request body.
#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: Content,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "fileData", skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_data: None,
        }
    }

    pub fn file(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            text: None,
            file_data: Some(FileData {
                file_uri: uri.into(),
                mime_type: mime_type.into(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FileData {
    #[serde(rename = "fileUri")]
    pub file_uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// generateContent response body.
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponsePart {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_state_wire_names() {
        let s: FileState = serde_json::from_str("\"PROCESSING\"").unwrap();
        assert_eq!(s, FileState::Processing);
        let s: FileState = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(s, FileState::Active);
        // Unknown states are tolerated instead of failing the decode
        let s: FileState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(s, FileState::Unspecified);
    }

    #[test]
    fn test_part_serialization_skips_empty_arm() {
        let json = serde_json::to_string(&Part::text("hello")).unwrap();
        assert_eq!(json, r#"{"text":"hello"}"#);

        let json = serde_json::to_string(&Part::file("files/x", "video/mp4")).unwrap();
        assert!(json.contains("fileUri"));
        assert!(!json.contains("\"text\""));
    }
}
