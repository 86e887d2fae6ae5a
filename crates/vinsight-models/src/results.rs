//! Typed results extracted from model responses.
//!
//! The generation prompts ask the model for strict JSON with specific
//! keys. Field names here match that wire contract (the transcript and
//! score prompts use capitalized keys); lowercase aliases are accepted
//! since the model does not always follow the casing exactly. Missing
//! required keys surface as deserialization errors at the extraction
//! boundary rather than panics downstream.

use serde::{Deserialize, Serialize};

/// Transcription + translation record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    /// Transcript in the spoken language
    #[serde(rename = "Original_text", alias = "original_text")]
    pub original_text: String,

    /// English translation (identical to the original for English videos)
    #[serde(rename = "Translated_text", alias = "translated_text")]
    pub translated_text: String,

    /// Language tag or name reported by the model ("en", "Spanish", ...)
    #[serde(rename = "Original_language", alias = "original_language")]
    pub original_language: String,
}

impl TranscriptResult {
    /// Whether the original audio is already in English.
    ///
    /// Compares the normalized language tag against "en"/"english"; the
    /// translation pane is only worth showing when this is false.
    pub fn is_english(&self) -> bool {
        let lang = self.original_language.trim().to_lowercase();
        lang == "en" || lang == "english" || lang.starts_with("en-")
    }
}

/// Visual/content analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub genre: String,

    pub mood: String,

    #[serde(default)]
    pub similar_content_suggestions: Vec<String>,

    #[serde(default)]
    pub key_elements: Vec<String>,

    #[serde(default)]
    pub audience_options: Vec<String>,
}

/// Educational-content classification score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score in `[0, 1]`, higher means more educational
    #[serde(rename = "Score", alias = "score")]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_wire_names() {
        let json = r#"{
            "Original_text": "hola",
            "Translated_text": "hello",
            "Original_language": "Spanish"
        }"#;
        let t: TranscriptResult = serde_json::from_str(json).unwrap();
        assert_eq!(t.original_text, "hola");
        assert!(!t.is_english());
    }

    #[test]
    fn test_transcript_lowercase_aliases() {
        let json = r#"{
            "original_text": "hi",
            "translated_text": "hi",
            "original_language": "en"
        }"#;
        let t: TranscriptResult = serde_json::from_str(json).unwrap();
        assert!(t.is_english());
    }

    #[test]
    fn test_transcript_missing_field_is_error() {
        let json = r#"{"Original_text": "hi", "Translated_text": "hi"}"#;
        let err = serde_json::from_str::<TranscriptResult>(json).unwrap_err();
        assert!(err.to_string().contains("Original_language"));
    }

    #[test]
    fn test_is_english_variants() {
        let mut t = TranscriptResult {
            original_text: String::new(),
            translated_text: String::new(),
            original_language: "English".to_string(),
        };
        assert!(t.is_english());
        t.original_language = " EN ".to_string();
        assert!(t.is_english());
        t.original_language = "en-US".to_string();
        assert!(t.is_english());
        t.original_language = "French".to_string();
        assert!(!t.is_english());
    }

    #[test]
    fn test_analysis_optional_arrays_default() {
        let json = r#"{"genre": "comedy", "mood": "upbeat"}"#;
        let a: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(a.key_elements.is_empty());
        assert!(a.audience_options.is_empty());
    }

    #[test]
    fn test_score_wire_name() {
        let s: ScoreResult = serde_json::from_str(r#"{"Score": 0.82}"#).unwrap();
        assert!((s.score - 0.82).abs() < f64::EPSILON);
        let s: ScoreResult = serde_json::from_str(r#"{"score": 0.3}"#).unwrap();
        assert!((s.score - 0.3).abs() < f64::EPSILON);
    }
}
