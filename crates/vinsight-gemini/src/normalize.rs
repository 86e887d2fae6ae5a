//! Best-effort extraction of a JSON object from model output.
//!
//! Generation responses are free text that is supposed to contain one
//! JSON object, usually wrapped in a fenced code block and sometimes
//! carrying literal control characters inside string values. This
//! module is deliberately permissive: there is no fallback if the
//! first parse attempt fails, so extraction maximizes the chance of
//! success rather than insisting on clean input.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{GeminiError, GeminiResult};

/// Extract and parse the JSON object embedded in `raw`.
///
/// Fence delimiters are stripped whether or not they are balanced,
/// control characters (U+0000–U+001F, U+007F–U+009F) are replaced by
/// spaces, and the span from the first `{` to the last `}` is parsed.
/// Every failure mode yields [`GeminiError::MalformedResponse`].
pub fn extract_object(raw: &str) -> GeminiResult<Map<String, Value>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let cleaned: String = cleaned
        .chars()
        .map(|c| if is_control(c) { ' ' } else { c })
        .collect();

    let start = cleaned
        .find('{')
        .ok_or_else(|| GeminiError::malformed("no JSON object in response"))?;
    let end = cleaned
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| GeminiError::malformed("no JSON object in response"))?;

    serde_json::from_str(&cleaned[start..=end])
        .map_err(|e| GeminiError::malformed(format!("invalid JSON object: {e}")))
}

/// Extract the embedded object and deserialize it into `T`.
///
/// Missing or mistyped fields are reported explicitly instead of
/// surfacing later as lookups on an untyped map.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> GeminiResult<T> {
    let object = extract_object(raw)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| GeminiError::malformed(format!("unexpected response shape: {e}")))
}

fn is_control(c: char) -> bool {
    let code = c as u32;
    code <= 0x1F || (0x7F..=0x9F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinsight_models::{AnalysisResult, ScoreResult, TranscriptResult};

    #[test]
    fn test_fenced_score_object() {
        let raw = "```json\n{\"Score\": 0.82}\n```";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("Score").unwrap().as_f64(), Some(0.82));

        let score: ScoreResult = parse_structured(raw).unwrap();
        assert!((score.score - 0.82).abs() < f64::EPSILON);
    }

    #[test]
    fn test_object_embedded_in_prose() {
        let raw = r#"Here you go: {"genre": "comedy", "key_elements": ["dance","music"]} Hope that helps!"#;
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("genre").unwrap().as_str(), Some("comedy"));
        assert_eq!(
            object.get("key_elements").unwrap().as_array().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_plain_object_matches_direct_parse() {
        let raw = r#"{"genre": "drama", "mood": "tense"}"#;
        let object = extract_object(raw).unwrap();
        let direct: Map<String, Value> = serde_json::from_str(raw).unwrap();
        assert_eq!(object, direct);
    }

    #[test]
    fn test_control_characters_become_spaces() {
        // A literal newline inside a string value would break a strict parse
        let raw = "{\"Original_text\": \"line one\nline two\", \"Translated_text\": \"line one\nline two\", \"Original_language\": \"en\"}";
        let t: TranscriptResult = parse_structured(raw).unwrap();
        assert_eq!(t.original_text, "line one line two");
    }

    #[test]
    fn test_unbalanced_fence_tolerated() {
        let raw = "```json\n{\"Score\": 0.5}";
        let object = extract_object(raw).unwrap();
        assert_eq!(object.get("Score").unwrap().as_f64(), Some(0.5));
    }

    #[test]
    fn test_no_braces_fails() {
        let err = extract_object("nothing structured here").unwrap_err();
        assert!(matches!(err, GeminiError::MalformedResponse(_)));

        let err = extract_object("only an opening { brace").unwrap_err();
        assert!(matches!(err, GeminiError::MalformedResponse(_)));
    }

    #[test]
    fn test_malformed_json_fails() {
        let err = extract_object("{\"genre\": }").unwrap_err();
        assert!(matches!(err, GeminiError::MalformedResponse(_)));
    }

    #[test]
    fn test_idempotent() {
        let raw = "```json\n{\"mood\": \"calm\", \"genre\": \"vlog\"}\n```";
        let first = extract_object(raw).unwrap();
        let second = extract_object(raw).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_field_reported_explicitly() {
        let raw = r#"{"genre": "comedy"}"#;
        let err = parse_structured::<AnalysisResult>(raw).unwrap_err();
        match err {
            GeminiError::MalformedResponse(msg) => assert!(msg.contains("mood")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_outermost_brace_span_is_greedy() {
        // Surrounding prose braces are folded into the span; the parse
        // then fails, which is the documented compatibility behavior.
        let raw = "{unrelated} {\"Score\": 0.9}";
        assert!(extract_object(raw).is_err());
    }
}
