//! HTTP-level tests for the Gemini client against a mock server.

use std::io::Write;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vinsight_gemini::{FileState, GeminiClient, GeminiConfig, GeminiError, GenerationPart, Persona};

fn test_client(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        model: "gemini-2.0-flash".to_string(),
        timeout: Duration::from_secs(5),
        activation_retries: 3,
        poll_delay: Duration::from_millis(1),
    };
    GeminiClient::new(config).unwrap()
}

fn temp_video() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    file.write_all(b"not really a video").unwrap();
    file
}

fn file_json(state: &str) -> serde_json::Value {
    json!({
        "name": "files/abc-123",
        "uri": "https://example.com/v1beta/files/abc-123",
        "state": state,
        "mimeType": "video/mp4"
    })
}

#[tokio::test]
async fn test_upload_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .and(query_param("key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "file": file_json("PROCESSING") })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let video = temp_video();

    let file = client.upload_file(video.path()).await.unwrap();
    assert_eq!(file.name, "files/abc-123");
    assert_eq!(file.state, FileState::Processing);
}

#[tokio::test]
async fn test_upload_failure_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload/v1beta/files"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let video = temp_video();

    let err = client.upload_file(video.path()).await.unwrap_err();
    match err {
        GeminiError::RequestFailed { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_wait_until_active_polls_until_ready() {
    let server = MockServer::start().await;

    // First poll sees PROCESSING, second sees ACTIVE
    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("PROCESSING")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("ACTIVE")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = serde_json::from_value(file_json("PROCESSING")).unwrap();

    client.wait_until_active(&file).await.unwrap();
}

#[tokio::test]
async fn test_wait_until_active_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("PROCESSING")))
        .expect(3) // activation_retries polls, no more
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = serde_json::from_value(file_json("PROCESSING")).unwrap();

    let err = client.wait_until_active(&file).await.unwrap_err();
    assert!(matches!(
        err,
        GeminiError::ActivationTimeout { attempts: 3 }
    ));
}

#[tokio::test]
async fn test_wait_until_active_reports_failed_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1beta/files/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_json("FAILED")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = serde_json::from_value(file_json("PROCESSING")).unwrap();

    let err = client.wait_until_active(&file).await.unwrap_err();
    assert!(matches!(err, GeminiError::FileFailed));
}

#[tokio::test]
async fn test_generate_extracts_first_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "a plain summary" }] }
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let text = client
        .generate(Persona::Content, vec![GenerationPart::text("summarize")])
        .await
        .unwrap();
    assert_eq!(text, "a plain summary");
}

#[tokio::test]
async fn test_generate_empty_candidates_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.generate_text("hello").await.unwrap_err();
    assert!(matches!(err, GeminiError::EmptyResponse));
}

#[tokio::test]
async fn test_transcribe_normalizes_fenced_response() {
    let server = MockServer::start().await;

    let fenced = "```json\n{\"Original_text\": \"hola\", \"Translated_text\": \"hello\", \"Original_language\": \"Spanish\"}\n```";
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": fenced }] } }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = serde_json::from_value(file_json("ACTIVE")).unwrap();

    let transcript = client.transcribe(&file).await.unwrap();
    assert_eq!(transcript.original_text, "hola");
    assert_eq!(transcript.translated_text, "hello");
    assert!(!transcript.is_english());
}

#[tokio::test]
async fn test_analyze_content_deletes_remote_file() {
    let server = MockServer::start().await;

    let analysis = "{\"genre\": \"comedy\", \"mood\": \"light\", \"key_elements\": [\"dance\"]}";
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": analysis }] } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1beta/files/abc-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let file = serde_json::from_value(file_json("ACTIVE")).unwrap();

    let result = client.analyze_content(&file).await.unwrap();
    assert_eq!(result.genre, "comedy");
    assert_eq!(result.key_elements, vec!["dance"]);
}

#[tokio::test]
async fn test_classify_parses_score() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "```json\n{\"Score\": 0.82}\n```" }] } }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let score = client.classify("a lecture transcript").await.unwrap();
    assert!((score.score - 0.82).abs() < f64::EPSILON);
}
