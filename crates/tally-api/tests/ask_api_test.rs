//! Integration tests for the question answering endpoint.
//!
//! The router is driven in-process with a scripted generation backend, so
//! no network or API key is needed.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use tally_api::{router, AppState, ServerConfig};
use tally_inference::MockGenerationBackend;

const BOUNDARY: &str = "tally-test-boundary";

const SCORES_CSV: &str = "name,answer,score\nalice,42,90\nbob,7,85\n";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        write!(body, "--{}\r\n", BOUNDARY).unwrap();
        match part {
            Part::Text(name, value) => {
                write!(
                    body,
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    name, value
                )
                .unwrap();
            }
            Part::File(name, file_name, bytes) => {
                write!(
                    body,
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )
                .unwrap();
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    write!(body, "--{}--\r\n", BOUNDARY).unwrap();
    body
}

fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

struct TestApp {
    app: Router,
    backend: MockGenerationBackend,
    upload_root: tempfile::TempDir,
}

impl TestApp {
    fn new(backend: MockGenerationBackend) -> Self {
        Self::with_config(backend, |_| {})
    }

    fn with_config(backend: MockGenerationBackend, tweak: impl FnOnce(&mut ServerConfig)) -> Self {
        let upload_root = tempfile::tempdir().unwrap();
        let mut config = ServerConfig {
            upload_dir: upload_root.path().to_path_buf(),
            ..ServerConfig::default()
        };
        tweak(&mut config);
        let state = AppState::new(Arc::new(backend.clone()), upload_root.path());
        Self {
            app: router(state, &config),
            backend,
            upload_root,
        }
    }

    async fn post(&self, parts: &[Part<'_>]) -> (StatusCode, Value) {
        self.send(parts, true).await
    }

    /// Post without a `content-length` header, as a chunked upload would.
    async fn post_chunked(&self, parts: &[Part<'_>]) -> (StatusCode, Value) {
        self.send(parts, false).await
    }

    async fn send(&self, parts: &[Part<'_>], with_length: bool) -> (StatusCode, Value) {
        let body = multipart_body(parts);
        let mut builder = Request::builder().method("POST").uri("/api").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
        if with_length {
            builder = builder.header(header::CONTENT_LENGTH, body.len());
        }
        let request = builder.body(Body::from(body)).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn upload_root_is_empty(&self) -> bool {
        dir_is_empty(self.upload_root.path())
    }
}

fn dir_is_empty(path: &Path) -> bool {
    std::fs::read_dir(path).unwrap().next().is_none()
}

#[tokio::test]
async fn test_missing_question_is_rejected() {
    let app = TestApp::new(MockGenerationBackend::new());

    let (status, body) = app.post(&[Part::Text("notes", "no question here")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "error": "Question is required" }));
    assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn test_empty_question_is_rejected_and_upload_removed() {
    let app = TestApp::new(MockGenerationBackend::new());

    let (status, body) = app
        .post(&[
            Part::Text("question", ""),
            Part::File("file", "scores.csv", SCORES_CSV.as_bytes()),
        ])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
    assert!(body.get("answer").is_none());
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_whitespace_question_is_answered() {
    let app = TestApp::new(MockGenerationBackend::new().with_fixed_response("?"));

    let (status, body) = app.post(&[Part::Text("question", "   ")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "answer": "?" }));
    assert_eq!(app.backend.call_count(), 1);
    assert!(app.backend.last_request().unwrap().prompt.ends_with("   "));
}

#[tokio::test]
async fn test_question_without_file_is_synthesized() {
    let app = TestApp::new(MockGenerationBackend::new().with_fixed_response("4"));

    let (status, body) = app.post(&[Part::Text("question", "What is 2+2?")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "answer": "4" }));

    let request = app.backend.last_request().unwrap();
    assert!(request.prompt.ends_with("What is 2+2?"));
    assert!(!request.prompt.contains("attached file"));
    assert_eq!(request.temperature, Some(0.0));
    assert!(request.system.is_some());
}

#[tokio::test]
async fn test_model_reply_is_cleaned() {
    let app = TestApp::new(
        MockGenerationBackend::new().with_fixed_response("Let me compute.\n\nAnswer: 12.5"),
    );

    let (status, body) = app.post(&[Part::Text("question", "Mean?")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "12.5");
}

#[tokio::test]
async fn test_csv_answer_column_is_returned_directly() {
    let app = TestApp::new(MockGenerationBackend::new());

    let (status, body) = app
        .post(&[
            Part::Text("question", r#"What is the value in the "answer" column?"#),
            Part::File("file", "scores.csv", SCORES_CSV.as_bytes()),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "answer": "42" }));
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_csv_rows_are_sent_with_the_prompt() {
    let app = TestApp::new(MockGenerationBackend::new().with_fixed_response("87.5"));

    let (status, body) = app
        .post(&[
            Part::Text("question", "What is the average score?"),
            Part::File("file", "scores.csv", SCORES_CSV.as_bytes()),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "87.5");

    let prompt = app.backend.last_request().unwrap().prompt;
    assert!(prompt.contains("showing first 2 rows"));
    assert!(prompt.contains(r#""name":"alice""#));
    assert!(prompt.contains(r#""score":"85""#));
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_zip_answer_column_is_returned_directly() {
    let app = TestApp::new(MockGenerationBackend::new());
    let archive = zip_bytes(&[("readme.txt", "ignore me"), ("scores.csv", SCORES_CSV)]);

    let (status, body) = app
        .post(&[
            Part::Text("question", r#"Unzip the file. What is in the "answer" column?"#),
            Part::File("file", "bundle.zip", &archive),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "42");
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_zip_without_csv_falls_back_to_question_only() {
    let app = TestApp::new(MockGenerationBackend::new().with_fixed_response("none"));
    let archive = zip_bytes(&[("notes.txt", "no table here")]);

    let (status, body) = app
        .post(&[
            Part::Text("question", "What is in the archive?"),
            Part::File("file", "bundle.zip", &archive),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "none");
    let prompt = app.backend.last_request().unwrap().prompt;
    assert!(!prompt.contains("attached file"));
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_other_file_types_are_ignored() {
    let app = TestApp::new(MockGenerationBackend::new().with_fixed_response("yes"));

    let (status, body) = app
        .post(&[
            Part::Text("question", r#"Is there an "answer" column?"#),
            Part::File("file", "notes.txt", b"answer\nno"),
        ])
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["answer"], "yes");
    assert_eq!(app.backend.call_count(), 1);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_corrupt_zip_is_internal_error() {
    let app = TestApp::new(MockGenerationBackend::new());

    let (status, body) = app
        .post(&[
            Part::Text("question", "Anything?"),
            Part::File("file", "broken.zip", b"definitely not a zip"),
        ])
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Extraction error"));
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_unreadable_csv_is_internal_error() {
    let app = TestApp::new(MockGenerationBackend::new());
    let bytes: &[u8] = b"name,answer\nalice,\xff\xfe\n";

    let (status, body) = app
        .post(&[
            Part::Text("question", r#"What is in the "answer" column?"#),
            Part::File("file", "scores.csv", bytes),
        ])
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Table parse error"));
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_backend_failure_is_internal_error_with_details() {
    let app = TestApp::new(MockGenerationBackend::new().with_failure("upstream unavailable"));

    let (status, body) = app.post(&[Part::Text("question", "What is 2+2?")]).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({
            "error": "Internal server error",
            "details": "Synthesis error: upstream unavailable"
        })
    );
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = TestApp::with_config(MockGenerationBackend::new(), |config| {
        config.max_upload_bytes = 64;
    });
    let big = vec![b'x'; 1024];

    let (status, _) = app
        .post(&[
            Part::Text("question", "Too big?"),
            Part::File("file", "big.csv", &big),
        ])
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_oversized_chunked_body_is_rejected() {
    let app = TestApp::with_config(MockGenerationBackend::new(), |config| {
        config.max_upload_bytes = 64;
    });
    let big = vec![b'x'; 1024];

    let (status, body) = app
        .post_chunked(&[
            Part::Text("question", "Too big?"),
            Part::File("file", "big.csv", &big),
        ])
        .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().starts_with("Upload too large"));
    assert_eq!(app.backend.call_count(), 0);
    assert!(app.upload_root_is_empty());
}

#[tokio::test]
async fn test_health_reports_model() {
    let app = TestApp::new(MockGenerationBackend::new().with_model("gpt-test"));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok", "model": "gpt-test" }));
    assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::new(MockGenerationBackend::new());
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();

    let id = response.headers().get("x-request-id").unwrap();
    assert!(uuid::Uuid::parse_str(id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = TestApp::new(MockGenerationBackend::new());
    let request = Request::builder()
        .uri("/openapi.json")
        .body(Body::empty())
        .unwrap();

    let response = app.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api"]["post"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
}
