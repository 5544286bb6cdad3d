use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use doc_summary_api::config::HostingMode;
use doc_summary_api::llm::{MockLLMAdapter, LLM};
use doc_summary_api::{create_router, AppState, Config};

const BOUNDARY: &str = "----doc-summary-test-boundary";

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "AZURE_INFERENCE_SDK_ENDPOINT" => Some("http://localhost:1/models".to_string()),
        "AZURE_INFERENCE_SDK_KEY" => Some("test-key".to_string()),
        "DEPLOYMENT_NAME" => Some("DeepSeek-R1".to_string()),
        "MAX_UPLOAD_BYTES" => Some("4096".to_string()),
        _ => None,
    })
    .unwrap()
}

fn create_test_app(adapter: Arc<MockLLMAdapter>) -> Router {
    let llm = LLM::from_adapter("mock", Box::new(adapter));
    create_router(AppState::new(test_config(), llm))
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn given_running_server_when_root_then_returns_welcome() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], HostingMode::Standalone.welcome_message());
}

#[tokio::test]
async fn given_azure_functions_hosting_when_root_then_returns_functions_welcome() {
    let config = test_config().for_azure_functions(None).unwrap();
    let llm = LLM::from_adapter("mock", Box::new(MockLLMAdapter::echo()));
    let app = create_router(AppState::new(config, llm));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "Bienvenido a la API de DeepSeek en Azure Functions"
    );
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "DeepSeek-R1");
}

#[tokio::test]
async fn given_valid_message_when_chat_then_returns_model_reply() {
    let mock = Arc::new(MockLLMAdapter::fixed("hi there"));
    let app = create_test_app(mock.clone());

    let response = app
        .oneshot(chat_request(r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({"response": "hi there"}));

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].content, "You are a helpful AI assistant.");
    assert_eq!(requests[0].messages[1].content, "hello");
    assert_eq!(requests[0].max_tokens, Some(500));
}

#[tokio::test]
async fn given_whitespace_message_when_chat_then_returns_bad_request() {
    let mock = Arc::new(MockLLMAdapter::echo());
    let app = create_test_app(mock.clone());

    let response = app.oneshot(chat_request(r#"{"message": "  "}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["detail"].is_string());
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn given_missing_message_key_when_chat_then_returns_bad_request() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app.oneshot(chat_request(r#"{"text": "hello"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_malformed_json_when_chat_then_returns_bad_request() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app.oneshot(chat_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["detail"].is_string());
}

#[tokio::test]
async fn given_failing_provider_when_chat_then_returns_server_error() {
    let app = create_test_app(Arc::new(MockLLMAdapter::failing("connection reset")));

    let response = app.oneshot(chat_request(r#"{"message": "hello"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let detail = json_body(response).await["detail"].as_str().unwrap().to_string();
    assert!(detail.contains("connection reset"));
}

#[tokio::test]
async fn given_txt_upload_when_process_file_then_returns_clean_summary() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "notes.txt", b"hello world"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary = json_body(response).await["summary"].as_str().unwrap().to_string();
    assert!(summary.contains("hello world"));
    assert!(!summary.contains("<think>"));
    assert_eq!(summary, summary.trim());
}

#[tokio::test]
async fn given_reasoning_reply_when_process_file_then_think_block_is_stripped() {
    let app = create_test_app(Arc::new(MockLLMAdapter::fixed(
        "<think>\nThe user wants a summary.\n</think>\n\nA greeting.\n",
    )));

    let response = app
        .oneshot(upload_request(
            "/process-file",
            multipart_body("file", "NOTES.TXT", b"hello world"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({"summary": "A greeting."})
    );
}

#[tokio::test]
async fn given_unsupported_extension_when_process_file_then_returns_bad_request() {
    let mock = Arc::new(MockLLMAdapter::echo());
    let app = create_test_app(mock.clone());

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "photo.png", b"\x89PNG"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn given_only_reasoning_when_process_file_then_returns_server_error() {
    let app = create_test_app(Arc::new(MockLLMAdapter::fixed("<think>nothing useful</think>")));

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "notes.txt", b"hello world"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_invalid_utf8_when_process_file_then_returns_server_error() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "latin1.txt", &[0x63, 0x61, 0x66, 0xe9]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn given_corrupt_pdf_when_process_file_then_returns_server_error() {
    let mock = Arc::new(MockLLMAdapter::echo());
    let app = create_test_app(mock.clone());

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "broken.pdf", b"%PDF-1.4 nothing else"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn given_differently_named_field_when_process_file_then_uses_it() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("document", "notes.txt", b"fallback field"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let summary = json_body(response).await["summary"].as_str().unwrap().to_string();
    assert!(summary.contains("fallback field"));
}

#[tokio::test]
async fn given_no_file_when_process_file_then_returns_bad_request() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\njust text\r\n--{b}--\r\n",
        b = BOUNDARY
    );

    let response = app
        .oneshot(upload_request("/process-file/", body.into_bytes()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_non_multipart_body_when_process_file_then_returns_bad_request() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process-file/")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_oversized_upload_when_process_file_then_returns_payload_too_large() {
    let app = create_test_app(Arc::new(MockLLMAdapter::echo()));
    let content = vec![b'a'; 8192];

    let response = app
        .oneshot(upload_request(
            "/process-file/",
            multipart_body("file", "big.txt", &content),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
