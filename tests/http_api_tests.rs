//! Tests for the chat HTTP endpoint, each against its own server on a
//! loopback port.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tokio::net::TcpListener;

use portfolio_chat::{
    create_router, AnswerQuestionUseCase, AppState, MockCompletion, ModelParameters,
    PromptContext, EMPTY_REPLY_FALLBACK,
};
use portfolio_chat::connector::http::{MAX_REQUEST_BYTES, MESSAGE_TOO_LARGE};

const RESUME: &str = "Jane Doe\nStaff Engineer | Example Corp | 2019 - 2024\nSKILLS: Rust, Go";

fn app(mock: Arc<MockCompletion>) -> axum::Router {
    let use_case = AnswerQuestionUseCase::new(
        mock,
        Arc::new(PromptContext::new("Jane Doe", RESUME)),
        ModelParameters::default(),
    );
    create_router(Arc::new(AppState::new(Arc::new(use_case))))
}

async fn call(
    app: axum::Router,
    method: Method,
    path: &str,
    body: Option<&str>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    let mut request = reqwest::Client::new().request(method, format!("http://{addr}{path}"));
    if let Some(body) = body {
        request = request
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
    }

    let response = request.send().await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.bytes().await.expect("body").to_vec();
    (status, headers, bytes)
}

fn json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn post_returns_reply_from_provider() {
    let mock = Arc::new(MockCompletion::replying("Jane worked at Example Corp."));
    let (status, _, body) = call(
        app(mock.clone()),
        Method::POST,
        "/chat",
        Some(r#"{"message":"Where did Jane work?"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), serde_json::json!({ "reply": "Jane worked at Example Corp." }));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn api_prefixed_route_is_the_same_handler() {
    let mock = Arc::new(MockCompletion::replying("ok"));
    let (status, _, _) = call(
        app(mock.clone()),
        Method::POST,
        "/api/chat",
        Some(r#"{"message":"hi"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn invalid_message_bodies_are_rejected_without_provider_call() {
    let mock = Arc::new(MockCompletion::replying("unused"));

    for body in [
        r#"{}"#,
        r#"{"message":123}"#,
        r#"{"message":{"text":"hi"}}"#,
        r#"{"message":""}"#,
        "this is not json",
    ] {
        let (status, _, bytes) = call(app(mock.clone()), Method::POST, "/chat", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(json(&bytes)["error"], "Message is required");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn other_methods_get_405_without_provider_call() {
    let mock = Arc::new(MockCompletion::replying("unused"));

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let (status, _, bytes) = call(app(mock.clone()), method.clone(), "/chat", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "method {method}");
        assert_eq!(json(&bytes)["error"], "Method not allowed");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn options_preflight_is_empty_200() {
    let mock = Arc::new(MockCompletion::replying("unused"));
    let (status, headers, body) = call(app(mock.clone()), Method::OPTIONS, "/chat", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn cors_headers_are_on_error_responses_too() {
    let mock = Arc::new(MockCompletion::replying("unused"));
    let (status, headers, _) = call(app(mock), Method::GET, "/chat", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn upstream_failure_is_500_with_details() {
    let mock = Arc::new(MockCompletion::failing("429 Too Many Requests: rate limit reached"));
    let (status, _, body) = call(
        app(mock.clone()),
        Method::POST,
        "/chat",
        Some(r#"{"message":"hello"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["error"], "Failed to generate response");
    assert!(body["details"]
        .as_str()
        .unwrap_or_default()
        .contains("rate limit reached"));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn empty_completion_uses_fallback_reply() {
    let mock = Arc::new(MockCompletion::replying(""));
    let (status, _, body) = call(
        app(mock),
        Method::POST,
        "/chat",
        Some(r#"{"message":"hello"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["reply"], EMPTY_REPLY_FALLBACK);
}

#[tokio::test]
async fn prompt_sent_upstream_has_full_context_and_verbatim_message() {
    let mock = Arc::new(MockCompletion::replying("ok"));
    let message = "Tell me about\n\"Example Corp\", and skills? ü";
    let body = serde_json::json!({ "message": message }).to_string();

    let (status, _, _) = call(app(mock.clone()), Method::POST, "/chat", Some(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].system_prompt().contains(RESUME));
    assert_eq!(requests[0].user_message(), message);
}

#[tokio::test]
async fn health_and_info_endpoints() {
    let mock = Arc::new(MockCompletion::new());

    let (status, _, body) = call(app(mock.clone()), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "healthy");

    let (status, _, body) = call(app(mock.clone()), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert!(body["message"].as_str().unwrap_or_default().contains("Jane Doe"));
    assert_eq!(body["endpoints"][0]["path"], "/chat");

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn oversized_body_is_413_with_json_error() {
    let mock = Arc::new(MockCompletion::replying("unused"));
    let message = "a".repeat(MAX_REQUEST_BYTES + 16 * 1024);
    let body = serde_json::json!({ "message": message }).to_string();

    let (status, headers, bytes) = call(app(mock.clone()), Method::POST, "/chat", Some(&body)).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap_or_default()
        .starts_with("application/json"));
    assert_eq!(json(&bytes)["error"], MESSAGE_TOO_LARGE);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn long_message_within_the_cap_is_answered() {
    let mock = Arc::new(MockCompletion::replying("ok"));
    let message = "b".repeat(MAX_REQUEST_BYTES / 2);
    let body = serde_json::json!({ "message": message }).to_string();

    let (status, _, _) = call(app(mock.clone()), Method::POST, "/chat", Some(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.requests()[0].user_message().len(), MAX_REQUEST_BYTES / 2);
}
