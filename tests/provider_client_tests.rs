//! Provider clients against stub upstream servers on a loopback port.

use std::sync::Arc;

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use portfolio_chat::{
    AnswerQuestionUseCase, CompletionRequest, CompletionService, GroqClient, ModelParameters,
    OllamaClient, PromptContext,
};

/// Serves `body` with status 200 on `path` and returns the base URL.
async fn stub_upstream(path: &'static str, body: Value) -> String {
    let router = Router::new().route(path, post(move || async move { Json(body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

fn request() -> CompletionRequest {
    CompletionRequest::new("system turn", "Where did Jane work?", ModelParameters::default())
}

#[tokio::test]
async fn groq_reply_is_returned() {
    let base = stub_upstream(
        "/v1/chat/completions",
        json!({ "choices": [{ "message": { "role": "assistant", "content": "Example Corp." } }] }),
    )
    .await;

    let response = GroqClient::new("key", base).complete(&request()).await.unwrap();
    assert_eq!(response.reply_text(), "Example Corp.");
}

#[tokio::test]
async fn groq_body_without_choices_is_an_upstream_error() {
    let base = stub_upstream(
        "/v1/chat/completions",
        json!({ "error": { "message": "bad model" } }),
    )
    .await;

    let err = GroqClient::new("key", base).complete(&request()).await.unwrap_err();
    assert!(err.is_upstream(), "{err}");
}

#[tokio::test]
async fn groq_empty_choices_is_an_empty_reply() {
    let base = stub_upstream("/v1/chat/completions", json!({ "choices": [] })).await;

    let response = GroqClient::new("key", base).complete(&request()).await.unwrap();
    assert!(response.is_blank());
}

#[tokio::test]
async fn ollama_body_without_message_is_an_upstream_error() {
    let base = stub_upstream("/api/chat", json!({ "done": true })).await;

    let err = OllamaClient::new(&base).complete(&request()).await.unwrap_err();
    assert!(err.is_upstream(), "{err}");
}

#[tokio::test]
async fn malformed_provider_reply_fails_the_question_instead_of_falling_back() {
    let base = stub_upstream("/v1/chat/completions", json!({ "id": "x" })).await;
    let use_case = AnswerQuestionUseCase::new(
        Arc::new(GroqClient::new("key", base)),
        Arc::new(PromptContext::new("Jane Doe", "Jane Doe\nRust Engineer")),
        ModelParameters::default(),
    );

    let err = use_case.execute("hello").await.unwrap_err();
    assert!(err.is_upstream());
}
