//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::application::MESSAGE_REQUIRED;
use crate::domain::DomainError;

use super::error::ApiError;
use super::responses::{ChatResponse, EndpointInfo, ServiceInfo};
use super::AppState;

/// Largest accepted request body.
pub const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Error message for a body over [`MAX_REQUEST_BYTES`].
pub const MESSAGE_TOO_LARGE: &str = "Message is too large";

/// Chat endpoint.
///
/// `OPTIONS` answers the CORS preflight with an empty 200, `POST` runs one
/// question through the completion service, anything else is a 405.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        warn!(%method, "Rejected chat request with unsupported method");
        return Err(DomainError::method_not_allowed(method.to_string()).into());
    }

    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            warn!("Rejected chat request body over {} bytes", MAX_REQUEST_BYTES);
            DomainError::payload_too_large(MESSAGE_TOO_LARGE)
        } else {
            info!("Could not read chat request body: {}", rejection.body_text());
            DomainError::validation(MESSAGE_REQUIRED)
        }
    })?;

    let message = extract_message(&body)?;
    let reply = state.answer_question.execute(&message).await?;

    Ok(Json(ChatResponse { reply }).into_response())
}

/// Pulls a non-empty string `message` out of a JSON body.
///
/// A body that is not JSON, lacks the field, or carries a non-string or
/// empty value all fail the same way.
pub fn extract_message(body: &[u8]) -> Result<String, DomainError> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    match message {
        Some(message) => Ok(message),
        None => {
            info!("Rejected chat request without a usable message field");
            Err(DomainError::validation(MESSAGE_REQUIRED))
        }
    }
}

/// Service description.
pub async fn service_info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let owner = state.answer_question.prompt_builder().context().owner_name();
    Json(ServiceInfo {
        message: format!("{owner}'s portfolio chat API is running!"),
        endpoints: vec![
            EndpointInfo {
                path: "/chat",
                description: "POST - Chat with the AI about the portfolio owner",
            },
            EndpointInfo {
                path: "/health",
                description: "GET - Health check",
            },
        ],
    })
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_string_message() {
        let msg = extract_message(br#"{"message":"Where did you study?"}"#).unwrap();
        assert_eq!(msg, "Where did you study?");
    }

    #[test]
    fn rejects_missing_non_string_and_empty() {
        for body in [
            &br#"{}"#[..],
            br#"{"msg":"hi"}"#,
            br#"{"message":42}"#,
            br#"{"message":null}"#,
            br#"{"message":["a"]}"#,
            br#"{"message":""}"#,
        ] {
            let err = extract_message(body).unwrap_err();
            assert!(err.is_validation(), "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(extract_message(b"not json").unwrap_err().is_validation());
        assert!(extract_message(b"").unwrap_err().is_validation());
    }

    #[test]
    fn whitespace_message_is_accepted() {
        assert_eq!(extract_message(br#"{"message":"  "}"#).unwrap(), "  ");
    }
}
