use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::domain::DomainError;

use super::responses::ErrorResponse;

const METHOD_NOT_ALLOWED: &str = "Method not allowed";
const GENERATION_FAILED: &str = "Failed to generate response";
const INTERNAL_ERROR: &str = "Internal server error";

/// Maps a [`DomainError`] onto a status code and JSON error body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self.0 {
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            DomainError::MethodNotAllowed(_) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new(METHOD_NOT_ALLOWED),
            ),
            DomainError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::new(msg))
            }
            DomainError::Upstream(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(GENERATION_FAILED).with_details(detail),
            ),
            other => {
                error!(error = %other, "Unexpected error in chat handler");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(INTERNAL_ERROR).with_details(other.detail()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
