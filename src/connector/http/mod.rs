//! HTTP server for the chat handler.
//!
//! Provides endpoints for:
//! - Chat (`/chat`, also mounted at `/api/chat`)
//! - Service info (`/`)
//! - Health check (`/health`)

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::application::AnswerQuestionUseCase;

mod error;
mod handlers;
pub mod responses;

pub use error::ApiError;
pub use handlers::{extract_message, MAX_REQUEST_BYTES, MESSAGE_TOO_LARGE};
pub use responses::{ChatRequest, ChatResponse, ErrorResponse};

/// Shared, read-only state for every request.
pub struct AppState {
    pub answer_question: Arc<AnswerQuestionUseCase>,
}

impl AppState {
    pub fn new(answer_question: Arc<AnswerQuestionUseCase>) -> Self {
        Self { answer_question }
    }
}

/// Create the HTTP router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/chat", any(handlers::chat))
        .route("/api/chat", any(handlers::chat))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        // Cross-origin access for any caller, on every response.
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state)
}

/// Serve the router on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("Chat API listening on http://{}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => {
            warn!("Could not install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
