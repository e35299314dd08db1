//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion providers (Groq, Anthropic, Ollama, mock)
//! - The widget's HTTP transport
//! - The axum chat endpoint
//! - CLI wiring (container, command router, controllers)

pub mod adapter;
pub mod api;
pub mod http;

pub use adapter::*;
