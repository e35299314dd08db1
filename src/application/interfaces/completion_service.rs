use async_trait::async_trait;

use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

/// An interface for sending a two-turn prompt to a hosted LLM and receiving
/// the generated text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Every failure (network, non-2xx status, undecodable payload) is
/// reported as [`DomainError::Upstream`].
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Submit the system turn and user turn and return the first completion.
    ///
    /// An empty [`CompletionResponse`] is a success: the caller decides how to
    /// present it.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, DomainError>;

    /// Short provider name for logging.
    fn provider_name(&self) -> &str;
}
