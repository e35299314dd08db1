use async_trait::async_trait;

use crate::domain::DomainError;

/// Client-side channel from the chat widget to the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post one user message and return the reply text.
    async fn send(&self, message: &str) -> Result<String, DomainError>;
}
