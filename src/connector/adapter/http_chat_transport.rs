use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatTransport;
use crate::connector::http::{ChatRequest, ChatResponse, ErrorResponse};
use crate::domain::DomainError;

pub const DEFAULT_CHAT_URL: &str = "http://localhost:8000/chat";

/// [`ChatTransport`] that posts `{ "message": ... }` to a chat endpoint over
/// HTTP and reads `{ "reply": ... }` back.
///
/// Non-2xx responses are turned into errors using the endpoint's
/// `error`/`details` body when one is present.
pub struct HttpChatTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpChatTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, message: &str) -> Result<String, DomainError> {
        debug!("Posting message to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("chat endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = match response.json::<ErrorResponse>().await {
                Ok(body) => match body.details {
                    Some(details) => format!("{}: {}", body.error, details),
                    None => body.error,
                },
                Err(_) => "no error body".to_string(),
            };
            return Err(DomainError::upstream(format!(
                "chat endpoint returned {status}: {detail}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("chat endpoint sent an invalid reply: {e}")))?;

        Ok(body.reply)
    }
}
