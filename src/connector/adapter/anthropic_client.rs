use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::CompletionService;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

pub const ANTHROPIC_DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-haiku-4-5";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Anthropic Messages API.
///
/// The system turn goes in the top-level `system` field; the visitor's
/// question is the single `user` message.
///
/// ```text
/// ANTHROPIC_API_KEY=sk-ant-...
/// ANTHROPIC_BASE_URL=https://api.anthropic.com
/// ```
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), MESSAGES_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable             | Default                     |
    /// |----------------------|-----------------------------|
    /// | `ANTHROPIC_API_KEY`  | required                    |
    /// | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com` |
    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| DomainError::configuration("ANTHROPIC_API_KEY is not set"))?;
        let base = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| ANTHROPIC_DEFAULT_BASE_URL.to_string());
        Ok(Self::new(key, base))
    }
}

#[async_trait]
impl CompletionService for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, DomainError> {
        let params = request.parameters();
        let body = ApiRequest {
            model: &params.model_id,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system: request.system_prompt(),
            messages: vec![ApiMessage {
                role: "user",
                content: request.user_message(),
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("AnthropicClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("AnthropicClient: API returned {status}: {text}");
            return Err(DomainError::upstream(format!(
                "AnthropicClient: API returned {status}: {text}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::upstream(format!("AnthropicClient: failed to parse response: {e}"))
        })?;

        Ok(api_response
            .content
            .into_iter()
            .next()
            .map(|b| CompletionResponse::new(b.text))
            .unwrap_or_else(CompletionResponse::empty))
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}
