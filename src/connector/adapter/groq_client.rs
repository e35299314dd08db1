use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::CompletionService;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

pub const GROQ_DEFAULT_BASE_URL: &str = "https://api.groq.com/openai";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: [ApiMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for Groq's OpenAI-compatible chat completions endpoint.
///
/// Configuration comes from the environment:
///
/// ```text
/// GROQ_API_KEY=gsk_...                            (required)
/// GROQ_BASE_URL=https://api.groq.com/openai       (optional)
/// ```
///
/// Works against any OpenAI-compatible server by pointing `GROQ_BASE_URL` at it.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    /// Construct from `GROQ_API_KEY` and `GROQ_BASE_URL`.
    pub fn from_env() -> Result<Self, DomainError> {
        let key = std::env::var("GROQ_API_KEY")
            .map_err(|_| DomainError::configuration("GROQ_API_KEY is not set"))?;
        let base =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| GROQ_DEFAULT_BASE_URL.to_string());
        Ok(Self::new(key, base))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionService for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, DomainError> {
        let params = request.parameters();
        let body = ApiRequest {
            model: &params.model_id,
            messages: [
                ApiMessage {
                    role: "system",
                    content: request.system_prompt(),
                },
                ApiMessage {
                    role: "user",
                    content: request.user_message(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("Groq request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("GroqClient: API returned {status}: {text}");
            return Err(DomainError::upstream(format!("{status} {text}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Groq response could not be parsed: {e}")))?;

        debug!("GroqClient: {} choices returned", api_response.choices.len());

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(CompletionResponse::new)
            .unwrap_or_else(CompletionResponse::empty))
    }

    fn provider_name(&self) -> &str {
        "groq"
    }
}
