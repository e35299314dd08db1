use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::CompletionService;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const OLLAMA_DEFAULT_MODEL: &str = "llama3.2:1b";

#[derive(Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: [OllamaMessage<'a>; 2],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    message: OllamaReply,
}

#[derive(Deserialize)]
struct OllamaReply {
    #[serde(default)]
    content: String,
}

/// Self-hosted completion backend using a local Ollama server's `/api/chat`.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `OLLAMA_BASE_URL`, defaulting to the standard local port.
    pub fn from_env() -> Self {
        let base = std::env::var("OLLAMA_BASE_URL")
            .unwrap_or_else(|_| OLLAMA_DEFAULT_BASE_URL.to_string());
        Self::new(&base)
    }
}

#[async_trait]
impl CompletionService for OllamaClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, DomainError> {
        let url = format!("{}/api/chat", self.base_url);
        let params = request.parameters();

        let body = OllamaRequest {
            model: &params.model_id,
            messages: [
                OllamaMessage {
                    role: "system",
                    content: request.system_prompt(),
                },
                OllamaMessage {
                    role: "user",
                    content: request.user_message(),
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };

        let response = self.client.post(&url).json(&body).send().await.map_err(|e| {
            DomainError::upstream(format!(
                "Ollama request failed: {e}. Make sure Ollama is running with: ollama serve"
            ))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("OllamaClient: {url} returned {status}: {text}");
            return Err(DomainError::upstream(format!(
                "Ollama request failed with status: {status}"
            )));
        }

        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("Ollama response could not be parsed: {e}")))?;

        Ok(CompletionResponse::new(parsed.message.content))
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_map_max_tokens_to_num_predict() {
        let body = OllamaRequest {
            model: OLLAMA_DEFAULT_MODEL,
            messages: [
                OllamaMessage {
                    role: "system",
                    content: "s",
                },
                OllamaMessage {
                    role: "user",
                    content: "u",
                },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: 0.3,
                num_predict: 500,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["options"]["num_predict"], 500);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn response_requires_message() {
        assert!(serde_json::from_str::<OllamaResponse>(r#"{"done":true}"#).is_err());
        assert!(serde_json::from_str::<OllamaResponse>(r#"{"error":"model not found"}"#).is_err());

        let parsed: OllamaResponse =
            serde_json::from_str(r#"{"message":{"role":"assistant"},"done":true}"#).unwrap();
        assert!(parsed.message.content.is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/");
        assert_eq!(client.base_url, "http://localhost:11434");
    }
}
