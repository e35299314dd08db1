use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_ID: &str = "llama-3.3-70b-versatile";
/// Low randomness keeps answers close to the resume text.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Fixed sampling parameters sent with every completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub model_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelParameters {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Self::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// A two-turn exchange (system turn + user turn) for a completion provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    system_prompt: String,
    user_message: String,
    parameters: ModelParameters,
}

impl CompletionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
        parameters: ModelParameters,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_message: user_message.into(),
            parameters,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn model_id(&self) -> &str {
        &self.parameters.model_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResponse {
    reply_text: String,
}

impl CompletionResponse {
    pub fn new(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
        }
    }

    /// An empty response, for a well-formed provider reply that carried no text.
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn reply_text(&self) -> &str {
        &self.reply_text
    }

    pub fn into_reply_text(self) -> String {
        self.reply_text
    }

    pub fn is_blank(&self) -> bool {
        self.reply_text.trim().is_empty()
    }
}
