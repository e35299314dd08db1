use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use tracing::debug;

use crate::application::{AnswerQuestionUseCase, ChatTransport, ChatWidget, CompletionService};
use crate::connector::http::AppState;
use crate::connector::{
    AnthropicClient, GroqClient, HttpChatTransport, MockCompletion, OllamaClient,
    ANTHROPIC_DEFAULT_MODEL, OLLAMA_DEFAULT_MODEL,
};
use crate::domain::{
    DomainError, ModelParameters, PromptContext, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_ID,
    DEFAULT_OWNER_NAME, DEFAULT_TEMPERATURE,
};

/// Completion backend behind the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Provider {
    #[default]
    Groq,
    Anthropic,
    Ollama,
    /// Offline replies, no network access.
    Mock,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Anthropic => "anthropic",
            Provider::Ollama => "ollama",
            Provider::Mock => "mock",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Groq => DEFAULT_MODEL_ID,
            Provider::Anthropic => ANTHROPIC_DEFAULT_MODEL,
            Provider::Ollama => OLLAMA_DEFAULT_MODEL,
            Provider::Mock => "mock",
        }
    }
}

pub struct ContainerConfig {
    pub provider: Provider,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Plain-text resume to answer from. The built-in resume is used when unset.
    pub resume_path: Option<PathBuf>,
    pub owner_name: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            resume_path: None,
            owner_name: DEFAULT_OWNER_NAME.to_string(),
        }
    }
}

pub struct Container {
    prompt_context: Arc<PromptContext>,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self, DomainError> {
        let prompt_context = match config.resume_path.as_deref() {
            Some(path) => {
                debug!("Loading resume context from {}", path.display());
                PromptContext::from_file(config.owner_name.clone(), path)?
            }
            None if config.owner_name == DEFAULT_OWNER_NAME => PromptContext::builtin(),
            None => PromptContext::new(config.owner_name.clone(), PromptContext::builtin().resume()),
        };
        debug!(
            "Prompt context ready ({} chars of resume)",
            prompt_context.resume().len()
        );

        Ok(Self {
            prompt_context: Arc::new(prompt_context),
            config,
        })
    }

    pub fn prompt_context(&self) -> Arc<PromptContext> {
        Arc::clone(&self.prompt_context)
    }

    pub fn model_parameters(&self) -> ModelParameters {
        let model = self
            .config
            .model
            .clone()
            .unwrap_or_else(|| self.config.provider.default_model().to_string());

        ModelParameters::new(model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
    }

    /// Build the configured provider client. Fails when a required API key
    /// is missing from the environment.
    pub fn completion_service(&self) -> Result<Arc<dyn CompletionService>, DomainError> {
        let service: Arc<dyn CompletionService> = match self.config.provider {
            Provider::Groq => Arc::new(GroqClient::from_env()?),
            Provider::Anthropic => Arc::new(AnthropicClient::from_env()?),
            Provider::Ollama => Arc::new(OllamaClient::from_env()),
            Provider::Mock => Arc::new(MockCompletion::new()),
        };
        debug!("Using {} completion service", service.provider_name());
        Ok(service)
    }

    pub fn answer_question_use_case(&self) -> Result<AnswerQuestionUseCase, DomainError> {
        Ok(AnswerQuestionUseCase::new(
            self.completion_service()?,
            self.prompt_context(),
            self.model_parameters(),
        ))
    }

    pub fn app_state(&self) -> Result<Arc<AppState>, DomainError> {
        Ok(Arc::new(AppState::new(Arc::new(
            self.answer_question_use_case()?,
        ))))
    }

    /// A widget talking to the chat endpoint at `url`, greeting the visitor.
    pub fn chat_widget(&self, url: &str) -> ChatWidget {
        let transport: Arc<dyn ChatTransport> = Arc::new(HttpChatTransport::new(url));
        ChatWidget::new(transport).with_greeting(self.greeting())
    }

    pub fn greeting(&self) -> String {
        let owner = self.prompt_context.owner_name();
        format!(
            "Hi! Welcome to {owner}'s portfolio. Ask me anything about {owner}'s experience, skills, or projects!"
        )
    }

    pub fn provider(&self) -> Provider {
        self.config.provider
    }
}
