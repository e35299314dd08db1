pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    AnswerQuestionUseCase, ChatTransport, ChatWidget, CompletionService, FlightState, PendingSend,
    CONNECTION_FALLBACK, EMPTY_REPLY_FALLBACK, MESSAGE_REQUIRED,
};

pub use cli::Commands;

pub use connector::api::{Container, ContainerConfig, Provider};
pub use connector::http::{create_router, AppState, ChatRequest, ChatResponse, ErrorResponse};
pub use connector::{AnthropicClient, GroqClient, HttpChatTransport, MockCompletion, OllamaClient};

pub use domain::{
    ChatMessage, ChatThread, CompletionRequest, CompletionResponse, DomainError, ModelParameters,
    PromptBuilder, PromptContext, Sender,
};
