use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use crate::application::CompletionService;
use crate::domain::{DomainError, ModelParameters, PromptBuilder, PromptContext};

/// Returned to the visitor when the provider produced no text.
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I could not generate a response.";

/// Error message for a missing, non-string or empty `message` field.
pub const MESSAGE_REQUIRED: &str = "Message is required";

/// Answers one visitor question from the resume context.
///
/// Stateless across calls: each `execute` issues exactly one completion
/// request and never retries.
pub struct AnswerQuestionUseCase {
    completion_service: Arc<dyn CompletionService>,
    prompt_builder: PromptBuilder,
    parameters: ModelParameters,
}

impl AnswerQuestionUseCase {
    pub fn new(
        completion_service: Arc<dyn CompletionService>,
        context: Arc<PromptContext>,
        parameters: ModelParameters,
    ) -> Self {
        Self {
            completion_service,
            prompt_builder: PromptBuilder::new(context),
            parameters,
        }
    }

    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    pub fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompt_builder
    }

    pub async fn execute(&self, message: &str) -> Result<String, DomainError> {
        if message.is_empty() {
            return Err(DomainError::validation(MESSAGE_REQUIRED));
        }

        let request = self.prompt_builder.build(message, &self.parameters);
        info!(
            "Answering question ({} chars) with {} model {}",
            message.chars().count(),
            self.completion_service.provider_name(),
            request.model_id()
        );

        let start_time = Instant::now();
        let response = self
            .completion_service
            .complete(&request)
            .await
            .map_err(|e| {
                error!("{} completion failed: {}", self.completion_service.provider_name(), e);
                match e {
                    DomainError::Upstream(_) => e,
                    other => DomainError::upstream(other.detail()),
                }
            })?;

        debug!(
            "Completion returned {} chars in {:.2}s",
            response.reply_text().len(),
            start_time.elapsed().as_secs_f64()
        );

        if response.is_blank() {
            return Ok(EMPTY_REPLY_FALLBACK.to_string());
        }

        Ok(response.into_reply_text())
    }
}
