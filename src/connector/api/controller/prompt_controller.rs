use anyhow::Result;

use crate::domain::{CompletionRequest, PromptBuilder};

use super::super::Container;

pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Show the exact request a question would produce, without calling a
    /// provider.
    pub fn prompt(&self, message: String) -> Result<String> {
        let builder = PromptBuilder::new(self.container.prompt_context());
        let request = builder.build(&message, &self.container.model_parameters());
        Ok(self.format_request(&request))
    }

    fn format_request(&self, request: &CompletionRequest) -> String {
        let params = request.parameters();
        format!(
            "=== system ===\n{}\n\n=== user ===\n{}\n\nProvider:    {}\nModel:       {}\nTemperature: {}\nMax tokens:  {}",
            request.system_prompt(),
            request.user_message(),
            self.container.provider().as_str(),
            params.model_id,
            params.temperature,
            params.max_tokens
        )
    }
}
