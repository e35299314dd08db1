use std::sync::Arc;

use crate::domain::{CompletionRequest, ModelParameters, PromptContext};

/// Sentence the model must use when the resume does not cover a question.
pub const MISSING_INFO_ANSWER: &str = "I don't have that information in the resume";

/// Instruction block placed ahead of the resume. `{owner}` is replaced with
/// the portfolio owner's name.
const SYSTEM_PREAMBLE: &str = "\
You are an AI assistant for {owner}'s portfolio website. This website is visited by \
recruiters, colleagues, and friends who want to learn about {owner}'s professional background.

Your role is to answer questions about {owner} using ONLY the information from the resume \
provided below. You must:
- Copy exact names, dates, company names, and education details from the context
- Answer to the best of your knowledge strictly from the context provided
- If information is not in the context, say \"{missing}\"
- Do NOT make up or hallucinate any information
- Be precise, accurate, and factual";

/// Assembles the system turn (preamble + resume) and the user turn for each
/// incoming question.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    context: Arc<PromptContext>,
}

impl PromptBuilder {
    pub fn new(context: Arc<PromptContext>) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &PromptContext {
        &self.context
    }

    pub fn system_prompt(&self) -> String {
        let preamble = SYSTEM_PREAMBLE
            .replace("{owner}", self.context.owner_name())
            .replace("{missing}", MISSING_INFO_ANSWER);
        format!("{preamble}\n\nResume Context:\n{}", self.context.resume())
    }

    /// The user message is passed through untouched.
    pub fn build(&self, user_message: &str, parameters: &ModelParameters) -> CompletionRequest {
        CompletionRequest::new(self.system_prompt(), user_message, parameters.clone())
    }
}
