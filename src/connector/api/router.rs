use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, PromptController, ServeController};

pub struct Router<'a> {
    serve_controller: ServeController<'a>,
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    prompt_controller: PromptController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            serve_controller: ServeController::new(container),
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            prompt_controller: PromptController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { port, public } => self.serve_controller.serve(port, public).await,
            Commands::Ask { message, url } => self.ask_controller.ask(message, url).await,
            Commands::Chat { url } => self.chat_controller.chat(url).await,
            Commands::Prompt { message } => self.prompt_controller.prompt(message),
        }
    }
}
