use anyhow::{bail, Result};

use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// One round trip through a fresh widget. Transport failures surface as
    /// the widget's fallback text, just like in the browser.
    pub async fn ask(&self, message: String, url: String) -> Result<String> {
        let mut widget = self.container.chat_widget(&url);

        match widget.submit(message).await {
            Some(reply) => Ok(reply.text().to_string()),
            None => bail!("Nothing to send: the message is empty."),
        }
    }
}
