use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::domain::ChatMessage;

use super::super::Container;

const QUIT_COMMANDS: [&str; 2] = ["/quit", "/exit"];

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Interactive terminal conversation against the chat endpoint at `url`.
    pub async fn chat(&self, url: String) -> Result<String> {
        let input = BufReader::new(tokio::io::stdin());
        self.converse(&url, input, &mut std::io::stdout()).await
    }

    /// Reads one question per line from `input` until EOF or a quit command,
    /// writing the conversation to `out`.
    pub async fn converse<R, W>(&self, url: &str, input: R, out: &mut W) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut widget = self.container.chat_widget(url);
        widget.open();

        for message in widget.thread().iter() {
            write_message(out, message)?;
        }
        writeln!(out, "(type /quit to leave)")?;

        let mut lines = input.lines();
        loop {
            write!(out, "you> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if QUIT_COMMANDS.contains(&line.trim()) {
                break;
            }

            if let Some(reply) = widget.submit(line).await {
                write_message(out, reply)?;
            }
        }

        widget.close();
        Ok(format!(
            "Conversation ended with {} messages.",
            widget.thread().len()
        ))
    }
}

fn write_message<W: Write>(out: &mut W, message: &ChatMessage) -> std::io::Result<()> {
    writeln!(out, "{}> {}", message.sender(), message.text())
}
