use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ChatTransport;
use crate::domain::{ChatMessage, ChatThread, DomainError};

/// Shown in the thread whenever a round trip fails for any reason.
pub const CONNECTION_FALLBACK: &str =
    "Sorry, I'm having trouble connecting. Please try again later or contact me directly.";

/// Whether the widget is waiting on the chat endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightState {
    #[default]
    Idle,
    Sending,
}

/// Proof that a send was started. Consumed by [`ChatWidget::finish_send`],
/// so every started send resolves exactly once.
#[derive(Debug)]
#[must_use = "a pending send must be passed to finish_send"]
pub struct PendingSend {
    message: String,
}

impl PendingSend {
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Client-side chat conversation: thread, input buffer and a single-flight
/// guard around the transport.
///
/// Event-loop front ends drive [`begin_send`](Self::begin_send) and
/// [`finish_send`](Self::finish_send) separately; simple callers use
/// [`send`](Self::send).
pub struct ChatWidget {
    transport: Arc<dyn ChatTransport>,
    thread: ChatThread,
    input: String,
    state: FlightState,
    open: bool,
}

impl ChatWidget {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            thread: ChatThread::new(),
            input: String::new(),
            state: FlightState::Idle,
            open: false,
        }
    }

    /// Seed the thread with an assistant welcome message.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.thread.push(ChatMessage::assistant(greeting));
        self
    }

    pub fn thread(&self) -> &ChatThread {
        &self.thread
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.state == FlightState::Sending
    }

    /// Whether the send control should be enabled.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_sending()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the widget. The thread and any outstanding request are kept.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Start a send from the current input.
    ///
    /// Returns `None` without touching any state when the input is blank or
    /// a request is already in flight. Otherwise appends the user message,
    /// clears the input and marks the widget as sending.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if !self.can_send() {
            debug!(
                "Ignoring send (blank input: {}, in flight: {})",
                self.input.trim().is_empty(),
                self.is_sending()
            );
            return None;
        }

        let message = std::mem::take(&mut self.input);
        self.thread.push(ChatMessage::user(message.clone()));
        self.state = FlightState::Sending;

        Some(PendingSend { message })
    }

    /// Resolve a started send: append the reply, or the fixed fallback on any
    /// failure or blank reply, and return to idle.
    pub fn finish_send(
        &mut self,
        pending: PendingSend,
        outcome: Result<String, DomainError>,
    ) -> &ChatMessage {
        let reply = match outcome {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!("Chat endpoint returned a blank reply");
                CONNECTION_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(
                    "Chat request failed for message of {} chars: {}",
                    pending.message.chars().count(),
                    e
                );
                CONNECTION_FALLBACK.to_string()
            }
        };

        self.state = FlightState::Idle;
        self.thread.push(ChatMessage::assistant(reply))
    }

    /// Send the current input and wait for the reply.
    ///
    /// Returns the appended assistant message, or `None` if the send was
    /// rejected.
    pub async fn send(&mut self) -> Option<&ChatMessage> {
        let pending = self.begin_send()?;
        let transport = Arc::clone(&self.transport);
        let outcome = transport.send(pending.message()).await;
        Some(self.finish_send(pending, outcome))
    }

    /// Replace the input with `text` and send it.
    pub async fn submit(&mut self, text: impl Into<String>) -> Option<&ChatMessage> {
        self.set_input(text);
        self.send().await
    }
}
