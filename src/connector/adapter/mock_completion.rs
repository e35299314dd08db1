use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::CompletionService;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

#[derive(Debug, Clone)]
enum Behavior {
    Echo,
    Reply(String),
    Fail(String),
}

/// Offline [`CompletionService`] that never touches the network.
///
/// Records every request it receives so callers can assert on prompt
/// assembly and call counts.
pub struct MockCompletion {
    behavior: Behavior,
    calls: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletion {
    /// Replies with a short acknowledgement that quotes the user message.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    pub fn replying(reply: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Reply(reply.into()))
    }

    /// Fails every call with an upstream error carrying `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(detail.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request.clone()),
            Err(poisoned) => poisoned.into_inner().push(request.clone()),
        }

        match &self.behavior {
            Behavior::Echo => Ok(CompletionResponse::new(format!(
                "[mock] You asked: {}",
                request.user_message()
            ))),
            Behavior::Reply(reply) => Ok(CompletionResponse::new(reply.clone())),
            Behavior::Fail(detail) => Err(DomainError::upstream(detail.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
