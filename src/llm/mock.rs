use async_trait::async_trait;
use log::info;
use std::sync::Mutex;

use super::{ CompletionClient, LlmError };
use crate::models::chat::ChatMessage;

/// Deterministic client used by the factory when the provider is `mock`,
/// for running the agent without credentials. Records every payload it is
/// sent so tests can assert how requests were shaped.
pub struct MockChatClient {
    reply: String,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far, in call order.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new("Mock recipe reply")
    }
}

#[async_trait]
impl CompletionClient for MockChatClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage]
    ) -> Result<String, LlmError> {
        info!("Mock completion: model={}, messages={}", model, messages.len());
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());
        Ok(self.reply.clone())
    }
}
