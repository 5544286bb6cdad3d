// In-process adapter used by tests and local smoke runs without a provider

use crate::llm::provider::LLMAdapter;
use crate::types::{AppError, AppResult, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Always return this text
    Fixed(String),
    /// Return the content of the last message in the request
    Echo,
    /// Fail with an inference error carrying this message
    Fail(String),
}

pub struct MockLLMAdapter {
    reply: MockReply,
    requests: Mutex<Vec<LLMRequest>>,
}

impl MockLLMAdapter {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(text: impl Into<String>) -> Self {
        Self::new(MockReply::Fixed(text.into()))
    }

    pub fn echo() -> Self {
        Self::new(MockReply::Echo)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockReply::Fail(message.into()))
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLMAdapter for MockLLMAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }

        let content = match &self.reply {
            MockReply::Fixed(text) => text.clone(),
            MockReply::Echo => request
                .messages
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default(),
            MockReply::Fail(message) => return Err(AppError::Inference(message.clone())),
        };

        Ok(LLMResponse {
            content,
            finish_reason: "stop".to_string(),
            usage: TokenUsage::default(),
        })
    }
}
