//! Chat Agent
//!
//! Single-turn relay: one user message in, one model reply out. No history
//! is kept between calls.

use crate::agents::{complete, sanitize::strip_think_tags};
use crate::config::Config;
use crate::llm::LLM;
use crate::types::{AppError, AppResult, LLMMessage};
use tracing::info;

pub const CHAT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

pub struct ChatAgent;

impl ChatAgent {
    /// Validate the incoming message and build the system/user pair
    pub fn build_messages(message: Option<&str>) -> AppResult<Vec<LLMMessage>> {
        let message = message.map(str::trim).unwrap_or_default();
        if message.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        Ok(vec![
            LLMMessage::system(CHAT_SYSTEM_PROMPT),
            LLMMessage::user(message),
        ])
    }

    /// Reply to a single chat message
    pub async fn reply(message: Option<&str>, llm: &LLM, config: &Config) -> AppResult<String> {
        let messages = Self::build_messages(message)?;
        info!(message_len = messages[1].content.len(), "Generating chat reply");

        let raw = complete(llm, config, messages).await?;
        let reply = strip_think_tags(&raw);

        info!(reply_len = reply.len(), "Chat reply generated");
        Ok(reply)
    }
}
