//! Agent System
//!
//! Orchestrates the two request flows of the service:
//!
//! - **Summarize Agent**: uploaded document → extracted text → summary
//! - **Chat Agent**: user message → reply
//!
//! ```text
//! Upload / Message
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Extractor  │  → PDF / DOCX / TXT to plain text (summaries only)
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Inference  │  → system instruction + user content, first choice
//! └─────────────┘
//!      │
//!      ▼
//! ┌─────────────┐
//! │  Sanitizer  │  → strip <think> blocks, trim
//! └─────────────┘
//!      │
//!      ▼
//!  Response
//! ```

pub mod chat;
pub mod sanitize;
pub mod summarize;

pub use chat::ChatAgent;
pub use sanitize::strip_think_tags;
pub use summarize::SummarizeAgent;

use crate::config::Config;
use crate::llm::LLM;
use crate::types::{AppResult, LLMMessage, LLMRequest};
use tracing::debug;

/// Send one prompt to the model and return the first choice's raw content.
/// Single attempt; failures surface to the caller as-is.
pub(crate) async fn complete(llm: &LLM, config: &Config, messages: Vec<LLMMessage>) -> AppResult<String> {
    let request = LLMRequest {
        model: config.llm.model.clone(),
        messages,
        max_tokens: Some(config.llm.max_tokens),
        temperature: None,
    };

    let response = llm.create_chat_completion(&request).await?;
    debug!(
        provider = llm.provider_name(),
        finish_reason = %response.finish_reason,
        total_tokens = response.usage.total_tokens,
        "Completion received"
    );

    Ok(response.content)
}
