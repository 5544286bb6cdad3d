//! Summarize Agent
//!
//! Extracts the text of an uploaded document and asks the model for a
//! summary. The reply is cleaned of reasoning markup before it is returned.

use crate::agents::{complete, sanitize::strip_think_tags};
use crate::config::Config;
use crate::extraction::TextExtractor;
use crate::llm::LLM;
use crate::models::UploadedFile;
use crate::types::{AppError, AppResult, LLMMessage};
use tracing::{info, warn};

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful assistant. Summarize the text provided.";
pub const SUMMARY_USER_PREFIX: &str = "Resumen del texto: ";

pub struct SummarizeAgent;

impl SummarizeAgent {
    /// Build the system/user message pair for a document's text
    pub fn build_messages(extracted_text: &str) -> Vec<LLMMessage> {
        vec![
            LLMMessage::system(SUMMARY_SYSTEM_PROMPT),
            LLMMessage::user(format!("{}{}", SUMMARY_USER_PREFIX, extracted_text)),
        ]
    }

    /// Summarize an uploaded document
    pub async fn summarize(file: UploadedFile, llm: &LLM, config: &Config) -> AppResult<String> {
        let filename = file.filename.clone();
        info!(filename = %filename, bytes = file.content.len(), "Summarizing document");

        // PDF and DOCX parsing is CPU bound
        let extracted = tokio::task::spawn_blocking(move || TextExtractor::extract_file(&file))
            .await
            .map_err(|e| AppError::Internal(format!("extraction task failed: {}", e)))??;

        let raw = complete(llm, config, Self::build_messages(&extracted)).await?;
        let summary = strip_think_tags(&raw);

        if summary.is_empty() {
            warn!(filename = %filename, raw_len = raw.len(), "Model returned no usable summary");
            return Err(AppError::EmptySummary);
        }

        info!(filename = %filename, summary_len = summary.len(), "Summary generated");
        Ok(summary)
    }
}
