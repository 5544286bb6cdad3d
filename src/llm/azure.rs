// Azure AI Inference adapter implementation
// Talks to the `/chat/completions` route exposed by Azure AI Foundry model
// deployments. The same wire format is spoken by OpenAI-compatible hosts
// (DeepSeek, vLLM, ...), which only differ in how the key is sent and in the
// absence of the `api-version` query parameter.

use crate::llm::provider::{LLMAdapter, LLMProviderConfig};
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub struct AzureInferenceAdapter {
    client: Client,
    provider: LLMProvider,
    endpoint: String,
    api_key: String,
    api_version: String,
}

// Request types for the chat completions API
#[derive(Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Response types for the chat completions API
#[derive(Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct InferenceErrorResponse {
    error: InferenceErrorBody,
}

#[derive(Deserialize)]
struct InferenceErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl AzureInferenceAdapter {
    pub fn new(config: &LLMProviderConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            provider: config.provider.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.endpoint)
    }
}

#[async_trait]
impl LLMAdapter for AzureInferenceAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        let body = ChatCompletionsRequest {
            model: &request.model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatMessage {
                    role: &m.role,
                    content: &m.content,
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let mut builder = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body);

        if self.provider == LLMProvider::Azure {
            builder = builder
                .query(&[("api-version", self.api_version.as_str())])
                .header("api-key", &self.api_key);
        }

        debug!(
            provider = %self.provider,
            model = %request.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Inference(format!("request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Inference provider returned an error");

            if let Ok(error_response) = serde_json::from_str::<InferenceErrorResponse>(&error_text) {
                return Err(AppError::Inference(format!(
                    "provider error ({}): {} (code: {})",
                    status,
                    error_response.error.message,
                    error_response
                        .error
                        .code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "none".to_string())
                )));
            }

            return Err(AppError::Inference(format!(
                "provider error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Inference(format!("failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Inference("provider returned no choices".to_string()))?;

        let usage = completion
            .usage
            .map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(LLMResponse {
            content: choice.message.content.unwrap_or_default(),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
            usage,
        })
    }
}
