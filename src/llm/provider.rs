use async_trait::async_trait;
use std::sync::Arc;
use crate::config::LLMConfig;
use crate::types::{AppResult, LLMProvider, LLMRequest, LLMResponse};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse>;
}

#[async_trait]
impl<T: LLMAdapter + ?Sized> LLMAdapter for Arc<T> {
    async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        (**self).create_chat_completion(request).await
    }
}

/// Connection settings for an inference provider
#[derive(Clone)]
pub struct LLMProviderConfig {
    pub provider: LLMProvider,
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl From<&LLMConfig> for LLMProviderConfig {
    fn from(config: &LLMConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider_name: String,
}

impl LLM {
    pub fn new(provider: LLMProviderConfig) -> AppResult<Self> {
        let provider_name = provider.provider.to_string();
        let adapter: Box<dyn LLMAdapter> = match provider.provider {
            LLMProvider::Azure | LLMProvider::OpenAI => {
                Box::new(crate::llm::azure::AzureInferenceAdapter::new(&provider)?)
            }
        };

        Ok(Self {
            adapter,
            provider_name,
        })
    }

    /// Wrap an already constructed adapter
    pub fn from_adapter(name: impl Into<String>, adapter: Box<dyn LLMAdapter>) -> Self {
        Self {
            adapter,
            provider_name: name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    pub async fn create_chat_completion(&self, request: &LLMRequest) -> AppResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }
}
