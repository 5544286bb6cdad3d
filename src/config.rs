use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;

use crate::types::LLMProvider;

const DEFAULT_API_VERSION: &str = "2024-05-01-preview";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
    pub hosting: HostingMode,
}

/// Which runtime is serving the router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingMode {
    Standalone,
    AzureFunctions,
}

impl HostingMode {
    pub fn welcome_message(&self) -> &'static str {
        match self {
            HostingMode::Standalone => "Bienvenido a la API de DeepSeek",
            HostingMode::AzureFunctions => "Bienvenido a la API de DeepSeek en Azure Functions",
        }
    }
}

#[derive(Clone)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub api_version: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl fmt::Debug for LLMConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LLMConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_version", &self.api_version)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| anyhow!("{} must be set", key))
        };
        let or_default = |key: &str, default: &str| -> String {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            server: ServerConfig {
                port: parse_var("PORT", &or_default("PORT", "8000"))?,
                host: or_default("HOST", "0.0.0.0"),
                cors_allowed_origins: or_default("ALLOWED_ORIGINS", "*")
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                max_upload_bytes: parse_var(
                    "MAX_UPLOAD_BYTES",
                    &or_default("MAX_UPLOAD_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string()),
                )?,
                hosting: HostingMode::Standalone,
            },
            llm: LLMConfig {
                provider: or_default("INFERENCE_PROVIDER", "azure")
                    .parse::<LLMProvider>()
                    .map_err(|e| anyhow!("INFERENCE_PROVIDER: {}", e))?,
                endpoint: required("AZURE_INFERENCE_SDK_ENDPOINT")?,
                api_key: required("AZURE_INFERENCE_SDK_KEY")?,
                model: required("DEPLOYMENT_NAME")?,
                api_version: or_default("INFERENCE_API_VERSION", DEFAULT_API_VERSION),
                max_tokens: parse_var(
                    "INFERENCE_MAX_TOKENS",
                    &or_default("INFERENCE_MAX_TOKENS", &DEFAULT_MAX_TOKENS.to_string()),
                )?,
                timeout_secs: parse_var(
                    "INFERENCE_TIMEOUT_SECS",
                    &or_default("INFERENCE_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string()),
                )?,
            },
        })
    }

    /// Switch to the Azure Functions custom handler runtime.
    ///
    /// The Functions host hands the listening port over in
    /// `FUNCTIONS_CUSTOMHANDLER_PORT`; when it is absent the configured port is kept.
    pub fn for_azure_functions(mut self, custom_handler_port: Option<String>) -> Result<Self> {
        self.server.hosting = HostingMode::AzureFunctions;
        if let Some(port) = custom_handler_port.filter(|p| !p.trim().is_empty()) {
            self.server.port = parse_var("FUNCTIONS_CUSTOMHANDLER_PORT", port.trim())?;
        }
        Ok(self)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("AZURE_INFERENCE_SDK_ENDPOINT", "https://example.services.ai.azure.com/models"),
            ("AZURE_INFERENCE_SDK_KEY", "secret-key"),
            ("DEPLOYMENT_NAME", "DeepSeek-R1"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.server.hosting, HostingMode::Standalone);
        assert_eq!(config.llm.provider, LLMProvider::Azure);
        assert_eq!(config.llm.model, "DeepSeek-R1");
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.llm.api_version, DEFAULT_API_VERSION);
    }

    #[test]
    fn test_missing_required_variable_fails() {
        for missing in ["AZURE_INFERENCE_SDK_ENDPOINT", "AZURE_INFERENCE_SDK_KEY", "DEPLOYMENT_NAME"] {
            let vars: Vec<_> = required_vars()
                .into_iter()
                .filter(|(k, _)| *k != missing)
                .collect();
            let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
            assert!(err.to_string().contains(missing), "{}", err);
        }
    }

    #[test]
    fn test_blank_required_variable_fails() {
        let mut vars = required_vars();
        vars[1] = ("AZURE_INFERENCE_SDK_KEY", "   ");
        assert!(Config::from_lookup(lookup_from(&vars)).is_err());
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let mut vars = required_vars();
        vars.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_origins_split() {
        let mut vars = required_vars();
        vars.push(("ALLOWED_ORIGINS", "https://a.example, https://b.example,"));
        let config = Config::from_lookup(lookup_from(&vars)).unwrap();
        assert_eq!(
            config.server.cors_allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_azure_functions_port_override() {
        let config = Config::from_lookup(lookup_from(&required_vars()))
            .unwrap()
            .for_azure_functions(Some("7071".to_string()))
            .unwrap();
        assert_eq!(config.server.port, 7071);
        assert_eq!(config.server.hosting, HostingMode::AzureFunctions);
        assert!(config.server.hosting.welcome_message().ends_with("Azure Functions"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config::from_lookup(lookup_from(&required_vars())).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}
