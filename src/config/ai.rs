//! Completion provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{OpenAIConfig, DEFAULT_BASE_URL};

/// Plain variable name accepted for the API key when the prefixed one is unset.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    /// Chat Completions base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Adapter retries on transient failures
    #[serde(default)]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an OpenAI key is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Fills in the key from `OPENAI_API_KEY` when the prefixed variable is unset.
    pub fn with_env_fallback(mut self) -> Self {
        if !self.has_openai() {
            if let Ok(key) = std::env::var(OPENAI_API_KEY_VAR) {
                self.openai_api_key = Some(Secret::new(key));
            }
        }
        self
    }

    /// Builds the adapter configuration.
    ///
    /// A missing key yields an empty secret, which the provider's credential
    /// check rejects before any interview starts.
    pub fn to_openai_config(&self) -> OpenAIConfig {
        let key = self
            .openai_api_key
            .clone()
            .unwrap_or_else(|| Secret::new(String::new()));
        OpenAIConfig::from_secret(key)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
            .with_max_retries(self.max_retries)
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() {
            return Err(ValidationError::MissingRequired(OPENAI_API_KEY_VAR));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}
