//! Per-session model settings.

use std::time::Duration;

use super::errors::ConfigurationError;

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Highest temperature the Chat Completions API accepts.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Settings passed to the collaborator on every call of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Model identifier.
    pub model: String,
    /// Sampling temperature; 0 keeps scoring as repeatable as the model allows.
    pub temperature: f32,
    /// Cap on reply length.
    pub max_tokens: Option<u32>,
    /// Caller-side bound on one completion call.
    pub request_timeout: Option<Duration>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: None,
            request_timeout: None,
        }
    }
}

impl SessionSettings {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    ///
    /// - `InvalidSettings` for a blank model, a temperature outside
    ///   `0.0..=2.0`, or a zero timeout
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.model.trim().is_empty() {
            return Err(ConfigurationError::InvalidSettings(
                "model cannot be empty".into(),
            ));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigurationError::InvalidSettings(format!(
                "temperature must be between 0.0 and {}, got {}",
                MAX_TEMPERATURE, self.temperature
            )));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigurationError::InvalidSettings(
                "request timeout must be positive".into(),
            ));
        }
        Ok(())
    }
}
