//! Interview configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::{ConfigurationError, SessionSettings, DEFAULT_MODEL};
use crate::domain::interview::InterviewProtocol;

/// Model and protocol settings for new sessions
#[derive(Debug, Clone, Deserialize)]
pub struct InterviewConfig {
    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default)]
    pub temperature: f32,

    /// Cap on reply length
    pub max_tokens: Option<u32>,

    /// Caller-side bound on one completion call, in seconds
    pub request_timeout_secs: Option<u64>,

    /// File overriding the built-in PHQ-9 instructions
    pub protocol_path: Option<PathBuf>,
}

impl InterviewConfig {
    /// Session settings for a new interview.
    pub fn to_settings(&self) -> SessionSettings {
        let mut settings = SessionSettings::default()
            .with_model(self.model.clone())
            .with_temperature(self.temperature);
        if let Some(max_tokens) = self.max_tokens {
            settings = settings.with_max_tokens(max_tokens);
        }
        if let Some(secs) = self.request_timeout_secs {
            settings = settings.with_request_timeout(Duration::from_secs(secs));
        }
        settings
    }

    /// The configured protocol, or the built-in PHQ-9 one.
    ///
    /// # Errors
    ///
    /// - `MissingProtocol` if the file cannot be read or is blank
    pub fn load_protocol(&self) -> Result<InterviewProtocol, ConfigurationError> {
        match &self.protocol_path {
            Some(path) => Ok(InterviewProtocol::from_file(path)?),
            None => Ok(InterviewProtocol::phq9()),
        }
    }

    /// Validate interview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_settings()
            .validate()
            .map_err(|e| ValidationError::InvalidInterview(e.to_string()))
    }
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: 0.0,
            max_tokens: None,
            request_timeout_secs: None,
            protocol_path: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::ProtocolError;
    use std::io::Write;

    #[test]
    fn test_interview_config_defaults() {
        let config = InterviewConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.to_settings(), SessionSettings::default());
    }

    #[test]
    fn test_to_settings_carries_overrides() {
        let config = InterviewConfig {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            max_tokens: Some(300),
            request_timeout_secs: Some(20),
            protocol_path: None,
        };

        let settings = config.to_settings();

        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.max_tokens, Some(300));
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_validation_rejects_temperature_out_of_range() {
        let config = InterviewConfig {
            temperature: 2.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidInterview(_))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = InterviewConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_protocol_defaults_to_phq9() {
        let protocol = InterviewConfig::default().load_protocol().unwrap();
        assert_eq!(protocol, InterviewProtocol::phq9());
    }

    #[test]
    fn test_load_protocol_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Custom instructions").unwrap();
        let config = InterviewConfig {
            protocol_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let protocol = config.load_protocol().unwrap();

        assert_eq!(protocol.instructions(), "Custom instructions");
    }

    #[test]
    fn test_blank_protocol_file_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  \n").unwrap();
        let config = InterviewConfig {
            protocol_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        let result = config.load_protocol();

        assert!(matches!(
            result,
            Err(ConfigurationError::MissingProtocol(ProtocolError::Empty))
        ));
    }

    #[test]
    fn test_missing_protocol_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = InterviewConfig {
            protocol_path: Some(dir.path().join("absent.txt")),
            ..Default::default()
        };

        assert!(matches!(
            config.load_protocol(),
            Err(ConfigurationError::MissingProtocol(ProtocolError::Unreadable { .. }))
        ));
    }
}
