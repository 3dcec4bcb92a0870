//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PERLA` prefix and
//! nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use perla_interview::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Interviewing with {}", config.interview.model);
//! ```

mod ai;
mod error;
mod interview;
mod logging;

pub use ai::{AiConfig, OPENAI_API_KEY_VAR};
pub use error::{ConfigError, ValidationError};
pub use interview::InterviewConfig;
pub use logging::{LogFormat, LoggingConfig, DEFAULT_FILTER};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads; only the API
/// key is required, and that is checked by [`AppConfig::validate()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Completion provider (OpenAI key, endpoint, timeouts)
    #[serde(default)]
    pub ai: AiConfig,

    /// Model settings and protocol source
    #[serde(default)]
    pub interview: InterviewConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERLA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to plain `OPENAI_API_KEY` for the key
    ///
    /// # Environment Variable Format
    ///
    /// - `PERLA__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `PERLA__INTERVIEW__MODEL=gpt-4o-mini` -> `interview.model`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads the process environment only, without loading `.env`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERLA")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai = config.ai.with_env_fallback();
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.interview.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PERLA__AI__OPENAI_API_KEY",
        "PERLA__AI__BASE_URL",
        "PERLA__AI__TIMEOUT_SECS",
        "PERLA__AI__MAX_RETRIES",
        "PERLA__INTERVIEW__MODEL",
        "PERLA__INTERVIEW__TEMPERATURE",
        "PERLA__INTERVIEW__MAX_TOKENS",
        "PERLA__INTERVIEW__REQUEST_TIMEOUT_SECS",
        "PERLA__INTERVIEW__PROTOCOL_PATH",
        "PERLA__LOGGING__FORMAT",
        "OPENAI_API_KEY",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("PERLA__AI__OPENAI_API_KEY", "sk-prefixed");
        env::set_var("PERLA__AI__TIMEOUT_SECS", "30");
        env::set_var("PERLA__INTERVIEW__MODEL", "gpt-4o-mini");
        env::set_var("PERLA__LOGGING__FORMAT", "json");
        let result = AppConfig::from_env();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(
            config.ai.openai_api_key.unwrap().expose_secret(),
            "sk-prefixed"
        );
        assert_eq!(config.ai.timeout_secs, 30);
        assert_eq!(config.interview.model, "gpt-4o-mini");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_plain_openai_key_fallback() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-plain");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert!(config.ai.has_openai());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_prefixed_key_wins_over_plain() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-plain");
        env::set_var("PERLA__AI__OPENAI_API_KEY", "sk-prefixed");
        let result = AppConfig::from_env();
        clear_env();

        let key = result.unwrap().ai.openai_api_key.unwrap();
        assert_eq!(key.expose_secret(), "sk-prefixed");
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::from_env();

        let config = result.unwrap();
        assert_eq!(config.interview.model, "gpt-3.5-turbo");
        assert_eq!(config.interview.temperature, 0.0);
        assert_eq!(config.ai.timeout_secs, 60);
    }

    #[test]
    fn test_validate_requires_key() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_validate_checks_interview_section() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OPENAI_API_KEY", "sk-plain");
        env::set_var("PERLA__INTERVIEW__TEMPERATURE", "5.0");
        let result = AppConfig::from_env();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidInterview(_))
        ));
    }
}
