//! Environment-variable configuration.
//!
//! A missing credential is a startup-fatal error reported once on stderr;
//! it never enters the session state machine.

use std::env;
use std::error::Error;
use std::fmt;

pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Model used by the web surface, where there is no selection screen.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Standard creativity/randomness setting for every exchange.
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ApiKeyNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ApiKeyNotFound => write!(
                f,
                "API key not found in environment variable (checked environment variable: {API_KEY_ENV_VAR})"
            ),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Same as [`Config::load`] with the variable lookup injected, so tests
    /// never touch process-wide environment state.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        match lookup(API_KEY_ENV_VAR) {
            Some(api_key) if !api_key.is_empty() => Ok(Config { api_key }),
            _ => Err(ConfigError::ApiKeyNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_with_returns_key_when_present() {
        let config =
            Config::load_with(|name| (name == API_KEY_ENV_VAR).then(|| "sk-test".to_string()))
                .unwrap();
        assert_eq!(config.api_key, "sk-test");
    }

    #[test]
    fn load_with_fails_when_variable_is_absent() {
        let err = Config::load_with(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::ApiKeyNotFound);
    }

    #[test]
    fn load_with_fails_when_variable_is_empty() {
        let err = Config::load_with(|_| Some(String::new())).unwrap_err();
        assert_eq!(err, ConfigError::ApiKeyNotFound);
    }

    #[test]
    fn error_message_names_the_variable() {
        let message = ConfigError::ApiKeyNotFound.to_string();
        assert!(message.contains(API_KEY_ENV_VAR));
    }
}
