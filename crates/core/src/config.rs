//! Shared configuration loading for Novelrec crates
//!
//! All configuration uses the `NOVELREC_` prefix for environment variables.
//! Override hierarchy: defaults < .env < environment.
//!
//! # Example
//!
//! ```no_run
//! use novelrec_core::config::{load_dotenv, ConfigLoader};
//! use novelrec_core::observability::LogConfig;
//!
//! # fn example() -> Result<(), novelrec_core::RecError> {
//! load_dotenv();
//!
//! let log_config = LogConfig::from_env()?;
//! log_config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::RecError;

/// Prefix shared by every Novelrec environment variable
pub const ENV_PREFIX: &str = "NOVELREC_";

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// Missing optional values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a variable is present but cannot be parsed.
    fn from_env() -> Result<Self, RecError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), RecError>;

    /// Load from the environment and validate in one step
    fn load_validated() -> Result<Self, RecError> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
pub fn parse_env_var<T>(key: &str, default: T) -> Result<T, RecError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>().map_err(|e| RecError::ConfigurationError {
                message: format!("Failed to parse {}: {}", key, e),
                key: Some(key.to_string()),
            })
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// Does not return an error if the .env file is not found.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "Failed to load .env file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_env_var_with_default() {
        let result: u32 = parse_env_var("NOVELREC_NON_EXISTENT_VAR", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_env_var_with_value() {
        env::set_var("NOVELREC_TEST_PARSE_VAR", "100");
        let result: u32 = parse_env_var("NOVELREC_TEST_PARSE_VAR", 42).unwrap();
        assert_eq!(result, 100);
        env::remove_var("NOVELREC_TEST_PARSE_VAR");
    }

    #[test]
    fn test_parse_env_var_invalid_value() {
        env::set_var("NOVELREC_TEST_INVALID_VAR", "not-a-number");
        let result: Result<u32, _> = parse_env_var("NOVELREC_TEST_INVALID_VAR", 42);
        match result.unwrap_err() {
            RecError::ConfigurationError { key, .. } => {
                assert_eq!(key.as_deref(), Some("NOVELREC_TEST_INVALID_VAR"));
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
        env::remove_var("NOVELREC_TEST_INVALID_VAR");
    }
}
