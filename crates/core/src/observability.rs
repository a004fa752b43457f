//! Structured logging initialization
//!
//! Library code only emits `tracing` events. Hosts that embed the engine call
//! [`init_logging`] once at startup to install a subscriber.

use crate::config::{parse_env_var, ConfigLoader};
use crate::error::RecError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("Global subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Logging configuration
///
/// # Environment Variables
///
/// - `NOVELREC_LOG_LEVEL` (optional): default filter level (default: info)
/// - `NOVELREC_LOG_FORMAT` (optional): `json` or `pretty` (default: json)
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
            with_target: true,
        }
    }
}

impl ConfigLoader for LogConfig {
    fn from_env() -> Result<Self, RecError> {
        let defaults = Self::default();
        let level = parse_env_var("NOVELREC_LOG_LEVEL", defaults.level)?;
        let format = parse_env_var("NOVELREC_LOG_FORMAT", defaults.format)?;

        Ok(Self {
            level,
            format,
            with_target: defaults.with_target,
        })
    }

    fn validate(&self) -> Result<(), RecError> {
        if !VALID_LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(RecError::configuration(
                format!(
                    "Invalid log level '{}', expected one of {:?}",
                    self.level, VALID_LEVELS
                ),
                Some("NOVELREC_LOG_LEVEL"),
            ));
        }
        Ok(())
    }
}

impl LogConfig {
    fn env_filter(&self) -> Result<EnvFilter, ObservabilityError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.level)
                .map_err(|_| ObservabilityError::InvalidFilter(self.level.clone())),
        }
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns `AlreadyInitialized` if a global subscriber was installed before,
/// so calling this twice is harmless.
pub fn init_logging(config: &LogConfig) -> Result<(), ObservabilityError> {
    let filter = config.env_filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.with_target),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(config.with_target),
            )
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}
