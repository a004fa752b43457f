//! Error types shared by the Novelrec crates

use thiserror::Error;

/// Unified error type for Novelrec operations
///
/// Only structurally invalid input is an error. Empty results and partially
/// populated records are not errors and never surface through this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecError {
    /// Input rejected before any computation happened
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        field: Option<String>,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        key: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecError {
    /// Create a validation error without a field reference
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error pointing at a specific input field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a configuration error for an environment key
    pub fn configuration(message: impl Into<String>, key: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: key.map(str::to_string),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Name of the offending field or configuration key, if known
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::ValidationError { field, .. } => field.as_deref(),
            Self::ConfigurationError { key, .. } => key.as_deref(),
            Self::Internal(_) => None,
        }
    }
}
