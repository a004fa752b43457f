//! # Novelrec Core
//!
//! Shared building blocks for the Novelrec crates.
//!
//! ## Modules
//!
//! - `error`: Error types and handling
//! - `config`: Configuration loading and validation
//! - `observability`: Structured logging initialization
//! - `validation`: Validation helpers for numeric request parameters

pub mod config;
pub mod error;
pub mod observability;
pub mod validation;

// Re-export commonly used types
pub use config::{load_dotenv, parse_env_var, ConfigLoader, ENV_PREFIX};
pub use error::RecError;
pub use observability::{init_logging, LogConfig, LogFormat, ObservabilityError};
pub use validation::{
    validate_count, validate_finite, validate_metric, validate_range, validate_weight,
};

/// Result type alias for Novelrec operations
pub type Result<T> = std::result::Result<T, RecError>;
