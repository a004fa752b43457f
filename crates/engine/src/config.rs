//! Engine configuration
//!
//! Per-request defaults only. Formula constants live in [`crate::scoring`].
//!
//! # Environment Variables
//!
//! - `NOVELREC_K_NEIGHBORS` (default: 10)
//! - `NOVELREC_N_RECOMMENDATIONS` (default: 10)
//! - `NOVELREC_CF_WEIGHT` / `NOVELREC_CB_WEIGHT` (default: 0.6 / 0.4)
//! - `NOVELREC_WINDOW_HOURS` (default: 24)
//! - `NOVELREC_DIVERSITY_LAMBDA` (default: 0.7)
//! - `NOVELREC_CACHE_ENABLED` (default: false)
//!
//! Values may also come from an optional `config/recommend.{toml,yaml,json}` file;
//! the environment wins.

use crate::diversity::DEFAULT_LAMBDA;
use crate::hybrid::BlendWeights;
use crate::scoring::SCORING_V1;
use novelrec_core::{validate_count, validate_range, ConfigLoader, RecError};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config/recommend";
const ENV_PREFIX: &str = "NOVELREC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Neighbours consulted by collaborative filtering
    pub k_neighbors: usize,
    /// Default list length
    pub n_recommendations: usize,
    pub cf_weight: f64,
    pub cb_weight: f64,
    /// Window for single-item trending scores
    pub window_hours: u32,
    /// Relevance/diversity balance for MMR re-ranking
    pub diversity_lambda: f64,
    /// Keep a shared similarity cache across requests
    ///
    /// Callers that enable it must invalidate users and items whose data changed.
    pub cache_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let blend = BlendWeights::default();
        Self {
            k_neighbors: 10,
            n_recommendations: 10,
            cf_weight: blend.collaborative,
            cb_weight: blend.content,
            window_hours: SCORING_V1.trending.default_window_hours,
            diversity_lambda: DEFAULT_LAMBDA,
            cache_enabled: false,
        }
    }
}

impl EngineConfig {
    pub fn blend_weights(&self) -> BlendWeights {
        BlendWeights::new(self.cf_weight, self.cb_weight)
    }

    fn to_config_error(err: RecError) -> RecError {
        match err {
            RecError::ValidationError { message, field } => RecError::ConfigurationError {
                key: field.map(|f| format!("{}_{}", ENV_PREFIX, f.to_ascii_uppercase())),
                message,
            },
            other => other,
        }
    }
}

impl ConfigLoader for EngineConfig {
    fn from_env() -> Result<Self, RecError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| {
                RecError::configuration(format!("Failed to load engine config: {}", e), None)
            })?;

        settings
            .try_deserialize()
            .map_err(|e| RecError::configuration(format!("Invalid engine config: {}", e), None))
    }

    fn validate(&self) -> Result<(), RecError> {
        validate_count(self.k_neighbors, "k_neighbors").map_err(Self::to_config_error)?;
        validate_count(self.n_recommendations, "n_recommendations")
            .map_err(Self::to_config_error)?;
        self.blend_weights().validate().map_err(Self::to_config_error)?;
        validate_count(self.window_hours as usize, "window_hours").map_err(Self::to_config_error)?;
        validate_range(self.diversity_lambda, 0.0, 1.0, "diversity_lambda")
            .map_err(Self::to_config_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.k_neighbors, 10);
        assert_eq!(config.n_recommendations, 10);
        assert_eq!(config.cf_weight, 0.6);
        assert_eq!(config.cb_weight, 0.4);
        assert_eq!(config.window_hours, 24);
        assert!(!config.cache_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_neighbors_rejected_as_configuration_error() {
        let config = EngineConfig {
            k_neighbors: 0,
            ..EngineConfig::default()
        };
        match config.validate().unwrap_err() {
            RecError::ConfigurationError { key, .. } => {
                assert_eq!(key.as_deref(), Some("NOVELREC_K_NEIGHBORS"));
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_weight_rejected() {
        let config = EngineConfig {
            cb_weight: -1.0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lambda_out_of_range_rejected() {
        let config = EngineConfig {
            diversity_lambda: 1.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"k_neighbors": 25}"#).unwrap();
        assert_eq!(config.k_neighbors, 25);
        assert_eq!(config.n_recommendations, 10);
    }
}
