//! Environment-driven engine configuration
//!
//! Kept in its own test binary: it mutates process environment variables.

use anyhow::Result;
use novelrec_core::{ConfigLoader, RecError};
use novelrec_engine::{EngineConfig, RecommendationEngine};

#[test]
fn test_engine_config_from_environment() -> Result<()> {
    std::env::set_var("NOVELREC_K_NEIGHBORS", "25");
    std::env::set_var("NOVELREC_CF_WEIGHT", "0.8");
    std::env::set_var("NOVELREC_CACHE_ENABLED", "false");

    let config = EngineConfig::load_validated()?;
    assert_eq!(config.k_neighbors, 25);
    assert_eq!(config.cf_weight, 0.8);
    assert_eq!(config.cb_weight, 0.4);
    assert!(!config.cache_enabled);

    let engine = RecommendationEngine::from_env()?;
    assert!(engine.cache().is_none());

    std::env::set_var("NOVELREC_N_RECOMMENDATIONS", "0");
    let err = EngineConfig::load_validated().unwrap_err();
    assert!(matches!(err, RecError::ConfigurationError { .. }));
    assert_eq!(err.field(), Some("NOVELREC_N_RECOMMENDATIONS"));

    std::env::set_var("NOVELREC_N_RECOMMENDATIONS", "many");
    assert!(EngineConfig::from_env().is_err());

    for key in [
        "NOVELREC_K_NEIGHBORS",
        "NOVELREC_CF_WEIGHT",
        "NOVELREC_CACHE_ENABLED",
        "NOVELREC_N_RECOMMENDATIONS",
    ] {
        std::env::remove_var(key);
    }
    Ok(())
}
