//! Environment-driven logging configuration

use novelrec_core::{ConfigLoader, LogConfig, LogFormat, RecError};

#[test]
fn test_log_config_from_environment() {
    std::env::remove_var("NOVELREC_LOG_LEVEL");
    std::env::remove_var("NOVELREC_LOG_FORMAT");
    assert_eq!(LogConfig::load_validated().unwrap(), LogConfig::default());

    std::env::set_var("NOVELREC_LOG_LEVEL", "debug");
    std::env::set_var("NOVELREC_LOG_FORMAT", "pretty");
    let config = LogConfig::load_validated().unwrap();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Pretty);

    std::env::set_var("NOVELREC_LOG_FORMAT", "xml");
    match LogConfig::from_env() {
        Err(RecError::ConfigurationError { key, .. }) => {
            assert_eq!(key.as_deref(), Some("NOVELREC_LOG_FORMAT"));
        }
        other => panic!("Expected ConfigurationError, got {:?}", other),
    }

    std::env::set_var("NOVELREC_LOG_FORMAT", "json");
    std::env::set_var("NOVELREC_LOG_LEVEL", "chatty");
    assert!(LogConfig::load_validated().is_err());

    std::env::remove_var("NOVELREC_LOG_LEVEL");
    std::env::remove_var("NOVELREC_LOG_FORMAT");
}
