//! Integration tests for environment configuration.

use pricing_service::config::PricingConfig;
use serial_test::serial;
use service_core::error::AppError;
use std::env;

fn clear_env() {
    for key in [
        "DEFAULT_CURRENCY",
        "METRIC_CATALOG_PATH",
        "SERVICE_NAME",
        "LOG_LEVEL",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults() {
    clear_env();

    let config = PricingConfig::from_env().unwrap();
    assert_eq!(config.service_name, "pricing-service");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.pricing.default_currency, "USD");
    assert!(config.pricing.metric_catalog_path.is_none());
}

#[test]
#[serial]
fn test_default_currency_is_normalized() {
    clear_env();
    env::set_var("DEFAULT_CURRENCY", "eur");
    env::set_var("METRIC_CATALOG_PATH", "/etc/pricing/metrics.json");

    let config = PricingConfig::from_env().unwrap();
    assert_eq!(config.pricing.default_currency, "EUR");
    assert_eq!(
        config.pricing.metric_catalog_path.as_deref(),
        Some(std::path::Path::new("/etc/pricing/metrics.json"))
    );

    clear_env();
}

#[test]
#[serial]
fn test_invalid_default_currency() {
    clear_env();
    env::set_var("DEFAULT_CURRENCY", "euro");

    let err = PricingConfig::from_env().unwrap_err();
    assert!(matches!(err, AppError::ConfigError(_)));
    assert_eq!(err.exit_code(), 78);

    clear_env();
}
