//! Configuration module for pricing-service.

use crate::services::validation::normalize_currency;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub pricing: PricingSettings,
}

#[derive(Debug, Clone)]
pub struct PricingSettings {
    pub default_currency: String,
    pub metric_catalog_path: Option<PathBuf>,
}

impl PricingConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let default_currency = env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "USD".to_string());
        let default_currency = normalize_currency(&default_currency).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("DEFAULT_CURRENCY is invalid: {}", e))
        })?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| "pricing-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            pricing: PricingSettings {
                default_currency,
                metric_catalog_path: env::var("METRIC_CATALOG_PATH")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .map(PathBuf::from),
            },
        })
    }
}
