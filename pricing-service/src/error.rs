//! Error types for pricing operations.

use crate::services::validation::ValidationFailure;
use service_core::error::AppError;
use thiserror::Error;

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur in the pricing domain
#[derive(Debug, Error)]
pub enum PricingError {
    /// Form input failed its shape's rules. Carries every failing field.
    #[error("Validation failed: {0}")]
    Validation(ValidationFailure),

    /// Wire discriminator does not match any known shape (producer/consumer mismatch).
    #[error("Unknown pricing shape: {0}")]
    UnknownShape(String),

    /// Known discriminator, but the body does not match its shape.
    #[error("Malformed pricing payload: {0}")]
    MalformedPayload(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid decimal for {field}: {value:?}")]
    InvalidDecimal { field: &'static str, value: String },

    #[error("Invalid integer for {field}: {value}")]
    InvalidInteger { field: &'static str, value: String },

    /// A single capacity payload maps exactly one threshold row.
    #[error("Expected exactly one capacity threshold, got {0}")]
    ThresholdCount(usize),

    #[error("Price list is empty")]
    EmptyPriceList,

    #[error("Inconsistent price list: {0}")]
    InconsistentPriceList(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrency(String),

    #[error("Metric catalog error: {0}")]
    Catalog(String),
}

impl From<ValidationFailure> for PricingError {
    fn from(failure: ValidationFailure) -> Self {
        PricingError::Validation(failure)
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Validation(_) | PricingError::InvalidCurrency(_) => {
                AppError::ValidationError(anyhow::Error::new(err))
            }
            PricingError::UnknownMetric(_) => AppError::NotFound(anyhow::Error::new(err)),
            PricingError::MalformedPayload(_)
            | PricingError::MissingField(_)
            | PricingError::InvalidDecimal { .. }
            | PricingError::InvalidInteger { .. }
            | PricingError::ThresholdCount(_)
            | PricingError::EmptyPriceList
            | PricingError::InconsistentPriceList(_) => AppError::BadRequest(anyhow::Error::new(err)),
            PricingError::Catalog(_) => AppError::ConfigError(anyhow::Error::new(err)),
            PricingError::UnknownShape(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_shape_is_internal() {
        let err: AppError = PricingError::UnknownShape("usage_bogus".to_string()).into();
        assert!(matches!(err, AppError::InternalError(_)));
    }

    #[test]
    fn test_missing_field_is_bad_request() {
        let err: AppError = PricingError::MissingField("term").into();
        assert_eq!(err.exit_code(), 64);
    }
}
