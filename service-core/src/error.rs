use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(anyhow::Error::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

/// Machine-readable error body written by command-line front ends.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Process exit status, following the sysexits(3) conventions.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::BadRequest(_) => 64,
            AppError::ValidationError(_) => 65,
            AppError::NotFound(_) => 66,
            AppError::InternalError(_) => 70,
            AppError::IoError(_) => 74,
            AppError::ConfigError(_) => 78,
        }
    }

    pub fn report(&self) -> ErrorReport {
        let (error, details) = match self {
            AppError::ValidationError(err) => ("Validation error".to_string(), Some(err.to_string())),
            AppError::BadRequest(err) => (err.to_string(), None),
            AppError::NotFound(err) => (err.to_string(), None),
            AppError::InternalError(err) => (
                "Internal error".to_string(),
                Some(format!("{:#}", err)),
            ),
            AppError::ConfigError(err) => (
                "Configuration error".to_string(),
                Some(err.to_string()),
            ),
            AppError::IoError(err) => ("I/O error".to_string(), Some(err.to_string())),
        };

        ErrorReport { error, details }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            AppError::BadRequest(anyhow::anyhow!("bad")),
            AppError::ValidationError(anyhow::anyhow!("invalid")),
            AppError::NotFound(anyhow::anyhow!("missing")),
            AppError::InternalError(anyhow::anyhow!("boom")),
            AppError::IoError(std::io::Error::other("disk")),
            AppError::ConfigError(anyhow::anyhow!("cfg")),
        ];

        let mut codes: Vec<u8> = errors.iter().map(AppError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_internal_error_hides_message_in_headline() {
        let report = AppError::InternalError(anyhow::anyhow!("schema mismatch")).report();
        assert_eq!(report.error, "Internal error");
        assert_eq!(report.details.as_deref(), Some("schema mismatch"));
    }

    #[test]
    fn test_json_error_maps_to_bad_request() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 64);
    }

    #[test]
    fn test_validation_errors_map_to_data_error() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "name",
            validator::ValidationError::new("required").with_message("Required".into()),
        );

        let err: AppError = errors.into();
        assert_eq!(err.exit_code(), 65);
        let report = err.report();
        assert_eq!(report.error, "Validation error");
        assert!(report.details.unwrap_or_default().contains("name"));
    }
}
