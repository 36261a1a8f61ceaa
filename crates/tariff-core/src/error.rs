//! Unified error handling for the tariff admin crates
//!
//! Every failure in the workspace is expressed as an [`AppError`]. Validation
//! problems stay field-local (see [`crate::validation`]); this type covers the
//! coarse outcomes a caller has to branch on: bad input, store rejection,
//! transport failure.

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // ==================== Resource Errors ====================
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    // ==================== Store / Transport Errors ====================
    #[error("Store rejected request with status {status}: {message}")]
    StoreRejected { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    // ==================== Internal Errors ====================
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error code for log output and API-facing surfaces
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::MissingField(_) => "missing_field",
            AppError::NotFound(_) => "not_found",
            AppError::Conflict(_) => "conflict",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::StoreRejected { .. } => "store_rejected",
            AppError::Transport(_) => "transport_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::Config(_) => "config_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// True for failures of the store round trip itself, as opposed to
    /// problems with the submitted data. The editing surface shows these as
    /// a general banner rather than a field-level hint.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::StoreRejected { .. }
        )
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation("name".to_string()).error_code(),
            "validation_error"
        );
        assert_eq!(
            AppError::StoreRejected {
                status: 500,
                message: "boom".to_string()
            }
            .error_code(),
            "store_rejected"
        );
    }

    #[test]
    fn test_transport_classification() {
        assert!(AppError::Transport("connection reset".to_string()).is_transport());
        assert!(AppError::StoreRejected {
            status: 502,
            message: "bad gateway".to_string()
        }
        .is_transport());
        assert!(!AppError::Validation("name".to_string()).is_transport());
        assert!(!AppError::NotFound("tariff 9".to_string()).is_transport());
    }
}
