//! Validation error types

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A field- or form-scoped validation failure
///
/// `field` is `None` for form-level errors (the legacy registry raised
/// those from the form `clean()` hook) and names the offending field
/// otherwise. Rejection is atomic: a returned error means no state was
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Field the error is scoped to, if any
    pub field: Option<&'static str>,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Form-level error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            field: None,
            message: code.message().to_string(),
        }
    }

    /// Field-level error with the default message for the code
    pub fn on_field(code: ErrorCode, field: &'static str) -> Self {
        Self {
            code,
            field: Some(field),
            message: code.message().to_string(),
        }
    }

    /// Override the message while keeping code and scope
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Result type for validation checks
pub type ValidationResult<T = ()> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_level_error() {
        let err = ValidationError::new(ErrorCode::DuplicateBurial);
        assert_eq!(err.code, ErrorCode::DuplicateBurial);
        assert!(err.field.is_none());
        assert_eq!(err.message, "Duplicate burials detected");
    }

    #[test]
    fn test_field_level_error() {
        let err = ValidationError::on_field(ErrorCode::AccountNumberFormat, "account_number");
        assert_eq!(err.field, Some("account_number"));
    }

    #[test]
    fn test_custom_message() {
        let err = ValidationError::new(ErrorCode::NoFreeRooms).with_message("no rooms at уч. 5");
        assert_eq!(err.message, "no rooms at уч. 5");
        assert_eq!(err.code, ErrorCode::NoFreeRooms);
    }
}
