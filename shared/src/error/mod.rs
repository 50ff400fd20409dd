//! Unified error system for the cemetery registry
//!
//! - [`ErrorCode`]: standardized numeric codes, grouped by domain range
//! - [`ErrorCategory`]: classification of errors by domain
//! - [`ValidationError`]: field- or form-scoped user-facing failure
//!
//! # Example
//!
//! ```
//! use shared::error::{ErrorCode, ValidationError};
//!
//! let err = ValidationError::on_field(ErrorCode::AccountNumberFormat, "account_number");
//! assert_eq!(err.code.code(), 1001);
//! assert_eq!(err.to_string(), "Account number must be exactly 8 digits");
//! ```

mod codes;
mod types;

pub use codes::{ErrorCategory, ErrorCode};
pub use types::{ValidationError, ValidationResult};
