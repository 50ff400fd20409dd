//! Shared types for the cemetery registry
//!
//! Common types used across the registry crates: domain models,
//! identifier aliases, the unified error system and natural-sort
//! utilities.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Error re-exports (for convenient access)
pub use error::{ErrorCode, ValidationError, ValidationResult};

// Event re-exports
pub use models::DomainEvent;
