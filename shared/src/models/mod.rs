//! Domain models
//!
//! Shared between the registry engine and the outbox tooling. All IDs
//! are UUIDs (see [`crate::types`]).

pub mod burial;
pub mod cemetery;
pub mod document;
pub mod event;
pub mod operation;
pub mod organization;
pub mod person;
pub mod place;

// Re-exports
pub use burial::*;
pub use cemetery::*;
pub use document::*;
pub use event::*;
pub use operation::*;
pub use organization::*;
pub use person::*;
pub use place::*;
