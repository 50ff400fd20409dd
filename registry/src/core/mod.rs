//! Core infrastructure: configuration and engine errors

mod config;
mod error;

pub use config::{
    CUSTOMER_DOCUMENT_MAX_AGE_YEARS, Config, GRAVE_REUSE_WINDOW_YEARS, MAX_LIFESPAN_YEARS, Policy,
};
pub use error::{RegistryError, RegistryResult};
