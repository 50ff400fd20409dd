//! Registry configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | OUTBOX_DIR | /var/cemetery/outbox | Outbox export directory |
//! | REGISTRY_HOST | hostname of the machine | Host tag in outbox file names |
//! | SERVER_UUID | generated on startup | Server identity in outbox file names |

use std::path::PathBuf;
use uuid::Uuid;

/// Grave reuse window: an occupied grave accepts an additional burial
/// only after this many years.
pub const GRAVE_REUSE_WINDOW_YEARS: i64 = 20;

/// Oldest acceptable customer document, counted back from the burial
/// date.
pub const CUSTOMER_DOCUMENT_MAX_AGE_YEARS: i64 = 75;

/// Maximum plausible lifespan between birth and death dates.
pub const MAX_LIFESPAN_YEARS: i64 = 150;

/// Business-policy thresholds
///
/// The year values encode undocumented registry policy carried over
/// verbatim; windows are day-counted (`years * 365`) exactly as the
/// legacy registry counted them.
#[derive(Debug, Clone, Copy)]
pub struct Policy {
    pub grave_reuse_window_years: i64,
    pub customer_document_max_age_years: i64,
    pub max_lifespan_years: i64,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            grave_reuse_window_years: GRAVE_REUSE_WINDOW_YEARS,
            customer_document_max_age_years: CUSTOMER_DOCUMENT_MAX_AGE_YEARS,
            max_lifespan_years: MAX_LIFESPAN_YEARS,
        }
    }
}

impl Policy {
    /// Day-counted window for the given number of policy years
    pub fn window_days(years: i64) -> chrono::Duration {
        chrono::Duration::days(years * 365)
    }
}

/// Registry configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the outbox exporter writes to
    pub outbox_dir: PathBuf,
    /// Host tag embedded in outbox file names
    pub host: String,
    /// Server identity embedded in outbox file names
    pub server_uuid: Uuid,
    /// Business-policy thresholds
    pub policy: Policy,
}

impl Config {
    /// Load configuration from environment variables, using defaults
    /// for anything unset
    pub fn from_env() -> Self {
        Self {
            outbox_dir: std::env::var("OUTBOX_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/var/cemetery/outbox")),
            host: std::env::var("REGISTRY_HOST")
                .or_else(|_| std::env::var("HOSTNAME"))
                .unwrap_or_else(|_| "localhost".into()),
            server_uuid: std::env::var("SERVER_UUID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(Uuid::new_v4),
            policy: Policy::default(),
        }
    }

    /// Override the outbox directory, common in tests
    pub fn with_outbox_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outbox_dir = dir.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let p = Policy::default();
        assert_eq!(p.grave_reuse_window_years, 20);
        assert_eq!(p.customer_document_max_age_years, 75);
        assert_eq!(p.max_lifespan_years, 150);
    }

    #[test]
    fn test_window_days_matches_legacy_counting() {
        assert_eq!(Policy::window_days(20).num_days(), 7300);
        assert_eq!(Policy::window_days(75).num_days(), 27375);
    }
}
