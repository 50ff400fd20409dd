//! Engine-level errors

use shared::error::ValidationError;
use shared::types::{BurialId, CemeteryId, OrganizationId, PersonId, PlaceId};
use thiserror::Error;

/// Registry errors
///
/// Validation failures carry the field/form scope from
/// [`ValidationError`]; lookup failures on required related records are
/// fatal for the request, there is no recovery path.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Duplicate burials found; the candidate set is exposed so the
    /// caller can confirm and resubmit with the override flag
    #[error("duplicate burials detected ({} candidates)", .0.len())]
    Duplicates(Vec<BurialId>),

    #[error("cemetery not found: {0}")]
    CemeteryNotFound(CemeteryId),

    #[error("place not found: {0}")]
    PlaceNotFound(PlaceId),

    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("burial not found: {0}")]
    BurialNotFound(BurialId),

    #[error("organization not found: {0}")]
    OrganizationNotFound(OrganizationId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
