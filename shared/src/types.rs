//! Identifier aliases
//!
//! Every entity in the registry is keyed by a UUID, matching the
//! upstream data the registry exchanges over the outbox. Aliases keep
//! signatures readable without wrapping each ID in a newtype.

use uuid::Uuid;

pub type CemeteryId = Uuid;
pub type PlaceId = Uuid;
pub type BurialId = Uuid;
pub type PersonId = Uuid;
pub type OrganizationId = Uuid;
pub type AgentId = Uuid;

/// Generate a fresh entity ID.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
