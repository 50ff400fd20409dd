//! Cemetery Model

use crate::types::{CemeteryId, OrganizationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cemetery entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cemetery {
    pub id: CemeteryId,
    pub name: String,
    /// Operating organization
    pub organization_id: Option<OrganizationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CemeteryAddress>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Flattened address of a cemetery, carried verbatim into the outbox
/// wire format (the registry does not manage geographic entities).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CemeteryAddress {
    pub country: String,
    pub region: String,
    pub city: String,
    pub street: String,
    pub post_index: String,
    pub house: String,
    pub block: String,
    pub building: String,
}
