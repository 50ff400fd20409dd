//! Burial Model

use crate::models::document::Doverennost;
use crate::models::operation::Operation;
use crate::models::person::PersonRef;
use crate::types::{AgentId, BurialId, OrganizationId, PersonId, PlaceId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Customer ordering the burial
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Customer {
    Person(PersonId),
    Organization(OrganizationId),
}

/// Agent acting for an organization customer, with the doverennost
/// authorizing them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAuthorization {
    pub agent_id: AgentId,
    pub doverennost: Doverennost,
}

/// Burial entity
///
/// Lifecycle: created on validated submission, soft-deleted via
/// `is_trash`, optionally exhumated (after which it no longer occupies
/// a room). `account_number` is unique within the cemetery and
/// year-prefixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Burial {
    pub id: BurialId,
    pub place_id: PlaceId,
    /// The deceased
    pub person_id: PersonId,
    pub operation: Operation,
    /// 8-digit year-prefixed registry number
    pub account_number: String,
    /// Factual burial date
    pub date_fact: NaiveDate,
    pub exhumated_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentAuthorization>,
    /// Room slot index within the place, `[0, rooms)`
    pub grave_id: Option<u32>,
    /// Soft-delete flag
    pub is_trash: bool,
    pub created_at: DateTime<Utc>,
}

impl Burial {
    /// Whether this burial currently consumes a room of its place
    pub fn occupies_room(&self) -> bool {
        self.operation.occupies_room() && self.exhumated_date.is_none() && !self.is_trash
    }

    /// Whether this burial blocks a grave slot from reuse
    pub fn blocks_slot(&self) -> bool {
        self.exhumated_date.is_none() && !self.is_trash
    }
}

/// A burial submission, validated atomically before any persistence
///
/// Mirrors the legacy burial form: hidden references plus the
/// user-entered fields and the duplicate-override checkbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurialSubmission {
    /// Set when editing an existing record
    #[serde(default)]
    pub id: Option<BurialId>,
    pub place_id: PlaceId,
    pub person: PersonRef,
    pub operation: Operation,
    /// Empty means "generate for me"
    #[serde(default)]
    pub account_number: Option<String>,
    pub date_fact: NaiveDate,
    #[serde(default)]
    pub exhumated_date: Option<NaiveDate>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub agent: Option<AgentAuthorization>,
    /// Responsible person to record on the place
    #[serde(default)]
    pub responsible: Option<PersonId>,
    /// Explicit confirmation to save a detected duplicate
    #[serde(default)]
    pub allow_duplicates: bool,
}
