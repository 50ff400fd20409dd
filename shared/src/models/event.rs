//! Domain Events
//!
//! Explicit events published by the registry on state change. They
//! replace the legacy signal-driven "last sync date" invalidation: the
//! outbox exporter derives its dirty sets from the journal instead of
//! from persisted timestamp columns.

use crate::types::{BurialId, CemeteryId, PlaceId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Event published on registry state change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    CemeterySaved {
        cemetery_id: CemeteryId,
    },
    PlaceSaved {
        place_id: PlaceId,
        cemetery_id: CemeteryId,
    },
    BurialRecorded {
        burial_id: BurialId,
        place_id: PlaceId,
        cemetery_id: CemeteryId,
        account_number: String,
    },
    BurialUpdated {
        burial_id: BurialId,
        cemetery_id: CemeteryId,
    },
    BurialTrashed {
        burial_id: BurialId,
        cemetery_id: CemeteryId,
    },
    BurialRestored {
        burial_id: BurialId,
        cemetery_id: CemeteryId,
    },
    BurialExhumed {
        burial_id: BurialId,
        cemetery_id: CemeteryId,
        exhumated_date: NaiveDate,
    },
    GraveAssigned {
        burial_id: BurialId,
        place_id: PlaceId,
        grave_id: u32,
    },
    RoomsRecounted {
        place_id: PlaceId,
        rooms_free: u32,
    },
}

impl DomainEvent {
    /// Cemetery whose export snapshot this event invalidates, if any
    pub fn cemetery_id(&self) -> Option<CemeteryId> {
        match self {
            Self::CemeterySaved { cemetery_id }
            | Self::PlaceSaved { cemetery_id, .. }
            | Self::BurialRecorded { cemetery_id, .. }
            | Self::BurialUpdated { cemetery_id, .. }
            | Self::BurialTrashed { cemetery_id, .. }
            | Self::BurialRestored { cemetery_id, .. }
            | Self::BurialExhumed { cemetery_id, .. } => Some(*cemetery_id),
            Self::GraveAssigned { .. } | Self::RoomsRecounted { .. } => None,
        }
    }

    /// Burial whose export snapshot this event invalidates, if any
    pub fn burial_id(&self) -> Option<BurialId> {
        match self {
            Self::BurialRecorded { burial_id, .. }
            | Self::BurialUpdated { burial_id, .. }
            | Self::BurialTrashed { burial_id, .. }
            | Self::BurialRestored { burial_id, .. }
            | Self::BurialExhumed { burial_id, .. }
            | Self::GraveAssigned { burial_id, .. } => Some(*burial_id),
            Self::CemeterySaved { .. } | Self::PlaceSaved { .. } | Self::RoomsRecounted { .. } => {
                None
            }
        }
    }
}
