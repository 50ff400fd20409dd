//! Place Model

use crate::types::{CemeteryId, PersonId, PlaceId};
use crate::util::NaturalKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Burial plot, identified by cemetery/area/row/seat
///
/// `rooms` is the fenced-plot capacity; `rooms_free` is derived and
/// recomputed by the allocator whenever a burial is saved. Invariant:
/// `rooms_free = max(0, rooms - occupied_count)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub cemetery_id: CemeteryId,
    /// Area (участок), lowercased on save
    pub area: String,
    /// Row (ряд), lowercased on save
    pub row: String,
    /// Seat number (место), lowercased on save; 8-digit year-prefixed
    /// when assigned by the registry
    pub seat: Option<String>,
    pub gps_x: Option<f64>,
    pub gps_y: Option<f64>,
    pub gps_z: Option<f64>,
    /// Capacity of the fenced plot
    pub rooms: u32,
    /// Derived free-room counter
    pub rooms_free: u32,
    /// Person responsible for the plot
    pub responsible: Option<PersonId>,
    /// No responsible party known
    pub unowned: bool,
    pub created_at: DateTime<Utc>,
}

impl Place {
    /// Normalize free-form coordinates. Applied on every save.
    pub fn normalize(&mut self) {
        self.area = self.area.trim().to_lowercase();
        self.row = self.row.trim().to_lowercase();
        if let Some(seat) = &self.seat {
            self.seat = Some(seat.trim().to_lowercase());
        }
    }

    /// Rooms currently occupied (derived)
    pub fn rooms_occupied(&self) -> u32 {
        self.rooms.saturating_sub(self.rooms_free)
    }

    /// Natural sort key over (area, row, seat), computed on read
    pub fn sort_key(&self) -> (NaturalKey, NaturalKey, NaturalKey) {
        (
            NaturalKey::of(&self.area),
            NaturalKey::of(&self.row),
            NaturalKey::of(self.seat.as_deref().unwrap_or("")),
        )
    }

    /// Coordinate tuple used for place dedup lookups
    pub fn coordinates(&self) -> PlaceCoordinates {
        PlaceCoordinates {
            cemetery_id: self.cemetery_id,
            area: self.area.clone(),
            row: self.row.clone(),
            seat: self.seat.clone(),
        }
    }
}

/// Identifying coordinates of a place within a cemetery
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceCoordinates {
    pub cemetery_id: CemeteryId,
    pub area: String,
    pub row: String,
    pub seat: Option<String>,
}

/// Create place payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDraft {
    pub cemetery_id: CemeteryId,
    pub area: String,
    pub row: String,
    pub seat: Option<String>,
    #[serde(default)]
    pub gps_x: Option<f64>,
    #[serde(default)]
    pub gps_y: Option<f64>,
    #[serde(default)]
    pub gps_z: Option<f64>,
    /// Capacity; defaults to a single room
    #[serde(default = "default_rooms")]
    pub rooms: u32,
}

fn default_rooms() -> u32 {
    1
}
