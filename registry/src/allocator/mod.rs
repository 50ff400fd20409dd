//! Place Allocator
//!
//! Room capacity and occupancy accounting for places, plus the
//! grave-slot sharing rules. The allocator owns the invariant
//! `rooms_free = max(0, rooms - occupied_count)` and publishes
//! [`DomainEvent::RoomsRecounted`] whenever the counter moves.

use chrono::NaiveDate;
use shared::error::{ErrorCode, ValidationError, ValidationResult};
use shared::models::{Burial, DomainEvent, Operation, Place};
use shared::types::{BurialId, PlaceId};

use crate::core::{Policy, RegistryError, RegistryResult};
use crate::store::RegistryStore;

/// Recompute `rooms_free` for a place. Invoked whenever a burial is
/// saved. Returns the recount event when the counter changed.
pub fn recount(store: &mut RegistryStore, place_id: PlaceId) -> RegistryResult<Option<DomainEvent>> {
    let occupied = store.occupied_count(place_id);
    let place = store
        .place_mut(place_id)
        .ok_or(RegistryError::PlaceNotFound(place_id))?;
    let rooms_free = place.rooms.saturating_sub(occupied);
    if rooms_free == place.rooms_free {
        return Ok(None);
    }
    tracing::debug!(
        place_id = %place_id,
        rooms = place.rooms,
        occupied,
        rooms_free,
        "rooms_free recounted"
    );
    place.rooms_free = rooms_free;
    Ok(Some(DomainEvent::RoomsRecounted {
        place_id,
        rooms_free,
    }))
}

/// Capacity check for a submission.
///
/// A place with a seat assigned and no free rooms rejects any
/// room-occupying operation. Edits that keep the global configuration
/// (same place, same operation) are exempt, as are edits of a record
/// that already occupied a room — saving an existing occupant must not
/// re-trigger the check.
pub fn check_capacity(
    place: &Place,
    operation: Operation,
    previous: Option<&Burial>,
) -> ValidationResult {
    if !operation.occupies_room() {
        return Ok(());
    }
    let was_empty = previous.map(|b| !b.operation.occupies_room()).unwrap_or(true);
    let global_change = previous
        .map(|b| b.operation != operation || b.place_id != place.id)
        .unwrap_or(true);
    if was_empty && global_change && place.seat.is_some() && place.rooms_free == 0 {
        return Err(ValidationError::new(ErrorCode::NoFreeRooms).with_message(format!(
            "no free graves at {}, {}, {}",
            place.area,
            place.row,
            place.seat.as_deref().unwrap_or("-")
        )));
    }
    Ok(())
}

/// Whether a burial with `operation` may take grave slot `grave_id`.
///
/// A slot is free when no room-occupying, non-exhumated burial sits in
/// it. An occupied slot still accepts an urn placement, or an
/// additional burial once every occupant is older than the grave reuse
/// window. Passing the burial's own id keeps re-assignment idempotent.
pub fn check_slot(
    store: &RegistryStore,
    place: &Place,
    burial_id: Option<BurialId>,
    grave_id: u32,
    operation: Operation,
    policy: &Policy,
    today: NaiveDate,
) -> ValidationResult {
    if grave_id >= place.rooms {
        return Err(
            ValidationError::new(ErrorCode::SlotOutOfRange).with_message(format!(
                "grave {} is outside the place capacity of {}",
                grave_id, place.rooms
            )),
        );
    }
    let occupants: Vec<&Burial> = store
        .slot_occupants(place.id, grave_id, burial_id)
        .into_iter()
        .filter(|b| b.operation.occupies_room())
        .collect();
    if occupants.is_empty() || operation.is_urn() {
        return Ok(());
    }
    if operation.is_additional() {
        let limit = today - Policy::window_days(policy.grave_reuse_window_years);
        if occupants.iter().all(|b| b.date_fact < limit) {
            return Ok(());
        }
    }
    Err(
        ValidationError::new(ErrorCode::SlotOccupied).with_message(format!(
            "grave {grave_id}: attempt to bury a non-urn into an occupied grave"
        )),
    )
}

/// Per-slot availability of a place for the given operation
pub fn available_slots(
    store: &RegistryStore,
    place: &Place,
    operation: Operation,
    policy: &Policy,
    today: NaiveDate,
) -> Vec<bool> {
    (0..place.rooms)
        .map(|i| check_slot(store, place, None, i, operation, policy, today).is_ok())
        .collect()
}
