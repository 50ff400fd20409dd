//! In-memory registry store
//!
//! UUID-keyed maps for every entity plus the lookups the rule-sets
//! need. The store is request-scoped and single-threaded by contract;
//! it carries no locking of its own. The whole store serializes to a
//! JSON snapshot, which is what the CLI binary persists between runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    Burial, Cemetery, Organization, Person, PersonKey, Place, PlaceCoordinates,
};
use shared::types::{BurialId, CemeteryId, OrganizationId, PersonId, PlaceId};
use std::collections::HashMap;

use crate::numbering::NUMBER_LEN;

/// All registry records, keyed by UUID
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegistryStore {
    cemeteries: HashMap<CemeteryId, Cemetery>,
    places: HashMap<PlaceId, Place>,
    persons: HashMap<PersonId, Person>,
    organizations: HashMap<OrganizationId, Organization>,
    burials: HashMap<BurialId, Burial>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Cemeteries ====================

    pub fn insert_cemetery(&mut self, cemetery: Cemetery) {
        self.cemeteries.insert(cemetery.id, cemetery);
    }

    pub fn cemetery(&self, id: CemeteryId) -> Option<&Cemetery> {
        self.cemeteries.get(&id)
    }

    pub fn cemeteries(&self) -> impl Iterator<Item = &Cemetery> {
        self.cemeteries.values()
    }

    // ==================== Places ====================

    pub fn insert_place(&mut self, place: Place) {
        self.places.insert(place.id, place);
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    pub fn place_mut(&mut self, id: PlaceId) -> Option<&mut Place> {
        self.places.get_mut(&id)
    }

    /// Place with the given coordinates, for save-time dedup
    pub fn find_place(&self, coordinates: &PlaceCoordinates) -> Option<&Place> {
        self.places
            .values()
            .find(|p| &p.coordinates() == coordinates)
    }

    /// Places of a cemetery in natural sort order (area, row, seat)
    pub fn places_sorted(&self, cemetery_id: CemeteryId) -> Vec<&Place> {
        let mut places: Vec<&Place> = self
            .places
            .values()
            .filter(|p| p.cemetery_id == cemetery_id)
            .collect();
        places.sort_by_key(|p| p.sort_key());
        places
    }

    /// Highest registry-format seat number with the given year prefix
    /// within a cemetery
    pub fn max_seat_number(&self, cemetery_id: CemeteryId, year: i32) -> Option<String> {
        let prefix = format!("{year:04}");
        self.places
            .values()
            .filter(|p| p.cemetery_id == cemetery_id)
            .filter_map(|p| p.seat.as_deref())
            .filter(|s| {
                s.len() == NUMBER_LEN
                    && s.bytes().all(|b| b.is_ascii_digit())
                    && s.starts_with(&prefix)
            })
            .max()
            .map(str::to_string)
    }

    // ==================== Persons ====================

    pub fn insert_person(&mut self, person: Person) {
        self.persons.insert(person.id, person);
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.get_mut(&id)
    }

    /// Candidate persons whose names start with the given fragments,
    /// case-insensitive. Used for "select existing person" lookups.
    pub fn match_persons(&self, last: &str, first: &str, middle: &str) -> Vec<&Person> {
        let (last, first, middle) = (
            last.to_lowercase(),
            first.to_lowercase(),
            middle.to_lowercase(),
        );
        self.persons
            .values()
            .filter(|p| {
                p.last_name.to_lowercase().starts_with(&last)
                    && p.first_name.to_lowercase().starts_with(&first)
                    && p.middle_name.to_lowercase().starts_with(&middle)
            })
            .collect()
    }

    // ==================== Organizations ====================

    pub fn insert_organization(&mut self, organization: Organization) {
        self.organizations.insert(organization.id, organization);
    }

    pub fn organization(&self, id: OrganizationId) -> Option<&Organization> {
        self.organizations.get(&id)
    }

    pub fn organization_mut(&mut self, id: OrganizationId) -> Option<&mut Organization> {
        self.organizations.get_mut(&id)
    }

    /// Organizations carrying the given INN, excluding one record
    /// (the one being edited)
    pub fn organizations_with_inn(
        &self,
        inn: &str,
        exclude: Option<OrganizationId>,
    ) -> Vec<&Organization> {
        self.organizations
            .values()
            .filter(|o| !o.inn.is_empty() && o.inn == inn && Some(o.id) != exclude)
            .collect()
    }

    // ==================== Burials ====================

    pub fn insert_burial(&mut self, burial: Burial) {
        self.burials.insert(burial.id, burial);
    }

    pub fn burial(&self, id: BurialId) -> Option<&Burial> {
        self.burials.get(&id)
    }

    pub fn burial_mut(&mut self, id: BurialId) -> Option<&mut Burial> {
        self.burials.get_mut(&id)
    }

    pub fn burials(&self) -> impl Iterator<Item = &Burial> {
        self.burials.values()
    }

    /// Non-trashed burials at a place
    pub fn burials_at_place(&self, place_id: PlaceId) -> impl Iterator<Item = &Burial> {
        self.burials
            .values()
            .filter(move |b| b.place_id == place_id && !b.is_trash)
    }

    /// Burials currently consuming a room at the place
    pub fn occupied_count(&self, place_id: PlaceId) -> u32 {
        self.burials_at_place(place_id)
            .filter(|b| b.occupies_room())
            .count() as u32
    }

    /// Non-trashed burials anywhere within a cemetery
    pub fn burials_in_cemetery(&self, cemetery_id: CemeteryId) -> Vec<&Burial> {
        self.burials
            .values()
            .filter(|b| !b.is_trash)
            .filter(|b| {
                self.place(b.place_id)
                    .is_some_and(|p| p.cemetery_id == cemetery_id)
            })
            .collect()
    }

    /// Whether an account number is already used within a cemetery,
    /// excluding the record being edited. Trashed burials still hold
    /// their numbers.
    pub fn account_number_taken(
        &self,
        cemetery_id: CemeteryId,
        number: &str,
        exclude: Option<BurialId>,
    ) -> bool {
        self.burials.values().any(|b| {
            b.account_number == number
                && Some(b.id) != exclude
                && self
                    .place(b.place_id)
                    .is_some_and(|p| p.cemetery_id == cemetery_id)
        })
    }

    /// Highest registry-format account number with the given year
    /// prefix within a cemetery
    pub fn max_account_number(&self, cemetery_id: CemeteryId, year: i32) -> Option<String> {
        let prefix = format!("{year:04}");
        self.burials_in_cemetery(cemetery_id)
            .into_iter()
            .map(|b| b.account_number.as_str())
            .filter(|n| {
                n.len() == NUMBER_LEN
                    && n.bytes().all(|b| b.is_ascii_digit())
                    && n.starts_with(&prefix)
            })
            .max()
            .map(str::to_string)
    }

    /// Burials within a cemetery whose person matches the duplicate
    /// key, excluding the record being edited
    pub fn find_duplicates(
        &self,
        cemetery_id: CemeteryId,
        key: &PersonKey,
        exclude: Option<BurialId>,
    ) -> Vec<BurialId> {
        self.burials_in_cemetery(cemetery_id)
            .into_iter()
            .filter(|b| Some(b.id) != exclude)
            .filter(|b| {
                self.person(b.person_id)
                    .is_some_and(|p| &p.duplicate_key() == key)
            })
            .map(|b| b.id)
            .collect()
    }

    /// Earliest date of a room-occupying burial at the place
    pub fn earliest_full_burial(&self, place_id: PlaceId) -> Option<NaiveDate> {
        self.burials_at_place(place_id)
            .filter(|b| b.operation.occupies_room())
            .map(|b| b.date_fact)
            .min()
    }

    /// Burials blocking the given grave slot, excluding one record
    pub fn slot_occupants(
        &self,
        place_id: PlaceId,
        grave_id: u32,
        exclude: Option<BurialId>,
    ) -> Vec<&Burial> {
        self.burials_at_place(place_id)
            .filter(|b| Some(b.id) != exclude)
            .filter(|b| b.blocks_slot() && b.grave_id == Some(grave_id))
            .collect()
    }
}
