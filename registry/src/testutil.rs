//! Seed helpers shared by unit tests

use chrono::{NaiveDate, Utc};
use shared::models::{Burial, Cemetery, Operation, Person, Place};
use shared::types::{BurialId, CemeteryId, PersonId, PlaceId, new_id};

use crate::store::RegistryStore;

pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn seed_cemetery(store: &mut RegistryStore, name: &str) -> CemeteryId {
    let id = new_id();
    store.insert_cemetery(Cemetery {
        id,
        name: name.to_string(),
        organization_id: None,
        address: None,
        phone: None,
        created_at: Utc::now(),
    });
    id
}

pub fn seed_place(
    store: &mut RegistryStore,
    cemetery_id: CemeteryId,
    area: &str,
    row: &str,
    seat: Option<&str>,
    rooms: u32,
) -> PlaceId {
    let id = new_id();
    store.insert_place(Place {
        id,
        cemetery_id,
        area: area.to_string(),
        row: row.to_string(),
        seat: seat.map(str::to_string),
        gps_x: None,
        gps_y: None,
        gps_z: None,
        rooms,
        rooms_free: rooms,
        responsible: None,
        unowned: false,
        created_at: Utc::now(),
    });
    id
}

pub fn seed_person(store: &mut RegistryStore, last: &str, first: &str, middle: &str) -> PersonId {
    let id = new_id();
    store.insert_person(Person {
        id,
        last_name: last.to_string(),
        first_name: first.to_string(),
        middle_name: middle.to_string(),
        birth_date: None,
        death_date: None,
        address: None,
        identity_document: None,
        death_certificate: None,
        created_at: Utc::now(),
    });
    id
}

/// Seed a burial with its own deceased person; the person's last name
/// embeds the account number so seeded records never collide as
/// duplicates by accident.
pub fn seed_burial(
    store: &mut RegistryStore,
    place_id: PlaceId,
    operation: Operation,
    account_number: &str,
    date_fact: NaiveDate,
) -> BurialId {
    let person_id = seed_person(store, &format!("Усопший-{account_number}"), "", "");
    let id = new_id();
    store.insert_burial(Burial {
        id,
        place_id,
        person_id,
        operation,
        account_number: account_number.to_string(),
        date_fact,
        exhumated_date: None,
        customer: None,
        agent: None,
        grave_id: None,
        is_trash: false,
        created_at: Utc::now(),
    });
    id
}
