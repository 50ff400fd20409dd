//! End-to-end burial flow through the public manager API

use cemetery_registry::{Policy, RegistryError, RegistryManager, outbox};
use chrono::NaiveDate;
use shared::error::ErrorCode;
use shared::models::{
    BurialSubmission, Cemetery, Operation, PersonDraft, PersonRef, PlaceDraft,
};
use shared::types::{CemeteryId, PlaceId, new_id};

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn today() -> NaiveDate {
    d(2026, 8, 29)
}

fn new_registry() -> (RegistryManager, CemeteryId) {
    let mut manager = RegistryManager::new(Policy::default());
    let cemetery_id = manager
        .save_cemetery(Cemetery {
            id: new_id(),
            name: "Северное".to_string(),
            organization_id: None,
            address: None,
            phone: None,
            created_at: chrono::Utc::now(),
        })
        .unwrap();
    (manager, cemetery_id)
}

fn new_place(manager: &mut RegistryManager, cemetery_id: CemeteryId, row: &str, rooms: u32) -> PlaceId {
    manager
        .save_place(
            PlaceDraft {
                cemetery_id,
                area: "1".to_string(),
                row: row.to_string(),
                seat: None,
                gps_x: None,
                gps_y: None,
                gps_z: None,
                rooms,
            },
            today(),
        )
        .unwrap()
}

fn submission(place_id: PlaceId, last_name: &str, date_fact: NaiveDate) -> BurialSubmission {
    BurialSubmission {
        id: None,
        place_id,
        person: PersonRef::New(PersonDraft::named(last_name, "Пётр", "Сергеевич")),
        operation: Operation::Burial,
        account_number: None,
        date_fact,
        exhumated_date: None,
        customer: None,
        agent: None,
        responsible: None,
        allow_duplicates: false,
    }
}

#[test]
fn rooms_free_stays_within_bounds_through_lifecycle() {
    let (mut manager, cemetery_id) = new_registry();
    let place_id = new_place(&mut manager, cemetery_id, "1", 2);

    let check = |manager: &RegistryManager| {
        let place = manager.store().place(place_id).unwrap();
        assert!(place.rooms_free <= place.rooms);
    };

    let first = manager
        .record_burial(submission(place_id, "Иванов", d(2026, 3, 1)), today())
        .unwrap();
    check(&manager);

    manager.trash_burial(first).unwrap();
    check(&manager);
    assert_eq!(manager.store().place(place_id).unwrap().rooms_free, 2);

    manager.restore_burial(first).unwrap();
    manager.exhumate(first, d(2026, 4, 1)).unwrap();
    check(&manager);
    assert_eq!(manager.store().place(place_id).unwrap().rooms_free, 2);
}

#[test]
fn account_number_year_must_match_burial_date() {
    let (mut manager, cemetery_id) = new_registry();
    let place_id = new_place(&mut manager, cemetery_id, "1", 1);

    let mut sub = submission(place_id, "Иванов", d(2026, 3, 1));
    sub.account_number = Some("20250001".to_string());
    let err = manager.record_burial(sub, today()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Validation(e) if e.code == ErrorCode::AccountNumberYearMismatch
    ));
}

#[test]
fn generated_numbers_increase_per_cemetery_per_year() {
    let (mut manager, cemetery_id) = new_registry();

    let mut numbers = Vec::new();
    for i in 0..3 {
        let place_id = new_place(&mut manager, cemetery_id, &format!("{i}"), 1);
        let id = manager
            .record_burial(submission(place_id, &format!("Иванов{i}"), d(2026, 3, 1)), today())
            .unwrap();
        numbers.push(manager.store().burial(id).unwrap().account_number.clone());
    }
    assert_eq!(numbers, ["20260001", "20260002", "20260003"]);
}

#[test]
fn duplicate_person_requires_override() {
    let (mut manager, cemetery_id) = new_registry();
    let place_a = new_place(&mut manager, cemetery_id, "1", 1);
    let place_b = new_place(&mut manager, cemetery_id, "2", 1);

    manager
        .record_burial(submission(place_a, "Иванов", d(2026, 3, 1)), today())
        .unwrap();

    let twin = submission(place_b, "Иванов", d(2026, 3, 1));
    let err = manager.record_burial(twin.clone(), today()).unwrap_err();
    assert!(matches!(err, RegistryError::Duplicates(ref ids) if ids.len() == 1));

    let mut confirmed = twin;
    confirmed.allow_duplicates = true;
    manager.record_burial(confirmed, today()).unwrap();
    assert_eq!(manager.store().burials().count(), 2);
}

#[test]
fn edit_of_missing_burial_leaves_store_untouched() {
    let (mut manager, cemetery_id) = new_registry();
    let place_id = new_place(&mut manager, cemetery_id, "1", 1);

    let mut sub = submission(place_id, "Призраков", d(2026, 3, 1));
    sub.id = Some(new_id());
    let err = manager.record_burial(sub, today()).unwrap_err();
    assert!(matches!(err, RegistryError::BurialNotFound(_)));

    assert_eq!(manager.store().burials().count(), 0);
    assert!(manager.store().match_persons("Призраков", "", "").is_empty());
}

#[test]
fn exhumation_on_or_before_burial_date_fails() {
    let (mut manager, cemetery_id) = new_registry();
    let place_id = new_place(&mut manager, cemetery_id, "1", 1);

    let mut sub = submission(place_id, "Иванов", d(2026, 3, 1));
    sub.exhumated_date = Some(d(2026, 3, 1));
    assert!(manager.record_burial(sub, today()).is_err());

    let id = manager
        .record_burial(submission(place_id, "Иванов", d(2026, 3, 1)), today())
        .unwrap();
    assert!(manager.exhumate(id, d(2026, 3, 1)).is_err());
    assert!(manager.exhumate(id, d(2026, 3, 2)).is_ok());
}

#[test]
fn urn_shares_slot_full_burial_does_not() {
    let (mut manager, cemetery_id) = new_registry();
    let place_id = new_place(&mut manager, cemetery_id, "1", 2);

    let occupant = manager
        .record_burial(submission(place_id, "Иванов", d(2026, 3, 1)), today())
        .unwrap();
    manager.assign_grave(occupant, 0, today()).unwrap();

    let mut urn = submission(place_id, "Петров", d(2026, 4, 1));
    urn.operation = Operation::UrnPlacement;
    let urn_id = manager.record_burial(urn, today()).unwrap();
    assert!(manager.assign_grave(urn_id, 0, today()).is_ok());

    let slots = manager
        .available_slots(place_id, Operation::Burial, today())
        .unwrap();
    assert_eq!(slots, vec![false, true]);
}

#[test]
fn outbox_round_trip_between_registries() {
    let (mut source, cemetery_id) = new_registry();
    let place_id = new_place(&mut source, cemetery_id, "1", 1);
    source
        .record_burial(submission(place_id, "Иванов", d(2026, 3, 1)), today())
        .unwrap();

    let events = source.drain_events();
    let batch = outbox::collect(source.store(), &events);
    assert_eq!(batch.burials.len(), 1);

    let mut target = RegistryManager::new(Policy::default());
    let summary = outbox::import(&mut target, &batch, today()).unwrap();
    assert_eq!(summary.burials, 1);
    assert_eq!(summary.skipped, 0);

    let imported = target.store().burials().next().unwrap();
    assert_eq!(imported.account_number, "20260001");
    let person = target.store().person(imported.person_id).unwrap();
    assert_eq!(person.last_name, "Иванов");
}
