//! Burial Validator
//!
//! The full rule chain applied atomically against a burial submission.
//! The first failure rejects the submission; nothing is persisted on
//! rejection. Returns the account number to record, validating the
//! submitted one or generating the next in sequence.

pub mod documents;
pub mod person;

use chrono::{Datelike, NaiveDate};
use shared::error::{ErrorCode, ValidationError};
use shared::models::{BurialSubmission, Customer, Operation, Person, Place};
use shared::types::CemeteryId;

use crate::core::{Policy, RegistryError, RegistryResult};
use crate::store::RegistryStore;
use crate::{allocator, numbering};

/// Validate a burial submission against the current store state.
///
/// `deceased` is the resolved person record (existing, or a draft
/// already validated and materialized but not yet inserted). Grave
/// slot assignment is a separate operation and is checked there.
pub fn validate_burial(
    store: &RegistryStore,
    policy: &Policy,
    submission: &BurialSubmission,
    deceased: &Person,
    place: &Place,
    cemetery_id: CemeteryId,
    today: NaiveDate,
) -> RegistryResult<String> {
    let date_fact = submission.date_fact;

    if let Some(exhumated) = submission.exhumated_date {
        if exhumated <= date_fact {
            return Err(ValidationError::on_field(
                ErrorCode::ExhumationBeforeBurial,
                "exhumated_date",
            )
            .into());
        }
    }

    let account_number = resolve_account_number(store, submission, cemetery_id, today)?;
    check_seat_rules(place, submission.operation, &account_number)?;

    let previous = submission.id.and_then(|id| store.burial(id));
    allocator::check_capacity(place, submission.operation, previous)?;

    if submission.operation.occupies_room() {
        // A full burial goes into an empty place; reuse of an occupied
        // one is a sub-burial or urn placement
        if place.seat.is_some()
            && store
                .burials_at_place(place.id)
                .filter(|b| Some(b.id) != submission.id)
                .any(|b| b.occupies_room())
        {
            return Err(ValidationError::new(ErrorCode::PlaceNotEmpty).into());
        }
    } else {
        let preceding = store.earliest_full_burial(place.id);
        match preceding {
            Some(earliest) if earliest <= date_fact => {}
            _ => {
                return Err(ValidationError::on_field(
                    ErrorCode::NoPrecedingBurial,
                    "operation",
                )
                .into());
            }
        }
    }

    if let Some(Customer::Person(person_id)) = submission.customer {
        let customer = store
            .person(person_id)
            .ok_or(RegistryError::PersonNotFound(person_id))?;
        documents::check_customer_document_age(customer, date_fact, policy)?;
    }
    if let Some(auth) = &submission.agent {
        documents::check_doverennost(&auth.doverennost, date_fact, today)?;
    }

    let duplicates = store.find_duplicates(cemetery_id, &deceased.duplicate_key(), submission.id);
    if !duplicates.is_empty() && !submission.allow_duplicates {
        return Err(RegistryError::Duplicates(duplicates));
    }

    Ok(account_number)
}

/// Validate the submitted account number or generate the next one in
/// the per-cemetery per-year sequence.
fn resolve_account_number(
    store: &RegistryStore,
    submission: &BurialSubmission,
    cemetery_id: CemeteryId,
    today: NaiveDate,
) -> RegistryResult<String> {
    let year = submission.date_fact.year();
    let submitted = submission
        .account_number
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    match submitted {
        Some(number) => {
            numbering::validate_account_number(number, today)?;
            if numbering::number_year(number) != Some(year) {
                return Err(ValidationError::on_field(
                    ErrorCode::AccountNumberYearMismatch,
                    "account_number",
                )
                .into());
            }
            if store.account_number_taken(cemetery_id, number, submission.id) {
                return Err(ValidationError::on_field(
                    ErrorCode::AccountNumberTaken,
                    "account_number",
                )
                .into());
            }
            Ok(number.to_string())
        }
        None => {
            let max = store.max_account_number(cemetery_id, year);
            let number = numbering::next_number(max.as_deref(), year).ok_or_else(|| {
                ValidationError::new(ErrorCode::InternalError)
                    .with_message(format!("account number sequence for {year} is exhausted"))
            })?;
            // A generated number must satisfy the same format rules as
            // a submitted one
            numbering::validate_account_number(&number, today)?;
            Ok(number)
        }
    }
}

/// Seat-dependent account number rules.
///
/// A full burial must carry the place's seat number as its account
/// number; any other operation may not go below the seat number. A
/// non-occupying operation requires the place to carry a seat at all.
fn check_seat_rules(
    place: &Place,
    operation: Operation,
    account_number: &str,
) -> RegistryResult<()> {
    match &place.seat {
        Some(seat) => {
            if operation == Operation::Burial && account_number != seat {
                return Err(ValidationError::on_field(
                    ErrorCode::AccountNumberSeatMismatch,
                    "account_number",
                )
                .into());
            }
            if numbering::number_year(seat).is_some()
                && numbering::number_year(account_number).is_some()
                && account_number < seat.as_str()
            {
                return Err(ValidationError::on_field(
                    ErrorCode::AccountNumberBelowSeat,
                    "account_number",
                )
                .into());
            }
        }
        None => {
            if !operation.occupies_room() {
                return Err(ValidationError::on_field(ErrorCode::SeatRequired, "place").into());
            }
        }
    }
    Ok(())
}
