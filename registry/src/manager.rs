//! Registry Manager
//!
//! Request-scoped orchestration over the store: validate, persist,
//! recount, publish. Every operation either completes fully or leaves
//! the store untouched; there is no partial commit. Published events
//! accumulate in the journal until the outbox exporter drains them.

use chrono::{NaiveDate, Utc};
use shared::models::{
    Agent, Burial, BurialSubmission, Cemetery, DomainEvent, Doverennost, Operation, Organization,
    OrganizationDraft, Person, PersonDraft, PersonRef, Place, PlaceDraft,
};
use shared::types::{AgentId, BurialId, CemeteryId, OrganizationId, PersonId, PlaceId, new_id};

use crate::core::{Policy, RegistryError, RegistryResult};
use crate::store::RegistryStore;
use crate::validator::{documents, person};
use crate::{allocator, numbering, validator};

/// Orchestrates all registry mutations
pub struct RegistryManager {
    store: RegistryStore,
    policy: Policy,
    journal: Vec<DomainEvent>,
}

impl RegistryManager {
    pub fn new(policy: Policy) -> Self {
        Self::with_store(RegistryStore::new(), policy)
    }

    pub fn with_store(store: RegistryStore, policy: Policy) -> Self {
        Self {
            store,
            policy,
            journal: Vec::new(),
        }
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    pub fn into_store(self) -> RegistryStore {
        self.store
    }

    /// Events published since the last drain
    pub fn events(&self) -> &[DomainEvent] {
        &self.journal
    }

    /// Drain the journal, handing the events to the outbox exporter
    pub fn drain_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.journal)
    }

    fn publish(&mut self, event: DomainEvent) {
        tracing::debug!(?event, "domain event");
        self.journal.push(event);
    }

    // ==================== Burials ====================

    /// Record a burial submission, creating or updating the record.
    ///
    /// The full validator chain runs first; on rejection nothing is
    /// persisted. On acceptance the place counters are recounted and
    /// the post-acceptance effects applied: a submitted responsible
    /// person clears the place's `unowned` flag, and a place without a
    /// seat adopts the burial's account number as its seat.
    pub fn record_burial(
        &mut self,
        submission: BurialSubmission,
        today: NaiveDate,
    ) -> RegistryResult<BurialId> {
        let place = self
            .store
            .place(submission.place_id)
            .cloned()
            .ok_or(RegistryError::PlaceNotFound(submission.place_id))?;
        let cemetery_id = place.cemetery_id;
        // An edit must name an existing record before anything is inserted
        if let Some(id) = submission.id {
            if self.store.burial(id).is_none() {
                return Err(RegistryError::BurialNotFound(id));
            }
        }

        let (deceased, is_new_person) = match &submission.person {
            PersonRef::Existing(id) => (
                self.store
                    .person(*id)
                    .cloned()
                    .ok_or(RegistryError::PersonNotFound(*id))?,
                false,
            ),
            PersonRef::New(draft) => {
                person::validate_person(draft, &self.policy, today)?;
                (materialize_person(draft), true)
            }
        };
        if let Some(responsible) = submission.responsible {
            if self.store.person(responsible).is_none() {
                return Err(RegistryError::PersonNotFound(responsible));
            }
        }

        let account_number = validator::validate_burial(
            &self.store,
            &self.policy,
            &submission,
            &deceased,
            &place,
            cemetery_id,
            today,
        )?;

        if is_new_person {
            self.store.insert_person(deceased.clone());
        }

        let burial_id = match submission.id {
            Some(id) => {
                let burial = self
                    .store
                    .burial_mut(id)
                    .ok_or(RegistryError::BurialNotFound(id))?;
                let old_place_id = burial.place_id;
                burial.place_id = submission.place_id;
                burial.person_id = deceased.id;
                burial.operation = submission.operation;
                burial.account_number = account_number.clone();
                burial.date_fact = submission.date_fact;
                burial.exhumated_date = submission.exhumated_date;
                burial.customer = submission.customer;
                burial.agent = submission.agent.clone();
                self.publish(DomainEvent::BurialUpdated {
                    burial_id: id,
                    cemetery_id,
                });
                if old_place_id != submission.place_id {
                    if let Some(event) = allocator::recount(&mut self.store, old_place_id)? {
                        self.publish(event);
                    }
                }
                id
            }
            None => {
                let id = new_id();
                self.store.insert_burial(Burial {
                    id,
                    place_id: submission.place_id,
                    person_id: deceased.id,
                    operation: submission.operation,
                    account_number: account_number.clone(),
                    date_fact: submission.date_fact,
                    exhumated_date: submission.exhumated_date,
                    customer: submission.customer,
                    agent: submission.agent.clone(),
                    grave_id: None,
                    is_trash: false,
                    created_at: Utc::now(),
                });
                tracing::info!(
                    burial_id = %id,
                    account_number = %account_number,
                    operation = submission.operation.label(),
                    "burial recorded"
                );
                self.publish(DomainEvent::BurialRecorded {
                    burial_id: id,
                    place_id: submission.place_id,
                    cemetery_id,
                    account_number: account_number.clone(),
                });
                id
            }
        };

        let mut place_changed = false;
        if let Some(place) = self.store.place_mut(submission.place_id) {
            if let Some(responsible) = submission.responsible {
                place.responsible = Some(responsible);
                place.unowned = false;
                place_changed = true;
            }
            if place.seat.is_none() {
                place.seat = Some(account_number);
                place.normalize();
                place_changed = true;
            }
        }
        if place_changed {
            self.publish(DomainEvent::PlaceSaved {
                place_id: submission.place_id,
                cemetery_id,
            });
        }
        if let Some(event) = allocator::recount(&mut self.store, submission.place_id)? {
            self.publish(event);
        }
        Ok(burial_id)
    }

    /// Soft-delete a burial. The record keeps its account number.
    pub fn trash_burial(&mut self, burial_id: BurialId) -> RegistryResult<()> {
        let (place_id, cemetery_id) = self.burial_location(burial_id)?;
        if let Some(burial) = self.store.burial_mut(burial_id) {
            burial.is_trash = true;
        }
        self.publish(DomainEvent::BurialTrashed {
            burial_id,
            cemetery_id,
        });
        if let Some(event) = allocator::recount(&mut self.store, place_id)? {
            self.publish(event);
        }
        Ok(())
    }

    /// Restore a soft-deleted burial.
    pub fn restore_burial(&mut self, burial_id: BurialId) -> RegistryResult<()> {
        let (place_id, cemetery_id) = self.burial_location(burial_id)?;
        if let Some(burial) = self.store.burial_mut(burial_id) {
            burial.is_trash = false;
        }
        self.publish(DomainEvent::BurialRestored {
            burial_id,
            cemetery_id,
        });
        if let Some(event) = allocator::recount(&mut self.store, place_id)? {
            self.publish(event);
        }
        Ok(())
    }

    /// Exhumate a burial; the record stops occupying a room.
    pub fn exhumate(
        &mut self,
        burial_id: BurialId,
        exhumated_date: NaiveDate,
    ) -> RegistryResult<()> {
        let (place_id, cemetery_id) = self.burial_location(burial_id)?;
        let burial = self
            .store
            .burial_mut(burial_id)
            .ok_or(RegistryError::BurialNotFound(burial_id))?;
        if exhumated_date <= burial.date_fact {
            return Err(shared::error::ValidationError::on_field(
                shared::error::ErrorCode::ExhumationBeforeBurial,
                "exhumated_date",
            )
            .into());
        }
        burial.exhumated_date = Some(exhumated_date);
        self.publish(DomainEvent::BurialExhumed {
            burial_id,
            cemetery_id,
            exhumated_date,
        });
        if let Some(event) = allocator::recount(&mut self.store, place_id)? {
            self.publish(event);
        }
        Ok(())
    }

    fn burial_location(&self, burial_id: BurialId) -> RegistryResult<(PlaceId, CemeteryId)> {
        let burial = self
            .store
            .burial(burial_id)
            .ok_or(RegistryError::BurialNotFound(burial_id))?;
        let place = self
            .store
            .place(burial.place_id)
            .ok_or(RegistryError::PlaceNotFound(burial.place_id))?;
        Ok((place.id, place.cemetery_id))
    }

    // ==================== Grave slots ====================

    /// Assign a burial to a grave slot of its place. Idempotent:
    /// re-assigning the slot it already holds publishes nothing.
    pub fn assign_grave(
        &mut self,
        burial_id: BurialId,
        grave_id: u32,
        today: NaiveDate,
    ) -> RegistryResult<()> {
        let burial = self
            .store
            .burial(burial_id)
            .ok_or(RegistryError::BurialNotFound(burial_id))?;
        if burial.grave_id == Some(grave_id) {
            return Ok(());
        }
        let place = self
            .store
            .place(burial.place_id)
            .cloned()
            .ok_or(RegistryError::PlaceNotFound(burial.place_id))?;
        allocator::check_slot(
            &self.store,
            &place,
            Some(burial_id),
            grave_id,
            burial.operation,
            &self.policy,
            today,
        )?;
        if let Some(burial) = self.store.burial_mut(burial_id) {
            burial.grave_id = Some(grave_id);
        }
        self.publish(DomainEvent::GraveAssigned {
            burial_id,
            place_id: place.id,
            grave_id,
        });
        Ok(())
    }

    /// Per-slot availability of a place for the given operation
    pub fn available_slots(
        &self,
        place_id: PlaceId,
        operation: Operation,
        today: NaiveDate,
    ) -> RegistryResult<Vec<bool>> {
        let place = self
            .store
            .place(place_id)
            .ok_or(RegistryError::PlaceNotFound(place_id))?;
        Ok(allocator::available_slots(
            &self.store,
            place,
            operation,
            &self.policy,
            today,
        ))
    }

    /// Resize a place. Burials whose slot index falls outside the new
    /// capacity lose their slot assignment.
    pub fn set_rooms(&mut self, place_id: PlaceId, rooms: u32) -> RegistryResult<()> {
        let cemetery_id = self
            .store
            .place(place_id)
            .map(|p| p.cemetery_id)
            .ok_or(RegistryError::PlaceNotFound(place_id))?;
        let evicted: Vec<BurialId> = self
            .store
            .burials_at_place(place_id)
            .filter(|b| b.grave_id.is_some_and(|g| g >= rooms))
            .map(|b| b.id)
            .collect();
        for id in evicted {
            if let Some(burial) = self.store.burial_mut(id) {
                burial.grave_id = None;
            }
        }
        if let Some(place) = self.store.place_mut(place_id) {
            place.rooms = rooms;
        }
        self.publish(DomainEvent::PlaceSaved {
            place_id,
            cemetery_id,
        });
        if let Some(event) = allocator::recount(&mut self.store, place_id)? {
            self.publish(event);
        }
        Ok(())
    }

    // ==================== Places, persons, organizations ====================

    /// Save a place. A place with the same coordinates already on
    /// record is returned instead of creating a twin.
    pub fn save_place(&mut self, draft: PlaceDraft, today: NaiveDate) -> RegistryResult<PlaceId> {
        if self.store.cemetery(draft.cemetery_id).is_none() {
            return Err(RegistryError::CemeteryNotFound(draft.cemetery_id));
        }
        let mut place = Place {
            id: new_id(),
            cemetery_id: draft.cemetery_id,
            area: draft.area,
            row: draft.row,
            seat: draft.seat.filter(|s| !s.trim().is_empty()),
            gps_x: draft.gps_x,
            gps_y: draft.gps_y,
            gps_z: draft.gps_z,
            rooms: draft.rooms,
            rooms_free: draft.rooms,
            responsible: None,
            unowned: false,
            created_at: Utc::now(),
        };
        place.normalize();
        if let Some(seat) = &place.seat {
            numbering::validate_seat_number(seat, today)?;
        }
        if let Some(existing) = self.store.find_place(&place.coordinates()) {
            return Ok(existing.id);
        }
        let place_id = place.id;
        let cemetery_id = place.cemetery_id;
        self.store.insert_place(place);
        self.publish(DomainEvent::PlaceSaved {
            place_id,
            cemetery_id,
        });
        Ok(place_id)
    }

    /// Next registry-assigned seat number for a cemetery
    pub fn generate_seat(&self, cemetery_id: CemeteryId, today: NaiveDate) -> RegistryResult<String> {
        use chrono::Datelike;
        if self.store.cemetery(cemetery_id).is_none() {
            return Err(RegistryError::CemeteryNotFound(cemetery_id));
        }
        let year = today.year();
        let max = self.store.max_seat_number(cemetery_id, year);
        numbering::next_number(max.as_deref(), year).ok_or_else(|| {
            shared::error::ValidationError::new(shared::error::ErrorCode::InternalError)
                .with_message(format!("seat number sequence for {year} is exhausted"))
                .into()
        })
    }

    pub fn save_cemetery(&mut self, cemetery: Cemetery) -> RegistryResult<CemeteryId> {
        let cemetery_id = cemetery.id;
        self.store.insert_cemetery(cemetery);
        self.publish(DomainEvent::CemeterySaved { cemetery_id });
        Ok(cemetery_id)
    }

    pub fn save_person(&mut self, draft: PersonDraft, today: NaiveDate) -> RegistryResult<PersonId> {
        person::validate_person(&draft, &self.policy, today)?;
        let person = materialize_person(&draft);
        let person_id = person.id;
        self.store.insert_person(person);
        Ok(person_id)
    }

    /// Save an organization. A duplicate INN is rejected unless the
    /// override flag is set.
    pub fn save_organization(
        &mut self,
        draft: OrganizationDraft,
        existing: Option<OrganizationId>,
    ) -> RegistryResult<OrganizationId> {
        for account in &draft.bank_accounts {
            documents::check_bank_account(account)?;
        }
        if !draft.inn.is_empty()
            && !draft.allow_duplicate_inn
            && !self.store.organizations_with_inn(&draft.inn, existing).is_empty()
        {
            return Err(shared::error::ValidationError::on_field(
                shared::error::ErrorCode::DuplicateInn,
                "inn",
            )
            .into());
        }
        match existing {
            Some(id) => {
                let org = self
                    .store
                    .organization_mut(id)
                    .ok_or(RegistryError::OrganizationNotFound(id))?;
                // agents are managed separately via save_doverennost
                org.name = draft.name;
                org.full_name = draft.full_name;
                org.inn = draft.inn;
                org.ogrn = draft.ogrn;
                org.kpp = draft.kpp;
                org.ceo = draft.ceo;
                org.phone = draft.phone;
                org.bank_accounts = draft.bank_accounts;
                Ok(id)
            }
            None => {
                let id = new_id();
                self.store.insert_organization(Organization {
                    id,
                    name: draft.name,
                    full_name: draft.full_name,
                    inn: draft.inn,
                    ogrn: draft.ogrn,
                    kpp: draft.kpp,
                    ceo: draft.ceo,
                    phone: draft.phone,
                    bank_accounts: draft.bank_accounts,
                    agents: Vec::new(),
                });
                Ok(id)
            }
        }
    }

    /// Attach a doverennost to an organization agent, appointing the
    /// agent if the person does not act for the organization yet.
    pub fn save_doverennost(
        &mut self,
        organization_id: OrganizationId,
        person_id: PersonId,
        doverennost: Doverennost,
        today: NaiveDate,
    ) -> RegistryResult<AgentId> {
        documents::check_doverennost_dates(&doverennost, today)?;
        if self.store.person(person_id).is_none() {
            return Err(RegistryError::PersonNotFound(person_id));
        }
        let org = self
            .store
            .organization_mut(organization_id)
            .ok_or(RegistryError::OrganizationNotFound(organization_id))?;
        match org.agents.iter_mut().find(|a| a.person_id == person_id) {
            Some(agent) => {
                agent.doverennosti.push(doverennost);
                Ok(agent.id)
            }
            None => {
                let agent_id = new_id();
                org.agents.push(Agent {
                    id: agent_id,
                    person_id,
                    organization_id,
                    doverennosti: vec![doverennost],
                });
                Ok(agent_id)
            }
        }
    }
}

fn materialize_person(draft: &PersonDraft) -> Person {
    Person {
        id: new_id(),
        last_name: draft.last_name.trim().to_string(),
        first_name: draft.first_name.trim().to_string(),
        middle_name: draft.middle_name.trim().to_string(),
        birth_date: draft.birth_date,
        death_date: draft.death_date,
        address: draft.address.clone(),
        identity_document: draft.identity_document.clone(),
        death_certificate: draft.death_certificate.clone(),
        created_at: Utc::now(),
    }
}
