//! Outbox import/export
//!
//! Flat JSON exchange format for syncing registries. An export batch
//! carries the cemeteries and burials touched since the last drain of
//! the event journal, written to
//! `<outbox_dir>/<YYYYMMDD>.<host>.<server-uuid>.json`. Import reads
//! the same format and upserts, generating account numbers for records
//! that arrive without one.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{
    Burial, BurialSubmission, Cemetery, CemeteryAddress, DomainEvent, Operation, PersonDraft,
    PersonRef, PlaceDraft,
};
use shared::types::{BurialId, CemeteryId, new_id};

use crate::core::{Config, RegistryError, RegistryResult};
use crate::manager::RegistryManager;
use crate::store::RegistryStore;

/// Flat cemetery record in the exchange format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CemeteryRecord {
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub post_index: String,
    #[serde(default)]
    pub house: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Flat burial record in the exchange format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurialRecord {
    /// Name of the cemetery the burial belongs to
    pub cemetery: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    pub date_fact: NaiveDate,
    /// Missing means "generate on import"
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub row: String,
    #[serde(default)]
    pub seat: Option<String>,
    #[serde(default)]
    pub gps_x: Option<f64>,
    #[serde(default)]
    pub gps_y: Option<f64>,
    #[serde(default)]
    pub gps_z: Option<f64>,
}

/// One outbox file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutboxBatch {
    #[serde(default)]
    pub cemeteries: Vec<CemeteryRecord>,
    #[serde(default)]
    pub burials: Vec<BurialRecord>,
}

impl OutboxBatch {
    pub fn is_empty(&self) -> bool {
        self.cemeteries.is_empty() && self.burials.is_empty()
    }
}

/// Counters reported after an import run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub cemeteries: usize,
    pub burials: usize,
    pub skipped: usize,
}

/// Outbox file name for an export run
pub fn file_name(config: &Config, date: NaiveDate) -> String {
    format!(
        "{}.{}.{}.json",
        date.format("%Y%m%d"),
        config.host,
        config.server_uuid
    )
}

/// Batch of everything the store holds
pub fn collect_all(store: &RegistryStore) -> OutboxBatch {
    let cemeteries: Vec<CemeteryId> = store.cemeteries().map(|c| c.id).collect();
    let burials = store.burials().filter(|b| !b.is_trash).map(|b| b.id).collect();
    collect_ids(store, &cemeteries, &burials)
}

/// Batch of the records touched by the given events. Cemetery-level
/// events re-export the cemetery row; burial-level events re-export
/// the individual burial.
pub fn collect(store: &RegistryStore, events: &[DomainEvent]) -> OutboxBatch {
    let mut cemeteries: Vec<CemeteryId> = Vec::new();
    let mut seen = HashSet::new();
    let mut burials = HashSet::new();
    for event in events {
        if let Some(id) = event.cemetery_id() {
            if seen.insert(id) {
                cemeteries.push(id);
            }
        }
        if let Some(id) = event.burial_id() {
            burials.insert(id);
        }
    }
    collect_ids(store, &cemeteries, &burials)
}

fn collect_ids(
    store: &RegistryStore,
    cemeteries: &[CemeteryId],
    burials: &HashSet<BurialId>,
) -> OutboxBatch {
    let mut batch = OutboxBatch::default();
    for id in cemeteries {
        if let Some(cemetery) = store.cemetery(*id) {
            batch.cemeteries.push(cemetery_record(cemetery));
        }
    }
    for id in burials {
        let Some(burial) = store.burial(*id) else { continue };
        if burial.is_trash {
            continue;
        }
        match burial_record(store, burial) {
            Some(record) => batch.burials.push(record),
            None => tracing::warn!(burial_id = %id, "dangling burial skipped on export"),
        }
    }
    batch.burials.sort_by(|a, b| a.date_fact.cmp(&b.date_fact));
    batch
}

fn cemetery_record(cemetery: &Cemetery) -> CemeteryRecord {
    let address = cemetery.address.clone().unwrap_or_default();
    CemeteryRecord {
        name: cemetery.name.clone(),
        country: address.country,
        region: address.region,
        city: address.city,
        street: address.street,
        post_index: address.post_index,
        house: address.house,
        block: address.block,
        building: address.building,
        phone: cemetery.phone.clone(),
    }
}

fn burial_record(store: &RegistryStore, burial: &Burial) -> Option<BurialRecord> {
    let place = store.place(burial.place_id)?;
    let cemetery = store.cemetery(place.cemetery_id)?;
    let person = store.person(burial.person_id)?;
    Some(BurialRecord {
        cemetery: cemetery.name.clone(),
        last_name: person.last_name.clone(),
        first_name: person.first_name.clone(),
        middle_name: person.middle_name.clone(),
        birth_date: person.birth_date,
        death_date: person.death_date,
        date_fact: burial.date_fact,
        account_number: Some(burial.account_number.clone()),
        area: place.area.clone(),
        row: place.row.clone(),
        seat: place.seat.clone(),
        gps_x: place.gps_x,
        gps_y: place.gps_y,
        gps_z: place.gps_z,
    })
}

/// Write a batch into the outbox directory. Empty batches produce no
/// file.
pub fn write_batch(
    config: &Config,
    batch: &OutboxBatch,
    date: NaiveDate,
) -> RegistryResult<Option<PathBuf>> {
    if batch.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(&config.outbox_dir)?;
    let path = config.outbox_dir.join(file_name(config, date));
    fs::write(&path, serde_json::to_vec_pretty(batch)?)?;
    tracing::info!(
        path = %path.display(),
        cemeteries = batch.cemeteries.len(),
        burials = batch.burials.len(),
        "outbox batch written"
    );
    Ok(Some(path))
}

/// Read a batch from an outbox file
pub fn read_batch(path: &Path) -> RegistryResult<OutboxBatch> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Upsert a batch into the registry.
///
/// Cemeteries match by name; places match by coordinates via the
/// manager's dedup. Each burial goes through the full validator with
/// the duplicate override set, so re-importing the same file does not
/// fail, and records arriving without an account number get the next
/// one in sequence. Records the validator rejects are skipped and
/// counted.
pub fn import(
    manager: &mut RegistryManager,
    batch: &OutboxBatch,
    today: NaiveDate,
) -> RegistryResult<ImportSummary> {
    let mut summary = ImportSummary::default();
    for record in &batch.cemeteries {
        upsert_cemetery(manager, record)?;
        summary.cemeteries += 1;
    }
    for record in &batch.burials {
        match import_burial(manager, record, today) {
            Ok(()) => summary.burials += 1,
            Err(RegistryError::Io(e)) => return Err(RegistryError::Io(e)),
            Err(e) => {
                tracing::warn!(
                    cemetery = %record.cemetery,
                    date_fact = %record.date_fact,
                    error = %e,
                    "burial record skipped on import"
                );
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

fn upsert_cemetery(manager: &mut RegistryManager, record: &CemeteryRecord) -> RegistryResult<CemeteryId> {
    let address = CemeteryAddress {
        country: record.country.clone(),
        region: record.region.clone(),
        city: record.city.clone(),
        street: record.street.clone(),
        post_index: record.post_index.clone(),
        house: record.house.clone(),
        block: record.block.clone(),
        building: record.building.clone(),
    };
    let existing = manager
        .store()
        .cemeteries()
        .find(|c| c.name == record.name)
        .cloned();
    let cemetery = match existing {
        Some(mut cemetery) => {
            cemetery.address = Some(address);
            cemetery.phone = record.phone.clone();
            cemetery
        }
        None => Cemetery {
            id: new_id(),
            name: record.name.clone(),
            organization_id: None,
            address: Some(address),
            phone: record.phone.clone(),
            created_at: chrono::Utc::now(),
        },
    };
    manager.save_cemetery(cemetery)
}

fn import_burial(
    manager: &mut RegistryManager,
    record: &BurialRecord,
    today: NaiveDate,
) -> RegistryResult<()> {
    let cemetery_id = manager
        .store()
        .cemeteries()
        .find(|c| c.name == record.cemetery)
        .map(|c| c.id)
        .ok_or_else(|| {
            RegistryError::Validation(
                shared::error::ValidationError::new(shared::error::ErrorCode::NotFound)
                    .with_message(format!("unknown cemetery {:?}", record.cemetery)),
            )
        })?;
    let place_id = manager.save_place(
        PlaceDraft {
            cemetery_id,
            area: record.area.clone(),
            row: record.row.clone(),
            seat: record.seat.clone(),
            gps_x: record.gps_x,
            gps_y: record.gps_y,
            gps_z: record.gps_z,
            rooms: 1,
        },
        today,
    )?;
    let person = PersonDraft {
        last_name: record.last_name.clone(),
        first_name: record.first_name.clone(),
        middle_name: record.middle_name.clone(),
        birth_date: record.birth_date,
        death_date: record.death_date,
        skip_last_name: record.last_name.trim().is_empty(),
        ..PersonDraft::default()
    };
    manager.record_burial(
        BurialSubmission {
            id: None,
            place_id,
            person: PersonRef::New(person),
            operation: Operation::Burial,
            account_number: record.account_number.clone(),
            date_fact: record.date_fact,
            exhumated_date: None,
            customer: None,
            agent: None,
            responsible: None,
            allow_duplicates: true,
        },
        today,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Policy;
    use crate::testutil::*;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        d(2026, 8, 29)
    }

    fn config(dir: &Path) -> Config {
        Config {
            outbox_dir: dir.to_path_buf(),
            host: "reg1".to_string(),
            server_uuid: Uuid::nil(),
            policy: Policy::default(),
        }
    }

    fn sample_batch() -> OutboxBatch {
        OutboxBatch {
            cemeteries: vec![CemeteryRecord {
                name: "Северное".to_string(),
                country: "Россия".to_string(),
                region: String::new(),
                city: "Верхние Ключи".to_string(),
                street: String::new(),
                post_index: String::new(),
                house: String::new(),
                block: String::new(),
                building: String::new(),
                phone: None,
            }],
            burials: vec![BurialRecord {
                cemetery: "Северное".to_string(),
                last_name: "Иванов".to_string(),
                first_name: "Пётр".to_string(),
                middle_name: "Сергеевич".to_string(),
                birth_date: Some(d(1950, 1, 1)),
                death_date: Some(d(2026, 4, 20)),
                date_fact: d(2026, 5, 1),
                account_number: None,
                area: "1".to_string(),
                row: "2".to_string(),
                seat: None,
                gps_x: None,
                gps_y: None,
                gps_z: None,
            }],
        }
    }

    #[test]
    fn test_file_name_layout() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        assert_eq!(
            file_name(&config, d(2026, 8, 29)),
            "20260829.reg1.00000000-0000-0000-0000-000000000000.json"
        );
    }

    #[test]
    fn test_import_generates_account_numbers() {
        let mut manager = RegistryManager::new(Policy::default());
        let summary = import(&mut manager, &sample_batch(), today()).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                cemeteries: 1,
                burials: 1,
                skipped: 0
            }
        );
        let burial = manager.store().burials().next().unwrap();
        assert_eq!(burial.account_number, "20260001");
    }

    #[test]
    fn test_unknown_cemetery_skips_record() {
        let mut manager = RegistryManager::new(Policy::default());
        let mut batch = sample_batch();
        batch.burials[0].cemetery = "Южное".to_string();
        let summary = import(&mut manager, &batch, today()).unwrap();
        assert_eq!(summary.burials, 0);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let batch = sample_batch();

        let path = write_batch(&config, &batch, today()).unwrap().unwrap();
        let loaded = read_batch(&path).unwrap();
        assert_eq!(loaded.cemeteries.len(), 1);
        assert_eq!(loaded.burials.len(), 1);
        assert_eq!(loaded.burials[0].last_name, "Иванов");
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        assert!(write_batch(&config, &OutboxBatch::default(), today())
            .unwrap()
            .is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_collect_dirty_set_from_journal() {
        let mut store = RegistryStore::new();
        let cemetery_id = seed_cemetery(&mut store, "Северное");
        let place_id = seed_place(&mut store, cemetery_id, "1", "1", None, 1);
        let touched =
            seed_burial(&mut store, place_id, Operation::Burial, "20260001", d(2026, 5, 1));
        seed_burial(&mut store, place_id, Operation::Burial, "20260002", d(2026, 6, 1));

        let events = vec![DomainEvent::BurialUpdated {
            burial_id: touched,
            cemetery_id,
        }];
        let batch = collect(&store, &events);
        assert_eq!(batch.cemeteries.len(), 1);
        assert_eq!(batch.burials.len(), 1);
        assert_eq!(batch.burials[0].account_number.as_deref(), Some("20260001"));
    }

    #[test]
    fn test_collect_all_skips_trash() {
        let mut store = RegistryStore::new();
        let cemetery_id = seed_cemetery(&mut store, "Северное");
        let place_id = seed_place(&mut store, cemetery_id, "1", "1", None, 2);
        seed_burial(&mut store, place_id, Operation::Burial, "20260001", d(2026, 5, 1));
        let trashed =
            seed_burial(&mut store, place_id, Operation::Burial, "20260002", d(2026, 6, 1));
        store.burial_mut(trashed).unwrap().is_trash = true;

        let batch = collect_all(&store);
        assert_eq!(batch.burials.len(), 1);
    }
}
