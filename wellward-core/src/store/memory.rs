//! In-process record store.
//!
//! Backs tests and embedders that do not have the real persistent store
//! wired up. Semantics match the external collaborator: snapshots are
//! point-in-time copies, writes are additive merges.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Result;
use crate::store::RecordStore;
use crate::types::{ActivityKind, ActivityRecord, RecordCollection};
use crate::week::monday_of;

type PatientDocument = HashMap<ActivityKind, RecordCollection>;

/// A `RecordStore` held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    patients: Mutex<HashMap<String, PatientDocument>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a patient document, e.g. from
    /// [`decode_patient_document`](crate::store::decode_patient_document).
    ///
    /// Merges record-by-record into any collections already present.
    pub fn load_document(
        &self,
        patient_id: &str,
        document: impl IntoIterator<Item = (ActivityKind, RecordCollection)>,
    ) {
        let mut patients = self.patients.lock().expect("store lock poisoned");
        let doc = patients.entry(patient_id.to_string()).or_default();
        for (kind, collection) in document {
            let target = doc
                .entry(kind)
                .or_insert_with(|| RecordCollection::new(kind));
            for record in collection.iter() {
                if let Err(error) = target.insert(record.clone()) {
                    tracing::warn!(%error, "skipping record while seeding document");
                }
            }
        }
    }
}

impl RecordStore for MemoryStore {
    fn snapshot(&self, patient_id: &str, kind: ActivityKind) -> Result<RecordCollection> {
        let patients = self.patients.lock().expect("store lock poisoned");
        Ok(patients
            .get(patient_id)
            .and_then(|doc| doc.get(&kind))
            .cloned()
            .unwrap_or_else(|| RecordCollection::new(kind)))
    }

    fn append(&self, patient_id: &str, mut record: ActivityRecord) -> Result<()> {
        // The stamp is computed at write time from the record's date and
        // never independently edited.
        let meta = record.meta_mut();
        meta.week_commencing = monday_of(meta.date);

        let mut patients = self.patients.lock().expect("store lock poisoned");
        let collection = patients
            .entry(patient_id.to_string())
            .or_default()
            .entry(record.kind())
            .or_insert_with(|| RecordCollection::new(record.kind()));

        if collection.get(record.id()).is_some() {
            // Activity instances are write-once; a duplicate id keeps the
            // original record.
            tracing::warn!(id = record.id(), kind = %record.kind(), "ignoring duplicate append");
            return Ok(());
        }

        collection.insert(record)
    }
}
