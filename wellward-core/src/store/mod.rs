//! Record store boundary
//!
//! The persistent record store (network, offline cache, write-merge) is
//! an external collaborator. The core consumes point-in-time snapshots
//! through the [`RecordStore`] seam, validates loosely-typed payloads in
//! [`decode`], and ships an in-process [`MemoryStore`] for tests and
//! embedders.
//!
//! Dependencies are passed explicitly: every call takes the patient id
//! and a store handle, never ambient session state.

use crate::error::Result;
use crate::types::{ActivityKind, ActivityRecord, RecordCollection};

pub mod decode;
pub mod memory;

pub use decode::{decode_collection, decode_patient_document, DecodedCollection, RejectedRecord};
pub use memory::MemoryStore;

/// A patient's record store.
///
/// `snapshot` returns an immutable point-in-time copy; a snapshot taken
/// before a concurrent upstream write simply reflects the earlier state,
/// and the next snapshot picks the write up. Absence of a kind is an
/// empty collection, not an error.
pub trait RecordStore {
    /// Point-in-time copy of one activity-kind collection.
    fn snapshot(&self, patient_id: &str, kind: ActivityKind) -> Result<RecordCollection>;

    /// Additive merge write. Re-stamps `week_commencing` from the
    /// record's date, and never overwrites or removes an existing id.
    fn append(&self, patient_id: &str, record: ActivityRecord) -> Result<()>;
}
