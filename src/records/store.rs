//! The sole owner of the record collection and its persisted mirror.
//!
//! Every mutating operation validates fully, applies the change, then
//! writes the whole collection back through the blob store before it
//! returns, so the persisted and in-memory state never disagree between
//! operations.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::SpendlogError;
use crate::storage::BlobStore;

use super::view::{self, SortKey};
use super::{Record, RecordDraft, RecordId};

/// The single named slot the collection is persisted under.
pub const RECORDS_KEY: &str = "records";

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    records: Vec<Record>,
}

#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: RecordId,
    blob: Box<dyn BlobStore>,
}

impl RecordStore {
    /// Loads the persisted collection. A missing, unreadable, undecodable,
    /// or wrong-version blob means first run: start empty, never fail.
    pub fn open(blob: Box<dyn BlobStore>) -> Result<Self, SpendlogError> {
        let records = match blob.get(RECORDS_KEY) {
            Err(err) => {
                warn!(%err, "could not read records blob, starting empty");
                Vec::new()
            }
            Ok(Some(bytes)) => match rmp_serde::from_slice::<Snapshot>(&bytes) {
                Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => snapshot.records,
                Ok(snapshot) => {
                    warn!(version = snapshot.version, "unknown snapshot version, starting empty");
                    Vec::new()
                }
                Err(err) => {
                    warn!(%err, "could not decode records blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!("no records blob found, starting empty");
                Vec::new()
            }
        };
        let next_id = records.iter().map(|record| record.id).max().map_or(1, |id| id + 1);
        Ok(Self { records, next_id, blob })
    }

    /// Validates the draft and appends a new record with a fresh id.
    /// A validation failure leaves both the collection and the blob untouched.
    pub fn add(&mut self, draft: &RecordDraft) -> Result<Record, SpendlogError> {
        let fields = draft.validate()?;
        let record = Record {
            id: self.next_id,
            description: fields.description,
            amount: fields.amount,
            category: fields.category,
        };
        self.next_id += 1;
        self.records.push(record.clone());
        self.persist()?;
        debug!(id = record.id, "record added");
        Ok(record)
    }

    /// Replaces the fields of the record with `id` in place, keeping its
    /// position and identity. The original record survives any failure.
    pub fn update_at(&mut self, id: RecordId, draft: &RecordDraft) -> Result<Record, SpendlogError> {
        let fields = draft.validate()?;
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(SpendlogError::NotFound(id))?;
        record.description = fields.description;
        record.amount = fields.amount;
        record.category = fields.category;
        let updated = record.clone();
        self.persist()?;
        debug!(id, "record updated");
        Ok(updated)
    }

    /// Removes the record with `id`. Deleting an absent id is a no-op that
    /// returns `None` and skips the persistence write entirely.
    pub fn remove_at(&mut self, id: RecordId) -> Result<Option<Record>, SpendlogError> {
        let Some(position) = self.records.iter().position(|record| record.id == id) else {
            debug!(id, "remove of absent record ignored");
            return Ok(None);
        };
        let removed = self.records.remove(position);
        self.persist()?;
        debug!(id, "record removed");
        Ok(Some(removed))
    }

    pub fn clear(&mut self) -> Result<(), SpendlogError> {
        self.records.clear();
        self.persist()?;
        debug!("all records cleared");
        Ok(())
    }

    /// Reorders the collection by `key` and persists the result as the new
    /// canonical order. The sort is stable, so ties keep their relative order.
    pub fn sort_by(&mut self, key: SortKey) -> Result<(), SpendlogError> {
        self.records.sort_by(|a, b| view::compare(key, a, b));
        self.persist()?;
        debug!(?key, "records sorted");
        Ok(())
    }

    /// The current ordered collection. Read-only: mutation goes through the
    /// methods above so it cannot bypass validation or persistence.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn persist(&mut self) -> Result<(), SpendlogError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            records: self.records.clone(),
        };
        let bytes = rmp_serde::to_vec_named(&snapshot)?;
        self.blob.set(RECORDS_KEY, &bytes)
    }
}
