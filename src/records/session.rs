//! The single-slot edit session: at most one record is "checked out" for
//! editing at a time, and starting another edit replaces the current one.

use crate::errors::SpendlogError;

use super::store::RecordStore;
use super::{Record, RecordDraft, RecordId};

/// States: `Idle` or `Editing(id)`. `confirm` from `Idle` is a plain add;
/// from `Editing` it updates the target in place. A failed confirm keeps
/// the session where it was so the user can correct and resubmit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(RecordId),
}

impl EditSession {
    /// Targets `id` and returns its field values for form pre-fill. The
    /// record stays live in the store until the edit is confirmed. An
    /// absent id is an error and leaves the session unchanged.
    pub fn begin(&mut self, store: &RecordStore, id: RecordId) -> Result<RecordDraft, SpendlogError> {
        let record = store.find(id).ok_or(SpendlogError::NotFound(id))?;
        let draft = record.draft();
        *self = Self::Editing(id);
        Ok(draft)
    }

    pub fn confirm(
        &mut self,
        store: &mut RecordStore,
        draft: &RecordDraft,
    ) -> Result<Record, SpendlogError> {
        let record = match *self {
            Self::Idle => store.add(draft)?,
            Self::Editing(id) => store.update_at(id, draft)?,
        };
        *self = Self::Idle;
        Ok(record)
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    pub fn target(&self) -> Option<RecordId> {
        match self {
            Self::Idle => None,
            Self::Editing(id) => Some(*id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}
