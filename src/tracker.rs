//! The facade the presentation layer talks to. It wires the store, the
//! edit session, and the current filter together and tells its observers
//! when something they display has changed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::SpendlogError;
use crate::records::session::EditSession;
use crate::records::store::RecordStore;
use crate::records::summary::{self, Summary};
use crate::records::view::{self, SortKey};
use crate::records::{Record, RecordDraft, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// The collection's contents or canonical order changed.
    CollectionChanged,
    /// The edit session began, confirmed, or was cancelled.
    EditSessionChanged,
}

pub struct Tracker {
    store: RecordStore,
    session: EditSession,
    filter: String,
    listeners: Vec<Box<dyn FnMut(TrackerEvent)>>,
}

impl Tracker {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            session: EditSession::default(),
            filter: String::new(),
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(TrackerEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: TrackerEvent) {
        debug!(?event, "notifying listeners");
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Confirms the pending edit session, or adds a new record when no
    /// session is active. A failed confirm keeps the session targeting.
    pub fn add_or_edit(&mut self, draft: &RecordDraft) -> Result<Record, SpendlogError> {
        let record = self.session.confirm(&mut self.store, draft)?;
        self.notify(TrackerEvent::CollectionChanged);
        self.notify(TrackerEvent::EditSessionChanged);
        Ok(record)
    }

    /// Starts editing `id` and returns its field values for pre-fill.
    pub fn begin_edit(&mut self, id: RecordId) -> Result<RecordDraft, SpendlogError> {
        let draft = self.session.begin(&self.store, id)?;
        self.notify(TrackerEvent::EditSessionChanged);
        Ok(draft)
    }

    pub fn cancel_edit(&mut self) {
        if self.session.is_editing() {
            self.session.cancel();
            self.notify(TrackerEvent::EditSessionChanged);
        }
    }

    /// Idempotent delete: `None` means there was nothing to remove.
    pub fn delete(&mut self, id: RecordId) -> Result<Option<Record>, SpendlogError> {
        let removed = self.store.remove_at(id)?;
        if removed.is_some() {
            self.notify(TrackerEvent::CollectionChanged);
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> Result<(), SpendlogError> {
        self.store.clear()?;
        self.notify(TrackerEvent::CollectionChanged);
        Ok(())
    }

    /// Remembers `text` as the active filter and returns the derived view.
    /// Filtering never reorders or persists anything.
    pub fn set_filter(&mut self, text: &str) -> Vec<Record> {
        self.filter = text.to_string();
        self.current_view()
    }

    /// Reorders the stored collection and persists the new canonical order,
    /// then returns the (possibly filtered) view of it.
    pub fn sort_by(&mut self, key: SortKey) -> Result<Vec<Record>, SpendlogError> {
        self.store.sort_by(key)?;
        self.notify(TrackerEvent::CollectionChanged);
        Ok(self.current_view())
    }

    /// Owned snapshot of what the user currently sees: the stored order,
    /// narrowed by the active filter.
    pub fn current_view(&self) -> Vec<Record> {
        view::filter_by_category(self.store.records(), &self.filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Total over the current (possibly filtered) view.
    pub fn current_total(&self) -> Decimal {
        summary::total(&self.current_view())
    }

    pub fn summary(&self) -> Summary {
        Summary::of(&self.current_view())
    }

    /// True when there is no data at all, regardless of the filter.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::storage::MemoryStore;

    use super::*;

    fn tracker() -> Tracker {
        Tracker::new(RecordStore::open(Box::new(MemoryStore::new())).unwrap())
    }

    fn watch(tracker: &mut Tracker) -> Rc<RefCell<Vec<TrackerEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        tracker.subscribe(move |event| sink.borrow_mut().push(event));
        events
    }

    #[test]
    fn mutations_notify_collection_changed() {
        let mut tracker = tracker();
        let events = watch(&mut tracker);

        let record = tracker
            .add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food"))
            .unwrap();
        assert!(events.borrow().contains(&TrackerEvent::CollectionChanged));

        events.borrow_mut().clear();
        tracker.delete(record.id).unwrap();
        assert_eq!(events.borrow()[0], TrackerEvent::CollectionChanged);

        // deleting again is a no-op and stays silent
        events.borrow_mut().clear();
        tracker.delete(record.id).unwrap();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn session_transitions_notify() {
        let mut tracker = tracker();
        let record = tracker
            .add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food"))
            .unwrap();
        let events = watch(&mut tracker);

        tracker.begin_edit(record.id).unwrap();
        assert_eq!(events.borrow()[0], TrackerEvent::EditSessionChanged);

        events.borrow_mut().clear();
        tracker.cancel_edit();
        assert_eq!(events.borrow()[0], TrackerEvent::EditSessionChanged);

        // cancelling while idle is not a transition
        events.borrow_mut().clear();
        tracker.cancel_edit();
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn failed_add_keeps_everything_quiet() {
        let mut tracker = tracker();
        let events = watch(&mut tracker);
        let err = tracker
            .add_or_edit(&RecordDraft::new("", "4.50", "Food"))
            .unwrap_err();
        assert!(matches!(err, SpendlogError::Validation(_)));
        assert!(events.borrow().is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn filter_narrows_view_and_total_without_reordering() {
        let mut tracker = tracker();
        tracker.add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food")).unwrap();
        tracker.add_or_edit(&RecordDraft::new("Bus", "2.00", "Transport")).unwrap();
        tracker.add_or_edit(&RecordDraft::new("Lunch", "9.00", "Food")).unwrap();

        let view = tracker.set_filter("food");
        assert_eq!(
            view.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
            vec!["Coffee", "Lunch"]
        );
        assert_eq!(tracker.current_total(), Decimal::new(1350, 2));

        let everything = tracker.set_filter("");
        assert_eq!(everything.len(), 3);
        assert_eq!(tracker.current_total(), Decimal::new(1550, 2));
    }

    #[test]
    fn summary_distinguishes_no_data_from_no_matches() {
        let mut tracker = tracker();
        assert!(tracker.is_empty());
        assert_eq!(tracker.summary(), Summary::Empty);

        tracker.add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food")).unwrap();
        tracker.set_filter("does-not-match");
        assert_eq!(tracker.summary(), Summary::Empty);
        assert!(!tracker.is_empty());
    }

    #[test]
    fn add_edit_sort_scenario() {
        let mut tracker = tracker();
        let coffee = tracker
            .add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food"))
            .unwrap();
        tracker.add_or_edit(&RecordDraft::new("Bus", "2.00", "Transport")).unwrap();

        let view = tracker.current_view();
        assert_eq!(
            view.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
            vec!["Coffee", "Bus"]
        );
        assert_eq!(tracker.current_total(), Decimal::new(650, 2));

        let prefill = tracker.begin_edit(coffee.id).unwrap();
        assert_eq!(prefill.amount, "4.50");
        tracker
            .add_or_edit(&RecordDraft::new("Coffee", "5.00", "Food"))
            .unwrap();

        let view = tracker.current_view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].id, coffee.id);
        assert_eq!(view[0].amount, Decimal::new(500, 2));
        assert_eq!(tracker.current_total(), Decimal::new(700, 2));

        let sorted = tracker.sort_by(SortKey::Amount).unwrap();
        assert_eq!(
            sorted.iter().map(|r| r.description.as_str()).collect::<Vec<_>>(),
            vec!["Bus", "Coffee"]
        );
    }

    #[test]
    fn clear_all_removes_everything() {
        let mut tracker = tracker();
        tracker.add_or_edit(&RecordDraft::new("Coffee", "4.50", "Food")).unwrap();
        tracker.clear_all().unwrap();
        assert!(tracker.is_empty());
        assert_eq!(tracker.summary(), Summary::Empty);
    }
}
