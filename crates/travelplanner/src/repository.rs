//! In-memory record collections mirrored to a [`KeyValueStore`].
//!
//! A [`Repository`] owns one ordered collection for the whole session. Every
//! mutation rewrites the full serialized collection under the record kind's
//! storage key. A failed write never rolls back the in-memory change: the
//! error is kept as a pending warning for the caller to surface, and the
//! collection stays authoritative.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{generate_id, Errand, Record};
use crate::storage::KeyValueStore;

/// An ordered collection of records of one kind.
pub struct Repository<R: Record> {
    records: Vec<R>,
    store: Rc<dyn KeyValueStore>,
    persist_error: Option<Error>,
}

impl<R: Record> fmt::Debug for Repository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("key", &R::STORAGE_KEY)
            .field("len", &self.records.len())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl<R: Record> Repository<R> {
    /// Load the collection stored under `R::STORAGE_KEY`.
    ///
    /// Absent, unreadable or corrupt data yields an empty collection; the
    /// cause is logged, never returned.
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let records = match store.get_item(R::STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<R>>(&raw) {
                Ok(records) => records,
                Err(err) => {
                    warn!(key = R::STORAGE_KEY, error = %err, "Ignoring corrupt stored collection");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = R::STORAGE_KEY, error = %err, "Storage unreadable, starting empty");
                Vec::new()
            }
        };

        debug!(key = R::STORAGE_KEY, count = records.len(), "Loaded collection");
        Self {
            records,
            store,
            persist_error: None,
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by identifier.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Whether a record with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// A fresh identifier not used by any record in this collection.
    #[must_use]
    pub fn next_id(&self) -> String {
        generate_id(|candidate| self.contains(candidate))
    }

    /// Append a fully constructed record and persist.
    pub fn add(&mut self, record: R) -> &R {
        debug!(kind = R::KIND, id = record.id(), "Adding record");
        self.records.push(record);
        self.persist();
        let last = self.records.len() - 1;
        &self.records[last]
    }

    /// Merge `patch` into the record with `id` and persist.
    ///
    /// Returns `false` without touching anything when no such record exists.
    pub fn update(&mut self, id: &str, patch: R::Patch) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            debug!(kind = R::KIND, id, "Update ignored, no such record");
            return false;
        };
        record.apply(patch);
        self.persist();
        true
    }

    /// Remove the record with `id` and persist.
    ///
    /// Returns the removed record, or `None` (and no write) when it is missing.
    pub fn remove(&mut self, id: &str) -> Option<R> {
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            debug!(kind = R::KIND, id, "Remove ignored, no such record");
            return None;
        };
        let removed = self.records.remove(index);
        self.persist();
        Some(removed)
    }

    /// Serialize the collection into its storage representation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_storage_string(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// Take the error from the most recent failed write, if any.
    pub fn take_persist_error(&mut self) -> Option<Error> {
        self.persist_error.take()
    }

    fn persist(&mut self) {
        let result = self
            .to_storage_string()
            .and_then(|raw| self.store.set_item(R::STORAGE_KEY, &raw));
        if let Err(err) = result {
            warn!(key = R::STORAGE_KEY, error = %err, "Failed to persist collection; keeping in-memory copy");
            self.persist_error = Some(err);
        }
    }
}

impl Repository<Errand> {
    /// Set the completion flag of the errand with `id` and persist.
    ///
    /// Returns `false` when no such errand exists.
    pub fn set_completed(&mut self, id: &str, completed: bool) -> bool {
        let Some(errand) = self.records.iter_mut().find(|e| e.id == id) else {
            debug!(id, "Completion change ignored, no such errand");
            return false;
        };
        errand.completed = completed;
        self.persist();
        true
    }

    /// Flip the completion flag of the errand with `id` and persist.
    ///
    /// Returns the new value, or `None` when no such errand exists.
    pub fn toggle_completed(&mut self, id: &str) -> Option<bool> {
        let completed = !self.find(id)?.completed;
        self.set_completed(id, completed);
        Some(completed)
    }

    /// Count of errands that are still pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.records.iter().filter(|e| !e.completed).count()
    }
}
