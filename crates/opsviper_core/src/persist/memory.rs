//! In-memory snapshot record.
//!
//! Holds the serialized record as a single string, the same shape the
//! browser build kept under its storage key. Serves as the test double and
//! as the reference implementation of the backend contract.

use log::error;
use serde_json::Value;
use std::cell::RefCell;

use super::SnapshotStore;
use crate::model::snapshot::Snapshot;

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    record: RefCell<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a pre-existing raw record, e.g. to simulate a corrupt or
    /// legacy payload in tests.
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: RefCell::new(Some(record.into())),
        }
    }

    /// The raw serialized record, if any.
    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        let record = self.record.borrow();
        let body = record.as_deref()?;
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Some(Snapshot::from_value(&value)),
            Err(_) => None,
        }
    }

    fn save(&self, snapshot: &Snapshot) {
        match serde_json::to_string(snapshot) {
            Ok(body) => *self.record.borrow_mut() = Some(body),
            Err(err) => {
                error!(
                    "event=snapshot_save module=persist status=error error_code=serialize error={err}"
                );
            }
        }
    }

    fn clear(&self) {
        *self.record.borrow_mut() = None;
    }
}
