//! Registry of accepted launches
//!
//! Append-at-front ordered store: the newest launch is always first. No
//! update or removal exists; records live for the process lifetime only.

use crate::models::LaunchRecord;
use parking_lot::Mutex;

#[derive(Default)]
pub struct LaunchRegistry {
    records: Mutex<Vec<LaunchRecord>>,
}

impl LaunchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record at the front of the sequence.
    pub fn record(&self, record: LaunchRecord) {
        self.records.lock().insert(0, record);
    }

    /// Snapshot of all records, most recent first.
    pub fn list(&self) -> Vec<LaunchRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
