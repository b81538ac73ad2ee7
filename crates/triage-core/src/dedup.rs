use std::collections::HashSet;

use crate::error::StoreError;
use crate::model::RecordKind;
use crate::store::RecordStore;

/// Exact-description duplicate check, scoped by record kind.
///
/// Consults the store for previously committed records and an in-flight set
/// for records created earlier in the same batch, which are not committed
/// until the batch ends.
pub struct DuplicateDetector<'a> {
    store: &'a dyn RecordStore,
    in_flight: HashSet<(RecordKind, String)>,
}

impl<'a> DuplicateDetector<'a> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            in_flight: HashSet::new(),
        }
    }

    pub fn is_duplicate(&self, kind: RecordKind, description: &str) -> Result<bool, StoreError> {
        if self.in_flight.contains(&(kind, description.to_string())) {
            return Ok(true);
        }
        self.store.exists(kind, description)
    }

    /// Record a description created in the current batch.
    pub fn remember(&mut self, kind: RecordKind, description: &str) {
        self.in_flight.insert((kind, description.to_string()));
    }
}
