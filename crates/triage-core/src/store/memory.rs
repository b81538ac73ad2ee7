use chrono::Utc;

use super::RecordStore;
use crate::error::StoreError;
use crate::model::{Record, RecordKind};

/// Vec-backed store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn exists(&self, kind: RecordKind, description: &str) -> Result<bool, StoreError> {
        Ok(self
            .records
            .iter()
            .any(|r| r.kind() == kind && r.description() == description))
    }

    fn save_all(&mut self, records: Vec<Record>) -> Result<Vec<Record>, StoreError> {
        let now = Utc::now();
        let mut saved = Vec::with_capacity(records.len());
        for mut record in records {
            self.next_id += 1;
            record.assign_identity(self.next_id, now);
            saved.push(record);
        }
        self.records.extend(saved.iter().cloned());
        Ok(saved)
    }

    fn load_all(&self, kind: RecordKind) -> Result<Vec<Record>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
