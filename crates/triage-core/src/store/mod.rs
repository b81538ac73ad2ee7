//! Persistence collaborator for created records.
//!
//! The pipeline only ever asks a store whether a description already exists
//! for a kind, and hands it every created record in one `save_all` call at
//! the end of a batch.

pub mod memory;
pub mod migrations;
pub mod sqlite;

use crate::error::StoreError;
use crate::model::{Record, RecordKind};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Trait for record storage backends.
pub trait RecordStore {
    /// Whether a record of `kind` with exactly this description is stored.
    fn exists(&self, kind: RecordKind, description: &str) -> Result<bool, StoreError>;

    /// Persist all records in a single commit, returning them with `id` and
    /// `created_at` assigned. Either every record is stored or none is.
    fn save_all(&mut self, records: Vec<Record>) -> Result<Vec<Record>, StoreError>;

    /// All stored records of one kind, oldest first.
    fn load_all(&self, kind: RecordKind) -> Result<Vec<Record>, StoreError>;

    /// Name of this storage backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
