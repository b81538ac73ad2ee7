use std::path::Path;
use triage_core::error::TriageError;
use triage_core::model::{Record, RecordKind};
use triage_core::store::{RecordStore, SqliteStore};

use crate::output;

pub fn run(db: &Path, kind: Option<&str>, output_format: &str) -> Result<(), TriageError> {
    let kinds: Vec<RecordKind> = match kind {
        Some(k) => vec![RecordKind::from_str_loose(k).ok_or_else(|| {
            TriageError::InvalidInput(format!(
                "unknown record kind '{}'. Available: review, failure-report",
                k
            ))
        })?],
        None => RecordKind::ALL.to_vec(),
    };

    if !db.is_file() {
        return Err(TriageError::InvalidInput(format!(
            "database not found: {}",
            db.display()
        )));
    }
    let store = SqliteStore::open(db)?;

    let mut records: Vec<Record> = Vec::new();
    for kind in kinds {
        records.extend(store.load_all(kind)?);
    }

    match output_format {
        "json" => output::json::print(&records)?,
        _ => output::table::print_records(&records),
    }

    Ok(())
}
