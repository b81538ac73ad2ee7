//! Timestamped JSON result files for a finished batch.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classify::outcome::BatchResult;
use crate::error::TriageError;
use crate::model::{Record, RecordKind};

/// Timestamp layout used in result file names, e.g. `13_01_2024_15_30_51`.
pub const STAMP_FORMAT: &str = "%d_%m_%Y_%H_%M_%S";

/// Writes one artifact per record kind, one for duplicates and one for
/// errors. Empty categories produce no file.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the result files and return their paths.
    pub fn write(&self, result: &BatchResult, stamp: NaiveDateTime) -> Result<Vec<PathBuf>, TriageError> {
        std::fs::create_dir_all(&self.dir)?;
        let stamp = stamp.format(STAMP_FORMAT).to_string();
        let mut written = Vec::new();

        for kind in RecordKind::ALL {
            let records: Vec<&Record> = result.created_of(kind).collect();
            if let Some(path) = self.write_one(category_name(kind), &stamp, &records)? {
                written.push(path);
            }
        }
        if let Some(path) = self.write_one("Duplicates", &stamp, &result.duplicates)? {
            written.push(path);
        }
        if let Some(path) = self.write_one("Errors", &stamp, &result.errors)? {
            written.push(path);
        }

        tracing::info!(dir = %self.dir.display(), files = written.len(), "result files written");
        Ok(written)
    }

    fn write_one<T: Serialize>(
        &self,
        category: &str,
        stamp: &str,
        items: &[T],
    ) -> Result<Option<PathBuf>, TriageError> {
        if items.is_empty() {
            return Ok(None);
        }
        let path = self.dir.join(format!("{category}_{stamp}.json"));
        let json = serde_json::to_string_pretty(items)?;
        std::fs::write(&path, json)?;
        Ok(Some(path))
    }
}

fn category_name(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Review => "Reviews",
        RecordKind::FailureReport => "FailureReports",
    }
}
