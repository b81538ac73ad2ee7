use serde::Serialize;
use std::path::PathBuf;
use triage_core::classify::outcome::{BatchResult, BatchSummary};
use triage_core::error::TriageError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), TriageError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportReport<'a> {
    summary: BatchSummary,
    result: &'a BatchResult,
    result_files: &'a [PathBuf],
}

pub fn print_import(result: &BatchResult, files: &[PathBuf]) -> Result<(), TriageError> {
    print(&ImportReport {
        summary: result.summary(),
        result,
        result_files: files,
    })
}
