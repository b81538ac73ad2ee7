use chrono::Local;
use std::path::{Path, PathBuf};
use triage_core::error::TriageError;
use triage_core::report::ReportWriter;
use triage_core::store::{RecordStore, SqliteStore};
use triage_core::ImportOptions;

use crate::output;

pub struct ImportArgs {
    pub input_file: PathBuf,
    pub db: PathBuf,
    pub results_dir: PathBuf,
    pub phone_region: String,
    pub rules_file: Option<PathBuf>,
    pub preset: Option<String>,
    pub dry_run: bool,
    pub output_format: String,
    pub verbose: bool,
}

pub fn run(args: ImportArgs) -> Result<(), TriageError> {
    if !args.input_file.is_file() {
        return Err(TriageError::InvalidInput(format!(
            "source file not found: {}",
            args.input_file.display()
        )));
    }

    let rules = super::resolve_rules(args.rules_file, args.preset)?;
    let mut options = ImportOptions::with_region(&args.phone_region)?;
    options.dry_run = args.dry_run;

    tracing::info!(file = %args.input_file.display(), "importing messages");
    let json = std::fs::read_to_string(&args.input_file)?;
    let mut store = open_store(&args.db, args.dry_run)?;
    let result = triage_core::import_batch(&json, store.as_mut(), &rules, &options)?;

    // Nothing is written in a dry run, result files included.
    let files = if args.dry_run {
        Vec::new()
    } else {
        ReportWriter::new(args.results_dir.clone()).write(&result, Local::now().naive_local())?
    };

    match args.output_format.as_str() {
        "json" => output::json::print_import(&result, &files)?,
        _ => output::table::print_import(&result, &files, &args.input_file, args.verbose),
    }

    Ok(())
}

/// A dry run against a database that does not exist yet checks duplicates
/// against an empty in-memory store, so no file or directory is created.
fn open_store(db: &Path, dry_run: bool) -> Result<Box<dyn RecordStore>, TriageError> {
    if dry_run && !db.is_file() {
        tracing::debug!(path = %db.display(), "no database yet, dry run uses memory");
        return Ok(Box::new(SqliteStore::open_in_memory()?));
    }
    Ok(Box::new(SqliteStore::open(db)?))
}
