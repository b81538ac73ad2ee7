pub mod classify;
pub mod dedup;
pub mod error;
pub mod model;
pub mod options;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod rules;
pub mod store;

use classify::outcome::BatchResult;
use error::TriageError;
use model::RawMessage;
use pipeline::MessagePipeline;
use rules::schema::KeywordRules;
use store::RecordStore;

pub use options::ImportOptions;

/// Main API entry point: import a JSON batch of messages into a store.
///
/// The container is decoded up front; if that fails nothing is processed or
/// persisted.
pub fn import_batch(
    json: &str,
    store: &mut dyn RecordStore,
    rules: &KeywordRules,
    options: &ImportOptions,
) -> Result<BatchResult, TriageError> {
    let messages = parsing::decode_batch(json)?;
    import_messages(&messages, store, rules, options)
}

/// Run already-decoded messages through the pipeline in input order, then
/// commit every created record in one `save_all` call.
pub fn import_messages(
    messages: &[RawMessage],
    store: &mut dyn RecordStore,
    rules: &KeywordRules,
    options: &ImportOptions,
) -> Result<BatchResult, TriageError> {
    tracing::info!(
        messages = messages.len(),
        backend = store.backend_name(),
        dry_run = options.dry_run,
        "import started"
    );

    let mut result = BatchResult::default();
    {
        let mut pipeline = MessagePipeline::new(&*store, rules, options)?;
        for raw in messages {
            let outcome = pipeline.process(raw)?;
            result.push(outcome);
        }
    }

    if !options.dry_run {
        let created = std::mem::take(&mut result.created);
        result.created = store.save_all(created)?;
    }

    let summary = result.summary();
    tracing::info!(
        created = summary.created.total(),
        duplicates = summary.duplicates.total(),
        errors = summary.errors,
        "import finished"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::default_rules;
    use crate::store::MemoryStore;

    #[test]
    fn test_dry_run_commits_nothing() {
        let mut store = MemoryStore::new();
        let options = ImportOptions {
            dry_run: true,
            ..ImportOptions::default()
        };
        let json = r#"[{"number": 1, "description": "Awaria pieca"}]"#;
        let result = import_batch(json, &mut store, &default_rules().unwrap(), &options).unwrap();
        assert_eq!(result.created.len(), 1);
        assert!(result.created[0].id().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_region_rejects_batch() {
        let mut store = MemoryStore::new();
        let options = ImportOptions {
            default_phone_region: "XX".into(),
            ..ImportOptions::default()
        };
        let json = r#"[{"number": 1, "description": "Awaria pieca"}]"#;
        let err = import_batch(json, &mut store, &default_rules().unwrap(), &options).unwrap_err();
        assert!(matches!(err, TriageError::Config(_)));
        assert!(store.is_empty());
    }
}
