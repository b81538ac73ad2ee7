use std::path::PathBuf;
use triage_core::classify::{classify_type, derive_priority};
use triage_core::error::TriageError;
use triage_core::model::RecordKind;

pub fn run(
    description: &str,
    rules_file: Option<PathBuf>,
    preset: Option<String>,
) -> Result<(), TriageError> {
    let rules = super::resolve_rules(rules_file, preset)?;
    let kind = classify_type(description, &rules);

    println!("Rules:    {} (v{})", rules.name, rules.version);
    println!("Kind:     {}", kind);
    match kind {
        RecordKind::Review => {
            println!("Reason:   contains review marker '{}'", rules.review_marker);
        }
        RecordKind::FailureReport => {
            println!("Reason:   no review marker '{}'", rules.review_marker);
            println!("Priority: {}", derive_priority(description, &rules));
        }
    }

    Ok(())
}
