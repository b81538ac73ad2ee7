pub mod classify;
pub mod import;
pub mod list;
pub mod rules;

use std::path::PathBuf;
use triage_core::error::TriageError;
use triage_core::rules::builtin;
use triage_core::rules::schema::KeywordRules;

/// Resolve keyword rules from a custom file or a preset, defaulting to the
/// built-in Polish rules.
pub fn resolve_rules(
    rules_file: Option<PathBuf>,
    preset: Option<String>,
) -> Result<KeywordRules, TriageError> {
    match (rules_file, preset) {
        (Some(path), _) => triage_core::rules::load_rules(&path),
        (None, Some(name)) => builtin::load_preset(&name),
        (None, None) => builtin::default_rules(),
    }
}
