pub mod builtin;
pub mod schema;

use crate::error::TriageError;
use schema::KeywordRules;
use std::collections::HashSet;
use std::path::Path;

/// Load keyword rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<KeywordRules, TriageError> {
    let content = std::fs::read_to_string(path).map_err(|e| TriageError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rules(&content, path)
}

/// Parse keyword rules from a JSON string read from `source`.
pub fn parse_rules(json: &str, source: &Path) -> Result<KeywordRules, TriageError> {
    let rules: KeywordRules = serde_json::from_str(json).map_err(|e| TriageError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Parse keyword rules from a JSON string (no file path context).
pub fn parse_rules_str(json: &str) -> Result<KeywordRules, TriageError> {
    let rules: KeywordRules = serde_json::from_str(json).map_err(TriageError::Json)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Validate that a rule table is well-formed.
pub fn validate_rules(rules: &KeywordRules) -> Result<(), TriageError> {
    if rules.review_marker.trim().is_empty() {
        return Err(TriageError::RulesInvalid(
            "reviewMarker must not be empty".into(),
        ));
    }

    if rules.priorities.is_empty() {
        return Err(TriageError::RulesInvalid(
            "priorities must not be empty".into(),
        ));
    }

    let mut seen = HashSet::new();
    let last = rules.priorities.len() - 1;
    for (idx, rule) in rules.priorities.iter().enumerate() {
        if rule.is_fallback() {
            if idx != last {
                return Err(TriageError::RulesInvalid(format!(
                    "fallback entry for '{}' at position {} makes later entries unreachable",
                    rule.priority,
                    idx + 1
                )));
            }
            continue;
        }

        if !seen.insert(rule.keyword.to_lowercase()) {
            return Err(TriageError::RulesInvalid(format!(
                "keyword '{}' is listed more than once",
                rule.keyword
            )));
        }
    }

    Ok(())
}
