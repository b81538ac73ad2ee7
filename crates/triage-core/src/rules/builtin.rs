use crate::error::TriageError;
use crate::rules::schema::KeywordRules;

const PL_JSON: &str = include_str!("presets/pl.json");
const EN_JSON: &str = include_str!("presets/en.json");

/// Available predefined keyword rules.
pub const PRESETS: &[&str] = &["pl", "en"];

/// Preset used when neither a preset nor a rule file is given.
pub const DEFAULT_PRESET: &str = "pl";

/// Load a predefined rule table by name.
pub fn load_preset(name: &str) -> Result<KeywordRules, TriageError> {
    let json = match name {
        "pl" => PL_JSON,
        "en" => EN_JSON,
        _ => {
            return Err(TriageError::RulesInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    super::parse_rules_str(json)
}

/// The Polish rules every import falls back to.
pub fn default_rules() -> Result<KeywordRules, TriageError> {
    load_preset(DEFAULT_PRESET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    #[test]
    fn test_load_pl_preset() {
        let rules = load_preset("pl").unwrap();
        assert_eq!(rules.review_marker, "przegląd");
        let order: Vec<Priority> = rules.priorities.iter().map(|r| r.priority).collect();
        assert_eq!(order, vec![Priority::Critical, Priority::High, Priority::Normal]);
        assert_eq!(rules.priorities[0].keyword, "bardzo pilne");
        assert!(rules.priorities[2].is_fallback());
    }

    #[test]
    fn test_all_presets_load() {
        for name in PRESETS {
            assert!(load_preset(name).is_ok(), "preset {name} failed to load");
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
