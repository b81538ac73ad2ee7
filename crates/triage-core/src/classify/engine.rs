use crate::model::{Priority, RecordKind};
use crate::rules::schema::KeywordRules;

/// Decide whether a description is a review request or a failure report.
///
/// Case-insensitive substring match of the review marker. Anything without
/// the marker is a failure report.
pub fn classify_type(description: &str, rules: &KeywordRules) -> RecordKind {
    let haystack = description.to_lowercase();
    if haystack.contains(&rules.review_marker.to_lowercase()) {
        RecordKind::Review
    } else {
        RecordKind::FailureReport
    }
}

/// Derive the priority of a failure report from its description.
///
/// Scans the rule table in declared order and returns the first match, so a
/// description containing both "bardzo pilne" and "pilne" resolves to
/// critical. An empty keyword is a fallback and matches when reached.
pub fn derive_priority(description: &str, rules: &KeywordRules) -> Priority {
    let haystack = description.to_lowercase();
    rules
        .priorities
        .iter()
        .find(|rule| rule.is_fallback() || haystack.contains(&rule.keyword.to_lowercase()))
        .map(|rule| rule.priority)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::load_preset;
    use crate::rules::schema::PriorityRule;

    fn pl() -> KeywordRules {
        load_preset("pl").unwrap()
    }

    #[test]
    fn test_marker_means_review() {
        let rules = pl();
        assert_eq!(
            classify_type("Zapraszam na ponowny przegląd maty", &rules),
            RecordKind::Review
        );
    }

    #[test]
    fn test_marker_any_case() {
        let rules = pl();
        assert_eq!(classify_type("PRZEGLĄD roczny", &rules), RecordKind::Review);
        assert_eq!(classify_type("Przegląd", &rules), RecordKind::Review);
    }

    #[test]
    fn test_no_marker_means_failure_report() {
        let rules = pl();
        assert_eq!(
            classify_type("Nie działa tarczka głównej maszyny", &rules),
            RecordKind::FailureReport
        );
        // Without the diacritic it is a different word.
        assert_eq!(classify_type("przeglad", &rules), RecordKind::FailureReport);
    }

    #[test]
    fn test_critical_wins_over_high() {
        let rules = pl();
        assert_eq!(
            derive_priority("Krajalnice mięso. Nie działa bardzo pilne.", &rules),
            Priority::Critical
        );
        assert_eq!(
            derive_priority("pilne! a nawet BARDZO PILNE", &rules),
            Priority::Critical
        );
    }

    #[test]
    fn test_high_priority() {
        assert_eq!(derive_priority("Sprzęt nie działa, pilne!", &pl()), Priority::High);
    }

    #[test]
    fn test_normal_is_fallback() {
        assert_eq!(derive_priority("Drzwi skrzypią", &pl()), Priority::Normal);
        assert_eq!(derive_priority("", &pl()), Priority::Normal);
    }

    #[test]
    fn test_table_without_fallback_defaults_to_normal() {
        let mut rules = pl();
        rules.priorities = vec![PriorityRule {
            priority: Priority::Critical,
            keyword: "pożar".into(),
        }];
        assert_eq!(derive_priority("Drzwi skrzypią", &rules), Priority::Normal);
        assert_eq!(derive_priority("Pożar w kuchni", &rules), Priority::Critical);
    }

    #[test]
    fn test_declared_order_is_respected() {
        let mut rules = pl();
        // Reversed table: "pilne" now shadows "bardzo pilne".
        rules.priorities = vec![
            PriorityRule {
                priority: Priority::High,
                keyword: "pilne".into(),
            },
            PriorityRule {
                priority: Priority::Critical,
                keyword: "bardzo pilne".into(),
            },
        ];
        assert_eq!(derive_priority("bardzo pilne", &rules), Priority::High);
    }
}
