use std::path::Path;
use triage_core::error::TriageError;
use triage_core::rules::builtin;

pub fn list() -> Result<(), TriageError> {
    println!("Available predefined keyword rules:\n");
    for name in builtin::PRESETS {
        let rules = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<8} {} (v{}){}",
            name, rules.name, rules.version, default_marker
        );
        if let Some(ref desc) = rules.description {
            println!("           {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), TriageError> {
    let rules = builtin::load_preset(preset)?;

    println!("{} (version {})\n", rules.name, rules.version);

    if let Some(ref desc) = rules.description {
        println!("{}\n", desc);
    }

    println!(
        "A message whose description contains '{}' (any letter case) becomes",
        rules.review_marker
    );
    println!("a review. Every other message becomes a failure report.\n");
    println!("Reviews with a due date are 'scheduled' and get an ISO week number;");
    println!("failure reports with a due date get status 'deadline'.\n");

    println!("Failure report priority, first match wins:\n");
    for (idx, rule) in rules.priorities.iter().enumerate() {
        if rule.is_fallback() {
            println!("  {}. {:<10} (anything else)", idx + 1, rule.priority);
        } else {
            println!("  {}. {:<10} contains '{}'", idx + 1, rule.priority, rule.keyword);
        }
    }
    if !rules.priorities.iter().any(|r| r.is_fallback()) {
        println!("     normal     (anything else)");
    }
    println!();

    Ok(())
}

pub fn validate(file: &Path) -> Result<(), TriageError> {
    let rules = triage_core::rules::load_rules(file)?;

    println!("Rules '{}' (v{}) are valid.", rules.name, rules.version);
    println!("  Language: {}", rules.language);
    println!("  Review marker: {}", rules.review_marker);
    println!("  Priority keywords: {}", rules.priorities.len());

    // Warnings, not errors
    let mut warnings = Vec::new();
    if !rules.priorities.iter().any(|r| r.is_fallback()) {
        warnings.push("no fallback entry; unmatched descriptions default to 'normal'".to_string());
    }
    for (idx, rule) in rules.priorities.iter().enumerate() {
        let lower = rule.keyword.to_lowercase();
        if rule.is_fallback() {
            continue;
        }
        for earlier in &rules.priorities[..idx] {
            if !earlier.is_fallback() && lower.contains(&earlier.keyword.to_lowercase()) {
                warnings.push(format!(
                    "keyword '{}' ({}) is shadowed by earlier keyword '{}' ({})",
                    rule.keyword, rule.priority, earlier.keyword, earlier.priority
                ));
            }
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
