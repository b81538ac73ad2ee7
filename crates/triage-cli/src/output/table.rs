use std::fmt::Write;
use std::path::{Path, PathBuf};
use triage_core::classify::outcome::{BatchResult, KindCounts, Rejection};
use triage_core::model::{Record, RecordKind};

pub fn print_import(result: &BatchResult, files: &[PathBuf], input: &Path, verbose: bool) {
    print!("{}", render_import(result, files, input, verbose));
}

/// Import summary: counts by kind, every error reason, and the duplicate
/// list when `verbose` is set.
fn render_import(result: &BatchResult, files: &[PathBuf], input: &Path, verbose: bool) -> String {
    let summary = result.summary();
    let mut out = String::new();

    let _ = writeln!(out, "=== {} ===\n", input.display());
    let _ = writeln!(out, "  Processed:   {} messages", result.processed());
    let _ = writeln!(out, "  Created:     {}", by_kind(&summary.created));
    let _ = writeln!(out, "  Duplicates:  {}", by_kind(&summary.duplicates));
    let unclassified = summary.errors - summary.errors_by_kind.total();
    let _ = writeln!(
        out,
        "  Errors:      {} ({}, {} unclassified)",
        summary.errors,
        by_kind(&summary.errors_by_kind),
        unclassified
    );
    let _ = writeln!(out);

    render_rejections(&mut out, "Errors", &result.errors);
    if verbose {
        render_rejections(&mut out, "Duplicates", &result.duplicates);
    }

    if files.is_empty() {
        let _ = writeln!(out, "  No result files written.");
    } else {
        let _ = writeln!(out, "  Result files:");
        for file in files {
            let _ = writeln!(out, "    {}", file.display());
        }
    }
    out
}

fn by_kind(counts: &KindCounts) -> String {
    format!(
        "{} reviews, {} failure reports",
        counts.reviews, counts.failure_reports
    )
}

fn render_rejections(out: &mut String, title: &str, rejections: &[Rejection]) {
    if rejections.is_empty() {
        return;
    }
    let _ = writeln!(out, "  {title}:");
    for r in rejections {
        let kind = r.kind.map(|k| format!(" [{k}]")).unwrap_or_default();
        let _ = writeln!(out, "    #{}{}  {}", r.number, kind, r.reason);
    }
    let _ = writeln!(out);
}

pub fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("No records.");
        return;
    }

    println!(
        "  {:>5}  {:<13}  {:<9}  {:<10}  {:<8}  {:<14}  DESCRIPTION",
        "ID", "TYPE", "STATUS", "DATE", "PRIORITY", "PHONE"
    );
    for record in records {
        let id = record.id().map(|i| i.to_string()).unwrap_or_default();
        let date = record
            .due_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        let priority = match record {
            Record::FailureReport(r) => r.priority.as_str(),
            Record::Review(_) => "-",
        };
        let phone = record.client_phone().map(|p| p.as_str()).unwrap_or("-");
        println!(
            "  {:>5}  {:<13}  {:<9}  {:<10}  {:<8}  {:<14}  {}",
            id,
            record.kind(),
            record.status(),
            date,
            priority,
            phone,
            truncate(record.description(), 60)
        );
    }

    let reviews = records
        .iter()
        .filter(|r| r.kind() == RecordKind::Review)
        .count();
    println!(
        "\n  {} records ({} reviews, {} failure reports)",
        records.len(),
        reviews,
        records.len() - reviews
    );
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::classify::outcome::Outcome;

    fn rejection(number: i64, kind: Option<RecordKind>, reason: &str) -> Rejection {
        Rejection {
            number,
            kind,
            reason: reason.into(),
        }
    }

    fn sample_result() -> BatchResult {
        let mut result = BatchResult::default();
        result.push(Outcome::Created(Record::new(RecordKind::Review, "przegląd")));
        result.push(Outcome::Duplicate(rejection(
            2,
            Some(RecordKind::FailureReport),
            "already exists",
        )));
        result.push(Outcome::Error(rejection(3, None, "empty description")));
        result.push(Outcome::Error(rejection(
            4,
            Some(RecordKind::FailureReport),
            "invalid phone",
        )));
        result
    }

    #[test]
    fn test_import_summary_lists_errors_by_kind_and_reasons() {
        let text = render_import(&sample_result(), &[], Path::new("batch.json"), false);
        assert!(text.contains("Processed:   4 messages"));
        assert!(text.contains("Created:     1 reviews, 0 failure reports"));
        assert!(text.contains("Errors:      2 (0 reviews, 1 failure reports, 1 unclassified)"));
        assert!(text.contains("#3  empty description"));
        assert!(text.contains("#4 [FailureReport]  invalid phone"));
        assert!(!text.contains("already exists"));
    }

    #[test]
    fn test_verbose_adds_duplicate_list() {
        let text = render_import(&sample_result(), &[], Path::new("batch.json"), true);
        assert!(text.contains("#2 [FailureReport]  already exists"));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("przegląd", 20), "przegląd");
        assert_eq!(truncate("żółć żółć żółć", 8), "żółć ...");
    }
}
