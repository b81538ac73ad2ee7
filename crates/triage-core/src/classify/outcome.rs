use crate::model::{Record, RecordKind};
use serde::{Deserialize, Serialize};

/// Result of running one message through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(Record),
    Duplicate(Rejection),
    Error(Rejection),
}

/// A message that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    /// Sequence number of the originating message.
    pub number: i64,
    /// Kind the message was classified as, if classification happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    /// Human-readable reason.
    pub reason: String,
}

/// Per-kind tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindCounts {
    pub reviews: usize,
    pub failure_reports: usize,
}

impl KindCounts {
    fn bump(&mut self, kind: RecordKind) {
        match kind {
            RecordKind::Review => self.reviews += 1,
            RecordKind::FailureReport => self.failure_reports += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.reviews + self.failure_reports
    }
}

/// Counts reported to the user after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub created: KindCounts,
    pub duplicates: KindCounts,
    pub errors: usize,
    /// Errors raised after classification, by kind. Errors on messages that
    /// never got a kind (empty description) only appear in `errors`.
    pub errors_by_kind: KindCounts,
}

/// Outcomes of one import run, partitioned and in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub created: Vec<Record>,
    pub duplicates: Vec<Rejection>,
    pub errors: Vec<Rejection>,
}

impl BatchResult {
    pub fn push(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created(record) => self.created.push(record),
            Outcome::Duplicate(rejection) => self.duplicates.push(rejection),
            Outcome::Error(rejection) => self.errors.push(rejection),
        }
    }

    /// Created records of one kind.
    pub fn created_of(&self, kind: RecordKind) -> impl Iterator<Item = &Record> {
        self.created.iter().filter(move |r| r.kind() == kind)
    }

    pub fn processed(&self) -> usize {
        self.created.len() + self.duplicates.len() + self.errors.len()
    }

    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            errors: self.errors.len(),
            ..BatchSummary::default()
        };
        for record in &self.created {
            summary.created.bump(record.kind());
        }
        for dup in &self.duplicates {
            if let Some(kind) = dup.kind {
                summary.duplicates.bump(kind);
            }
        }
        for err in &self.errors {
            if let Some(kind) = err.kind {
                summary.errors_by_kind.bump(kind);
            }
        }
        summary
    }
}
