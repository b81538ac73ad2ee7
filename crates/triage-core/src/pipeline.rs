use phonenumber::country;

use crate::classify::engine::{classify_type, derive_priority};
use crate::classify::outcome::{Outcome, Rejection};
use crate::dedup::DuplicateDetector;
use crate::error::{MessageError, StoreError, TriageError};
use crate::model::{FailureStatus, RawMessage, Record, RecordKind, ReviewStatus};
use crate::options::ImportOptions;
use crate::parsing::{iso_week, normalize_date, normalize_phone, parse_region};
use crate::rules::schema::KeywordRules;
use crate::store::RecordStore;

const DUPLICATE_REASON: &str = "already exists";

/// Turns raw messages into records, one at a time, in a fixed step order:
/// validate, classify, duplicate check, normalize dates, derive status and
/// priority, normalize phone.
pub struct MessagePipeline<'a> {
    rules: &'a KeywordRules,
    region: country::Id,
    detector: DuplicateDetector<'a>,
}

impl<'a> MessagePipeline<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        rules: &'a KeywordRules,
        options: &ImportOptions,
    ) -> Result<Self, TriageError> {
        Ok(Self {
            rules,
            region: parse_region(&options.default_phone_region)?,
            detector: DuplicateDetector::new(store),
        })
    }

    /// Process a single message.
    ///
    /// Per-message problems come back as `Outcome::Error`; only a failing
    /// store lookup is returned as `Err`.
    pub fn process(&mut self, raw: &RawMessage) -> Result<Outcome, StoreError> {
        if raw.description.is_empty() {
            tracing::warn!(number = raw.number, "message has empty description");
            return Ok(Outcome::Error(Rejection {
                number: raw.number,
                kind: None,
                reason: MessageError::EmptyDescription.reason().to_string(),
            }));
        }

        let kind = classify_type(&raw.description, self.rules);

        if self.detector.is_duplicate(kind, &raw.description)? {
            tracing::warn!(number = raw.number, %kind, "duplicate message");
            return Ok(Outcome::Duplicate(Rejection {
                number: raw.number,
                kind: Some(kind),
                reason: DUPLICATE_REASON.to_string(),
            }));
        }

        match self.build(kind, raw) {
            Ok(record) => {
                tracing::debug!(number = raw.number, %kind, status = record.status(), "record created");
                self.detector.remember(kind, &raw.description);
                Ok(Outcome::Created(record))
            }
            Err(e) => {
                tracing::warn!(number = raw.number, %kind, error = %e, "message rejected");
                Ok(Outcome::Error(Rejection {
                    number: raw.number,
                    kind: Some(kind),
                    reason: e.reason().to_string(),
                }))
            }
        }
    }

    fn build(&self, kind: RecordKind, raw: &RawMessage) -> Result<Record, MessageError> {
        let mut record = Record::new(kind, &raw.description);
        let date = normalize_date(raw.due_date.as_deref())?;

        match &mut record {
            Record::Review(review) => match date {
                Some(date) => {
                    review.review_date = Some(date);
                    review.week_of_year = Some(iso_week(date));
                    review.status = ReviewStatus::Scheduled;
                }
                None => review.status = ReviewStatus::New,
            },
            Record::FailureReport(report) => {
                match date {
                    Some(date) => {
                        report.date_of_service_visit = Some(date);
                        report.status = FailureStatus::Deadline;
                    }
                    None => report.status = FailureStatus::New,
                }
                report.priority = derive_priority(&raw.description, self.rules);
            }
        }

        if let Some(phone) = normalize_phone(raw.phone.as_deref(), self.region)? {
            record.set_client_phone(phone);
        }

        Ok(record)
    }
}
