use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One free-text customer message as it arrives in an import batch.
///
/// Text fields accept any JSON scalar. A wrong type in one message must not
/// make the whole container undecodable, so values are kept as text and
/// judged later by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    pub number: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_text")]
    pub phone: Option<String>,
}

/// `null` becomes `None`, numbers and booleans become their JSON text.
fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_as_text(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    Review,
    FailureReport,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Review, RecordKind::FailureReport];

    /// Value of the `type` discriminator on stored records.
    pub fn type_name(self) -> &'static str {
        match self {
            RecordKind::Review => "review",
            RecordKind::FailureReport => "failureReport",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<RecordKind> {
        let lower = s.trim().to_lowercase().replace(['-', '_', ' '], "");
        match lower.as_str() {
            "review" | "reviews" | "przegląd" => Some(RecordKind::Review),
            "failurereport" | "failurereports" | "failure" => Some(RecordKind::FailureReport),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Review => f.pad("Review"),
            RecordKind::FailureReport => f.pad("FailureReport"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Normal,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Normal => "normal",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "normal" => Ok(Priority::Normal),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    New,
    Scheduled,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::New => "new",
            ReviewStatus::Scheduled => "scheduled",
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(ReviewStatus::New),
            "scheduled" => Ok(ReviewStatus::Scheduled),
            other => Err(format!("unknown review status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStatus {
    #[default]
    New,
    Deadline,
}

impl FailureStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStatus::New => "new",
            FailureStatus::Deadline => "deadline",
        }
    }
}

impl FromStr for FailureStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(FailureStatus::New),
            "deadline" => Ok(FailureStatus::Deadline),
            other => Err(format!("unknown failure report status '{other}'")),
        }
    }
}

/// Phone number in E.164 form, e.g. `+48505167301`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    pub(crate) fn new(e164: String) -> Self {
        CanonicalPhone(e164)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A scheduled or completed inspection visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    pub review_date: Option<NaiveDate>,
    pub week_of_year: Option<u32>,
    pub status: ReviewStatus,
    pub next_service_advice: Option<String>,
    pub client_phone: Option<CanonicalPhone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An equipment or service failure with a priority and optional deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub description: String,
    pub date_of_service_visit: Option<NaiveDate>,
    pub priority: Priority,
    pub status: FailureStatus,
    pub service_comments: Option<String>,
    pub client_phone: Option<CanonicalPhone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Record {
    #[serde(rename = "review")]
    Review(Review),
    #[serde(rename = "failureReport")]
    FailureReport(FailureReport),
}

impl Record {
    /// Empty record of the given kind carrying only its description.
    pub fn new(kind: RecordKind, description: &str) -> Record {
        match kind {
            RecordKind::Review => Record::Review(Review {
                description: description.to_string(),
                ..Review::default()
            }),
            RecordKind::FailureReport => Record::FailureReport(FailureReport {
                description: description.to_string(),
                ..FailureReport::default()
            }),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Review(_) => RecordKind::Review,
            Record::FailureReport(_) => RecordKind::FailureReport,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Record::Review(r) => r.id,
            Record::FailureReport(r) => r.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Record::Review(r) => &r.description,
            Record::FailureReport(r) => &r.description,
        }
    }

    pub fn client_phone(&self) -> Option<&CanonicalPhone> {
        match self {
            Record::Review(r) => r.client_phone.as_ref(),
            Record::FailureReport(r) => r.client_phone.as_ref(),
        }
    }

    pub fn set_client_phone(&mut self, phone: CanonicalPhone) {
        match self {
            Record::Review(r) => r.client_phone = Some(phone),
            Record::FailureReport(r) => r.client_phone = Some(phone),
        }
    }

    /// Status label as stored, e.g. "scheduled" or "deadline".
    pub fn status(&self) -> &'static str {
        match self {
            Record::Review(r) => r.status.as_str(),
            Record::FailureReport(r) => r.status.as_str(),
        }
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        match self {
            Record::Review(r) => r.review_date,
            Record::FailureReport(r) => r.date_of_service_visit,
        }
    }

    pub(crate) fn assign_identity(&mut self, id: i64, created_at: DateTime<Utc>) {
        match self {
            Record::Review(r) => {
                r.id = Some(id);
                r.created_at = Some(created_at);
            }
            Record::FailureReport(r) => {
                r.id = Some(id);
                r.created_at = Some(created_at);
            }
        }
    }
}
