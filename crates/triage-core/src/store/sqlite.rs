//! SQLite-backed record store.
//!
//! Uses rusqlite with a thread-safe handle; all access is serialized through
//! a `Mutex<Connection>`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use super::{migrations, RecordStore};
use crate::error::StoreError;
use crate::model::{
    CanonicalPhone, FailureReport, FailureStatus, Priority, Record, RecordKind, Review,
    ReviewStatus,
};

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at the given path and runs all
    /// pending migrations.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        migrations::run_all(&conn)?;

        tracing::info!(path = %path.display(), "record store opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database. Runs all migrations.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Provides locked access to the underlying connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError>,
    {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        f(&conn)
    }
}

fn table(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Review => "review",
        RecordKind::FailureReport => "failure_report",
    }
}

fn insert(conn: &Connection, record: &Record, created_at: DateTime<Utc>) -> Result<i64, StoreError> {
    match record {
        Record::Review(r) => {
            conn.execute(
                "INSERT INTO review (description, type, review_date, week_of_year, status,
                                     next_service_advice, client_phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    r.description,
                    RecordKind::Review.type_name(),
                    r.review_date,
                    r.week_of_year,
                    r.status.as_str(),
                    r.next_service_advice,
                    r.client_phone.as_ref().map(CanonicalPhone::as_str),
                    created_at,
                ],
            )?;
        }
        Record::FailureReport(r) => {
            conn.execute(
                "INSERT INTO failure_report (description, type, date_of_service_visit, priority,
                                             status, service_comments, client_phone, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    r.description,
                    RecordKind::FailureReport.type_name(),
                    r.date_of_service_visit,
                    r.priority.as_str(),
                    r.status.as_str(),
                    r.service_comments,
                    r.client_phone.as_ref().map(CanonicalPhone::as_str),
                    created_at,
                ],
            )?;
        }
    }
    Ok(conn.last_insert_rowid())
}

/// A raw review row from the database.
struct ReviewRow {
    id: i64,
    description: String,
    review_date: Option<NaiveDate>,
    week_of_year: Option<u32>,
    status: String,
    next_service_advice: Option<String>,
    client_phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReviewRow {
    fn into_record(self) -> Result<Record, StoreError> {
        let status = self
            .status
            .parse::<ReviewStatus>()
            .map_err(|reason| StoreError::InvalidRow {
                table: "review",
                id: self.id,
                reason,
            })?;
        Ok(Record::Review(Review {
            id: Some(self.id),
            description: self.description,
            review_date: self.review_date,
            week_of_year: self.week_of_year,
            status,
            next_service_advice: self.next_service_advice,
            client_phone: self.client_phone.map(CanonicalPhone::new),
            created_at: Some(self.created_at),
        }))
    }
}

/// A raw failure report row from the database.
struct FailureReportRow {
    id: i64,
    description: String,
    date_of_service_visit: Option<NaiveDate>,
    priority: String,
    status: String,
    service_comments: Option<String>,
    client_phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl FailureReportRow {
    fn into_record(self) -> Result<Record, StoreError> {
        let id = self.id;
        let invalid = move |reason: String| StoreError::InvalidRow {
            table: "failure_report",
            id,
            reason,
        };
        let priority = self.priority.parse::<Priority>().map_err(invalid)?;
        let status = self.status.parse::<FailureStatus>().map_err(invalid)?;
        Ok(Record::FailureReport(FailureReport {
            id: Some(self.id),
            description: self.description,
            date_of_service_visit: self.date_of_service_visit,
            priority,
            status,
            service_comments: self.service_comments,
            client_phone: self.client_phone.map(CanonicalPhone::new),
            created_at: Some(self.created_at),
        }))
    }
}

impl RecordStore for SqliteStore {
    fn exists(&self, kind: RecordKind, description: &str) -> Result<bool, StoreError> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE description = ?1)",
                table(kind)
            );
            let found: bool = conn.query_row(&sql, params![description], |r| r.get(0))?;
            Ok(found)
        })
    }

    fn save_all(&mut self, records: Vec<Record>) -> Result<Vec<Record>, StoreError> {
        if records.is_empty() {
            return Ok(records);
        }

        self.with_conn(|conn| {
            let created_at = Utc::now();
            // Dropping the transaction on an early return rolls it back.
            let tx = conn.unchecked_transaction()?;
            let mut saved = Vec::with_capacity(records.len());
            for mut record in records {
                let id = insert(&tx, &record, created_at)?;
                record.assign_identity(id, created_at);
                saved.push(record);
            }
            tx.commit()?;
            tracing::info!(count = saved.len(), "committed records");
            Ok(saved)
        })
    }

    fn load_all(&self, kind: RecordKind) -> Result<Vec<Record>, StoreError> {
        self.with_conn(|conn| match kind {
            RecordKind::Review => {
                let mut stmt = conn.prepare(
                    "SELECT id, description, review_date, week_of_year, status,
                            next_service_advice, client_phone, created_at
                     FROM review ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok(ReviewRow {
                            id: row.get(0)?,
                            description: row.get(1)?,
                            review_date: row.get(2)?,
                            week_of_year: row.get(3)?,
                            status: row.get(4)?,
                            next_service_advice: row.get(5)?,
                            client_phone: row.get(6)?,
                            created_at: row.get(7)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows.into_iter().map(ReviewRow::into_record).collect()
            }
            RecordKind::FailureReport => {
                let mut stmt = conn.prepare(
                    "SELECT id, description, date_of_service_visit, priority, status,
                            service_comments, client_phone, created_at
                     FROM failure_report ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([], |row| {
                        Ok(FailureReportRow {
                            id: row.get(0)?,
                            description: row.get(1)?,
                            date_of_service_visit: row.get(2)?,
                            priority: row.get(3)?,
                            status: row.get(4)?,
                            service_comments: row.get(5)?,
                            client_phone: row.get(6)?,
                            created_at: row.get(7)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                rows.into_iter().map(FailureReportRow::into_record).collect()
            }
        })
    }

    fn backend_name(&self) -> &str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(description: &str) -> Record {
        let mut record = Record::new(RecordKind::Review, description);
        if let Record::Review(r) = &mut record {
            r.review_date = NaiveDate::from_ymd_opt(2020, 3, 2);
            r.week_of_year = Some(10);
            r.status = ReviewStatus::Scheduled;
        }
        record.set_client_phone(CanonicalPhone::new("+48505167301".into()));
        record
    }

    fn failure(description: &str, priority: Priority) -> Record {
        let mut record = Record::new(RecordKind::FailureReport, description);
        if let Record::FailureReport(r) = &mut record {
            r.priority = priority;
        }
        record
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let saved = store
            .save_all(vec![review("przegląd"), failure("awaria", Priority::Critical)])
            .unwrap();
        assert!(saved.iter().all(|r| r.id().is_some()));

        let reviews = store.load_all(RecordKind::Review).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id(), saved[0].id());
        match &reviews[0] {
            Record::Review(r) => {
                assert_eq!(r.description, "przegląd");
                assert_eq!(r.review_date, NaiveDate::from_ymd_opt(2020, 3, 2));
                assert_eq!(r.week_of_year, Some(10));
                assert_eq!(r.status, ReviewStatus::Scheduled);
                assert_eq!(
                    r.client_phone.as_ref().map(CanonicalPhone::as_str),
                    Some("+48505167301")
                );
            }
            other => panic!("expected review, got {other:?}"),
        }

        let failures = store.load_all(RecordKind::FailureReport).unwrap();
        match &failures[0] {
            Record::FailureReport(r) => {
                assert_eq!(r.priority, Priority::Critical);
                assert_eq!(r.status, FailureStatus::New);
                assert!(r.created_at.is_some());
            }
            other => panic!("expected failure report, got {other:?}"),
        }
    }

    #[test]
    fn test_exists_exact_and_scoped() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.save_all(vec![review("Przegląd maty")]).unwrap();
        assert!(store.exists(RecordKind::Review, "Przegląd maty").unwrap());
        assert!(!store.exists(RecordKind::Review, "przegląd maty").unwrap());
        assert!(!store.exists(RecordKind::Review, "Przegląd maty ").unwrap());
        assert!(!store.exists(RecordKind::FailureReport, "Przegląd maty").unwrap());
    }

    #[test]
    fn test_save_empty_is_noop() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(store.save_all(Vec::new()).unwrap().is_empty());
        assert!(store.load_all(RecordKind::Review).unwrap().is_empty());
    }

    #[test]
    fn test_open_file_db_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("triage.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.save_all(vec![failure("awaria", Priority::High)]).unwrap();
        }
        assert!(path.exists());
        let store = SqliteStore::open(&path).unwrap();
        assert!(store.exists(RecordKind::FailureReport, "awaria").unwrap());
    }

    #[test]
    fn test_corrupt_status_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .with_conn(|conn| {
                conn.execute(
                    "INSERT INTO review (description, status, created_at)
                     VALUES ('x', 'archived', '2024-01-13 15:30:51+00:00')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();
        let err = store.load_all(RecordKind::Review).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRow { table: "review", .. }));
    }
}
