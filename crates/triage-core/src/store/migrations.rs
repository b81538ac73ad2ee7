//! Versioned schema migrations.
//!
//! Applied migrations are tracked in a `_migrations` table; pending ones run
//! in order, each inside its own transaction.

use rusqlite::Connection;

use crate::error::StoreError;

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

/// All migrations in order. Each is applied at most once.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create_review_table",
        sql: include_str!("sql/001_create_review.sql"),
    },
    Migration {
        version: 2,
        description: "create_failure_report_table",
        sql: include_str!("sql/002_create_failure_report.sql"),
    },
    Migration {
        version: 3,
        description: "index_descriptions",
        sql: include_str!("sql/003_index_descriptions.sql"),
    },
];

/// Runs all pending migrations on the given connection.
pub fn run_all(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )?;

    let current_version: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM _migrations",
        [],
        |r| r.get(0),
    )?;

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)
            .map_err(|e| StoreError::Migration {
                version: migration.version,
                reason: e.to_string(),
            })?;
        tx.execute(
            "INSERT INTO _migrations (version, description) VALUES (?1, ?2)",
            rusqlite::params![migration.version, migration.description],
        )?;
        tx.commit()?;

        tracing::debug!(
            version = migration.version,
            description = migration.description,
            "applied migration"
        );
    }

    Ok(())
}

/// Highest migration version known to this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}
