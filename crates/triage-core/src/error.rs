use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("failed to decode message batch: {0}")]
    BatchDecode(#[source] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load keyword rules from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid keyword rules: {0}")]
    RulesInvalid(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-message failures. These never abort a batch; the pipeline turns them
/// into `Outcome::Error` entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("empty description")]
    EmptyDescription,

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid phone '{0}'")]
    InvalidPhone(String),
}

impl MessageError {
    /// Short reason recorded in the batch error list.
    pub fn reason(&self) -> &'static str {
        match self {
            MessageError::EmptyDescription => "empty description",
            MessageError::InvalidDate(_) => "invalid date",
            MessageError::InvalidPhone(_) => "invalid phone",
        }
    }
}

/// Errors from the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("migration failed at version {version}: {reason}")]
    Migration { version: u32, reason: String },

    #[error("database lock poisoned")]
    LockPoisoned,

    #[error("invalid row {id} in '{table}': {reason}")]
    InvalidRow {
        table: &'static str,
        id: i64,
        reason: String,
    },
}
