//! Error type for storage operations.
//!
//! Validation failures carry fixed literal messages that callers may match
//! exactly; driver failures pass through the underlying `rusqlite::Error`
//! unmodified.

use thiserror::Error;

/// Error type for query-storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A caller-supplied argument failed validation before any driver
    /// interaction. The message is one of a fixed set of literals:
    /// `"Invalid connection"`, `"Invalid queries"`, `"Invalid query name"`,
    /// `"Invalid column types"`.
    #[error("{0}")]
    InvalidInput(&'static str),

    /// The requested query name has no registered SQL.
    #[error("Query {0} not found")]
    QueryNotFound(String),

    /// Failure from the underlying connection or statement (prepare, bind,
    /// execute, fetch). Not retried, not swallowed.
    #[error("Database error: {0}")]
    Driver(#[from] rusqlite::Error),

    /// One or more cached statements failed to finalize during close.
    /// Every handle is attempted before this is reported.
    #[error("Failed to release {} cached statements", .0.len())]
    Close(Vec<rusqlite::Error>),

    /// A query file could not be read from disk.
    #[error("Failed to read query file: {0}")]
    Io(#[from] std::io::Error),

    /// A query file could not be parsed as a flat JSON object.
    #[error("Failed to load queries: {0}")]
    Load(#[from] serde_json::Error),
}
