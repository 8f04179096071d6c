//! Per-name prepared statement cache.
//!
//! One statement is prepared per distinct query name on first use and reused
//! for every later call with that name. Handles live exactly as long as the
//! owning storage instance and are finalized on close.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rusqlite::{Connection, Statement};

use crate::error::StorageError;

/// Lazily-populated cache of prepared statements, keyed by query name.
///
/// The cache borrows the connection; the caller keeps ownership of it for
/// the whole life of the storage instance.
pub struct StatementCache<'conn> {
    conn: &'conn Connection,
    stmts: HashMap<String, Statement<'conn>>,
}

impl<'conn> StatementCache<'conn> {
    /// Create an empty cache over the given connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            stmts: HashMap::new(),
        }
    }

    /// Return the cached statement for `name`, preparing `sql` on first use.
    ///
    /// # Errors
    ///
    /// Preparation failures propagate as a driver error and are not retried.
    pub fn get(&mut self, name: &str, sql: &str) -> Result<&mut Statement<'conn>, StorageError> {
        match self.stmts.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let stmt = self.conn.prepare(sql)?;
                tracing::debug!(query = name, "prepared statement cached");
                Ok(entry.insert(stmt))
            }
        }
    }

    /// Finalize every cached statement.
    ///
    /// Each handle is attempted independently; failures are collected and
    /// reported together once all handles have been attempted.
    pub fn close_all(&mut self) -> Result<(), StorageError> {
        let mut failures = Vec::new();
        for (name, stmt) in self.stmts.drain() {
            if let Err(err) = stmt.finalize() {
                tracing::warn!(query = %name, error = %err, "failed to finalize statement");
                failures.push(err);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(StorageError::Close(failures))
        }
    }

    /// Number of statements currently cached.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// Whether the cache holds no statements.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl std::fmt::Debug for StatementCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementCache")
            .field("cached", &self.stmts.len())
            .finish()
    }
}
