//! Queryable storage facade.
//!
//! Composes the query registry, the per-name statement cache, and the
//! per-name batch states behind a small read/write API.

use std::collections::HashMap;

use rusqlite::types::Value;
use rusqlite::Connection;

use crate::batch::BatchState;
use crate::error::StorageError;
use crate::params;
use crate::registry::QueryRegistry;
use crate::rows::{self, ColumnType, Row};
use crate::statement::StatementCache;

/// Named-query execution over a caller-supplied SQLite connection.
///
/// The storage borrows the connection for its whole lifetime and keeps one
/// prepared statement per distinct query name it has executed. Operations
/// take `&mut self`, so a storage instance cannot be driven from two places
/// at once; use one instance per thread if concurrent access is needed.
///
/// All operations block on the underlying connection. There is no internal
/// retry, timeout, or scheduling; timeouts are whatever the driver enforces.
pub struct QueryableStorage<'conn> {
    registry: QueryRegistry,
    stmts: StatementCache<'conn>,
    batches: HashMap<String, BatchState>,
}

impl<'conn> QueryableStorage<'conn> {
    /// Create a storage instance over an open connection and a non-empty
    /// name -> SQL map. No statements are prepared yet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput("Invalid connection")` if the connection handle
    /// is unusable, and `InvalidInput("Invalid queries")` if the map is
    /// empty.
    pub fn create(
        conn: &'conn Connection,
        queries: HashMap<String, String>,
    ) -> Result<Self, StorageError> {
        // Cheap probe: a handle the library cannot execute against is
        // rejected up front with the same message for every cause.
        if conn.execute_batch("").is_err() {
            return Err(StorageError::InvalidInput("Invalid connection"));
        }
        let registry = QueryRegistry::new(queries)?;
        Ok(Self {
            registry,
            stmts: StatementCache::new(conn),
            batches: HashMap::new(),
        })
    }

    /// Execute the named query and map the result to typed rows.
    ///
    /// `types` declares one [`ColumnType`] per column to extract, in column
    /// order. `params` bind positionally in list order; pass an empty slice
    /// for a no-parameter query. Returns the rows in cursor order, empty
    /// when the query matches nothing.
    ///
    /// # Errors
    ///
    /// `InvalidInput("Invalid query name")` for an empty name,
    /// `InvalidInput("Invalid column types")` for an empty type list,
    /// `QueryNotFound` for an unregistered name, and driver errors from
    /// prepare, bind, or fetch.
    pub fn read(
        &mut self,
        name: &str,
        types: &[ColumnType],
        params: &[Value],
    ) -> Result<Vec<Row>, StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidInput("Invalid query name"));
        }
        if types.is_empty() {
            return Err(StorageError::InvalidInput("Invalid column types"));
        }
        let sql = self.registry.resolve(name)?;
        let stmt = self.stmts.get(name, sql)?;
        params::bind(stmt, params)?;
        let result = rows::map_rows(stmt.raw_query(), types)?;
        tracing::debug!(query = name, rows = result.len(), "read executed");
        Ok(result)
    }

    /// Execute the named write immediately and return the affected-row
    /// count. Equivalent to [`write_batched`](Self::write_batched) with a
    /// batch size of 1.
    pub fn write(&mut self, name: &str, params: &[Value]) -> Result<usize, StorageError> {
        self.write_batched(name, params, 1)
    }

    /// Execute or batch the named write.
    ///
    /// With `batch_size <= 1` the write executes immediately and returns the
    /// driver-reported affected-row count. With `batch_size > 1` the
    /// parameters join the pending batch for `name`; the call returns 0
    /// until the pending count reaches `batch_size`, at which point the
    /// whole batch executes and the call returns the summed affected-row
    /// count, resetting the counter.
    ///
    /// Callers must pass a consistent `batch_size` for a given name within
    /// a session; mixing batched and unbatched calls on one name, or
    /// changing the size mid-session, is unsupported (the first batched
    /// call fixes the threshold for that name).
    ///
    /// # Errors
    ///
    /// `InvalidInput("Invalid query name")` for an empty name,
    /// `QueryNotFound` for an unregistered name, and driver errors from
    /// prepare, bind, or execute. A driver failure mid-flush aborts the
    /// flush at that point.
    pub fn write_batched(
        &mut self,
        name: &str,
        params: &[Value],
        batch_size: usize,
    ) -> Result<usize, StorageError> {
        if name.is_empty() {
            return Err(StorageError::InvalidInput("Invalid query name"));
        }
        let sql = self.registry.resolve(name)?;
        let stmt = self.stmts.get(name, sql)?;

        if batch_size <= 1 {
            params::bind(stmt, params)?;
            let affected = stmt.raw_execute()?;
            tracing::debug!(query = name, affected, "write executed");
            return Ok(affected);
        }

        let state = self
            .batches
            .entry(name.to_string())
            .or_insert_with(|| BatchState::new(batch_size));
        if !state.push(params.to_vec()) {
            return Ok(0);
        }

        let pending = state.drain();
        let mut affected = 0;
        for entry in &pending {
            params::bind(stmt, entry)?;
            affected += stmt.raw_execute()?;
        }
        tracing::debug!(query = name, statements = pending.len(), affected, "batch flushed");
        Ok(affected)
    }

    /// Number of parameter lists pending in the batch for `name`.
    pub fn pending_writes(&self, name: &str) -> usize {
        self.batches.get(name).map_or(0, BatchState::pending_count)
    }

    /// Number of distinct query names with a cached prepared statement.
    pub fn cached_statements(&self) -> usize {
        self.stmts.len()
    }

    /// Release every cached statement handle.
    ///
    /// Each handle is finalized independently; failures are collected and
    /// reported after all handles have been attempted. Pending batched
    /// writes that never reached their threshold are discarded, not
    /// flushed. Dropping the storage without calling `close` finalizes the
    /// handles too, discarding any finalize errors.
    pub fn close(mut self) -> Result<(), StorageError> {
        self.stmts.close_all()
    }
}

impl std::fmt::Debug for QueryableStorage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryableStorage")
            .field("queries", &self.registry.len())
            .field("cached_statements", &self.stmts.len())
            .field("batched_names", &self.batches.len())
            .finish()
    }
}
