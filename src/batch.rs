//! Batch accumulation for deferred writes.
//!
//! SQLite has no deferred driver-level batch object, so the accumulator
//! retains the bound parameter lists itself; the facade replays them against
//! the cached statement when the batch is ready.

use std::mem;

use rusqlite::types::Value;

/// Pending-write state for one query name.
///
/// Collects parameter lists until the pending count reaches the batch size.
#[derive(Debug)]
pub struct BatchState {
    batch_size: usize,
    pending: Vec<Vec<Value>>,
}

impl BatchState {
    /// Create an empty batch with the given flush threshold.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            pending: Vec::with_capacity(batch_size),
        }
    }

    /// Add a parameter list to the batch.
    ///
    /// Returns true if the batch is now ready to flush.
    pub fn push(&mut self, params: Vec<Value>) -> bool {
        self.pending.push(params);
        self.is_ready()
    }

    /// Check if the batch has reached its flush threshold.
    pub fn is_ready(&self) -> bool {
        self.pending.len() >= self.batch_size
    }

    /// Drain the batch, returning all pending parameter lists and resetting
    /// the counter to zero.
    pub fn drain(&mut self) -> Vec<Vec<Value>> {
        mem::replace(&mut self.pending, Vec::with_capacity(self.batch_size))
    }

    /// Number of parameter lists currently pending.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
