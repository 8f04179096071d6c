//! Positional parameter binding.
//!
//! Values bind one-to-one onto a statement's placeholders in list order,
//! using SQLite's 1-indexed positions. No conversion happens here beyond
//! what the driver accepts natively for each value's variant.

use rusqlite::types::Value;
use rusqlite::Statement;

use crate::error::StorageError;

/// Bind `params` positionally onto `stmt`'s placeholders.
///
/// An empty slice is a valid no-parameter bind. A placeholder/parameter
/// count mismatch (or a value the driver rejects) propagates as a driver
/// error.
pub fn bind(stmt: &mut Statement<'_>, params: &[Value]) -> Result<(), StorageError> {
    for (pos, value) in params.iter().enumerate() {
        stmt.raw_bind_parameter(pos + 1, value)?;
    }
    Ok(())
}
