//! Qstorage: a named-query execution layer over SQLite.
//!
//! Callers register SQL statements under symbolic names, then invoke them by
//! name for typed reads and optionally batched writes:
//!
//! ```
//! use qstorage::{ColumnType, QueryableStorage, Value};
//! use rusqlite::Connection;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), qstorage::StorageError> {
//! let conn = Connection::open_in_memory()?;
//! conn.execute_batch("CREATE TABLE users (userid TEXT, email TEXT)")?;
//!
//! let mut queries = HashMap::new();
//! queries.insert(
//!     "users.insert".to_string(),
//!     "INSERT INTO users VALUES (?1, ?2)".to_string(),
//! );
//! queries.insert(
//!     "users.select.all".to_string(),
//!     "SELECT userid, email FROM users".to_string(),
//! );
//!
//! let mut storage = QueryableStorage::create(&conn, queries)?;
//! storage.write(
//!     "users.insert",
//!     &[Value::Text("dylan".into()), Value::Text("dylan@example.com".into())],
//! )?;
//!
//! let rows = storage.read("users.select.all", &[ColumnType::Text, ColumnType::Text], &[])?;
//! assert_eq!(rows.len(), 1);
//! storage.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`batch`]: pending-write accumulation and flush thresholds
//! - [`error`]: the [`StorageError`] taxonomy
//! - [`queries`]: loading a query map from a JSON file
//! - [`registry`]: the validated name -> SQL mapping
//! - [`rows`]: typed result extraction
//! - [`storage`]: the [`QueryableStorage`] facade
//!
//! The storage assumes single-threaded, synchronous use of one connection;
//! operations take `&mut self`, so share nothing or use one instance per
//! thread.

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions, // storage::QueryableStorage is fine
    clippy::must_use_candidate,      // Not all functions need #[must_use]
    clippy::missing_errors_doc       // Error docs can be verbose
)]

pub mod batch;
pub mod error;
pub mod params;
pub mod queries;
pub mod registry;
pub mod rows;
pub mod statement;
pub mod storage;

pub use error::StorageError;
pub use rows::{ColumnType, Row};
pub use storage::QueryableStorage;

// The driver's tagged dynamic value doubles as parameter and column value.
pub use rusqlite::types::Value;
