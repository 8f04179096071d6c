//! Registry of named queries.
//!
//! Holds the immutable name -> SQL mapping, validated once at construction.
//! SQL text is opaque here; it is passed verbatim to the driver.

use std::collections::HashMap;

use crate::error::StorageError;

/// Immutable mapping from query name to SQL text.
///
/// Lookups are exact-string and case-sensitive.
#[derive(Debug)]
pub struct QueryRegistry {
    queries: HashMap<String, String>,
}

impl QueryRegistry {
    /// Build a registry from a name -> SQL map.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput("Invalid queries")` if the map is empty.
    pub fn new(queries: HashMap<String, String>) -> Result<Self, StorageError> {
        if queries.is_empty() {
            return Err(StorageError::InvalidInput("Invalid queries"));
        }
        Ok(Self { queries })
    }

    /// Resolve a query name to its SQL text.
    ///
    /// # Errors
    ///
    /// Returns `QueryNotFound` if the name is not registered.
    pub fn resolve(&self, name: &str) -> Result<&str, StorageError> {
        self.queries
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| StorageError::QueryNotFound(name.to_string()))
    }

    /// Number of registered queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether the registry has no queries. Always false for a constructed
    /// registry, kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
