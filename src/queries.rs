//! Loading a query map from a configuration file.
//!
//! The map is a flat JSON object of name -> SQL pairs:
//!
//! ```json
//! {
//!   "users.select.all": "SELECT userid, password, email FROM users",
//!   "users.insert": "INSERT INTO users VALUES (?1, ?2, ?3)"
//! }
//! ```
//!
//! Loading performs no SQL validation; an empty object loads fine here and
//! is rejected when the storage is created.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::StorageError;

/// Parse a query map from a JSON string.
pub fn from_json_str(json: &str) -> Result<HashMap<String, String>, StorageError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a query map from a JSON file.
pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>, StorageError> {
    let contents = fs::read_to_string(path)?;
    from_json_str(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parses_flat_object() {
        let map = from_json_str(r#"{"a": "SELECT 1", "b": "SELECT 2"}"#).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "SELECT 1");
    }

    #[test]
    fn test_empty_object_loads_as_empty_map() {
        let map = from_json_str("{}").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let err = from_json_str(r#"["not", "a", "map"]"#).unwrap_err();
        assert!(matches!(err, StorageError::Load(_)));
    }

    #[test]
    fn test_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"q": "SELECT 1"}}"#).unwrap();

        let map = from_json_file(file.path()).unwrap();
        assert_eq!(map["q"], "SELECT 1");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = from_json_file("/no/such/file.json").unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
