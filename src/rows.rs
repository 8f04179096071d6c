//! Typed result extraction.
//!
//! A read declares one [`ColumnType`] per column it wants back; the mapper
//! drains the cursor and extracts each column as the declared type, in list
//! order. Rows come back in the cursor's natural iteration order.

use rusqlite::types::Value;
use rusqlite::Rows;

use crate::error::StorageError;

/// Runtime descriptor directing how a result column is extracted.
///
/// Extraction asks the driver for the column value as the declared type;
/// whatever coercion the driver refuses surfaces as a driver error. SQL NULL
/// extracts as [`Value::Null`] under any descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Real,
    /// UTF-8 text.
    Text,
    /// Raw bytes.
    Blob,
}

impl ColumnType {
    /// Extract column `idx` (0-indexed) of `row` as this type.
    fn extract(self, row: &rusqlite::Row<'_>, idx: usize) -> Result<Value, rusqlite::Error> {
        let value = match self {
            ColumnType::Integer => row
                .get::<_, Option<i64>>(idx)?
                .map_or(Value::Null, Value::Integer),
            ColumnType::Real => row
                .get::<_, Option<f64>>(idx)?
                .map_or(Value::Null, Value::Real),
            ColumnType::Text => row
                .get::<_, Option<String>>(idx)?
                .map_or(Value::Null, Value::Text),
            ColumnType::Blob => row
                .get::<_, Option<Vec<u8>>>(idx)?
                .map_or(Value::Null, Value::Blob),
        };
        Ok(value)
    }
}

/// One ordered, typed result of a read.
///
/// Column values positionally match the declared column types of the call
/// that produced the row. A row has no identity beyond its position in the
/// result sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<Value>,
}

impl Row {
    /// The column values, in declared order.
    pub fn columns(&self) -> &[Value] {
        &self.columns
    }

    /// Column value at `idx`, if present.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.columns.get(idx)
    }
}

/// Drain `rows` into a `Vec<Row>`, extracting one value per declared type.
///
/// Returns an empty vec (never an absent value) when the cursor yields no
/// rows. The caller guarantees `types` is non-empty.
pub fn map_rows(mut rows: Rows<'_>, types: &[ColumnType]) -> Result<Vec<Row>, StorageError> {
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut columns = Vec::with_capacity(types.len());
        for (idx, ty) in types.iter().enumerate() {
            columns.push(ty.extract(row, idx)?);
        }
        out.push(Row { columns });
    }
    Ok(out)
}
