//! In-memory base table
//!
//! A table is an append-only sequence of positional rows. Row ids are
//! assigned in insertion order and never reused, so index duplicate chains
//! sorted by row id reproduce insertion order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::TableSchema;

use super::errors::{StorageError, StorageResult};

/// Stable handle to a row within one table
pub type RowId = u64;

/// A positional tuple of column values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    /// Creates a row from column values in ordinal order
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Returns the value at the given column ordinal
    pub fn get(&self, ordinal: usize) -> Option<&Value> {
        self.values.get(ordinal)
    }

    /// Returns the number of values
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// Returns all values in ordinal order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consumes the row, returning its values
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// In-memory append-only table
#[derive(Debug, Clone)]
pub struct Table {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given schema
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Returns the table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Appends a row, returning its id.
    ///
    /// Fails if the row width does not match the schema width.
    pub fn insert(&mut self, row: Row) -> StorageResult<RowId> {
        if row.width() != self.schema.width() {
            return Err(StorageError::arity(self.schema.width(), row.width()));
        }
        let id = self.rows.len() as RowId;
        self.rows.push(row);
        Ok(id)
    }

    /// Returns the row with the given id
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.rows.get(id as usize)
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows with their ids, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &Row)> {
        self.rows.iter().enumerate().map(|(i, r)| (i as RowId, r))
    }
}
