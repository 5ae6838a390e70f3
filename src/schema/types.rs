//! Schema type definitions
//!
//! A `TableSchema` names the columns of a table in ordinal order. Rows are
//! positional tuples, so the schema's only structural contract is its width.

use serde::{Deserialize, Serialize};

/// A single named column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (unique within a table)
    pub name: String,
}

impl Column {
    /// Creates a new column
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Positional table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Columns in ordinal order
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Creates a schema from column names, in ordinal order
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Column::new).collect(),
        }
    }

    /// Returns the number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns the ordinal of a column by name
    pub fn ordinal_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the column at the given ordinal
    pub fn column(&self, ordinal: usize) -> Option<&Column> {
        self.columns.get(ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_width() {
        let schema = TableSchema::new(["x", "y", "z"]);
        assert_eq!(schema.width(), 3);
    }

    #[test]
    fn test_ordinal_lookup() {
        let schema = TableSchema::new(["x", "y"]);
        assert_eq!(schema.ordinal_of("y"), Some(1));
        assert_eq!(schema.ordinal_of("missing"), None);
    }

    #[test]
    fn test_column_access() {
        let schema = TableSchema::new(["x"]);
        assert_eq!(schema.column(0).unwrap().name, "x");
        assert!(schema.column(1).is_none());
    }
}
