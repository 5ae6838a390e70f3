//! Index catalog
//!
//! The catalog owns every index defined over a table and keeps them in
//! sync with base-table appends. Indexes are derived state: the table is
//! the source of truth, and a rebuild from the table reproduces the
//! catalog exactly.

use std::collections::BTreeMap;

use crate::observability::{Event, Logger, Severity};
use crate::storage::{Row, RowId, Table};

use super::errors::{IndexError, IndexResult};
use super::ordered::{IndexDef, OrderedIndex};

/// Catalog of indexes over one table
#[derive(Debug, Clone, Default)]
pub struct IndexCatalog {
    indexes: BTreeMap<String, OrderedIndex>,
}

impl IndexCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a new index.
    ///
    /// Fails if an index with the same name exists.
    pub fn create_index(&mut self, def: IndexDef) -> IndexResult<()> {
        if self.indexes.contains_key(&def.name) {
            return Err(IndexError::duplicate(&def.name));
        }
        Logger::log(
            Severity::Info,
            Event::IndexCreated.as_str(),
            &[("index", &def.name)],
        );
        self.indexes.insert(def.name.clone(), OrderedIndex::new(def));
        Ok(())
    }

    /// Resolves an index by name
    pub fn resolve(&self, name: &str) -> Option<&OrderedIndex> {
        self.indexes.get(name)
    }

    /// Returns the index names in deterministic order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.indexes.keys().map(String::as_str)
    }

    /// Returns the number of indexes
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns true if no indexes are defined
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Checks every unique constraint a row would have to satisfy.
    ///
    /// Callers that must not half-apply an insert (a table append plus
    /// index maintenance) check first, then apply.
    pub fn check_insert(&self, row: &Row) -> IndexResult<()> {
        for index in self.indexes.values() {
            if index.def().unique {
                if let Some(key) = index.key_for_row(row) {
                    if index.contains_key(&key) {
                        return Err(IndexError::unique_violation(index.name()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Applies a base-table append to every index.
    ///
    /// Unique constraints are checked across all indexes before any index
    /// is touched, so a rejected row leaves the catalog unchanged.
    pub fn apply_insert(&mut self, id: RowId, row: &Row) -> IndexResult<()> {
        self.check_insert(row)?;
        for index in self.indexes.values_mut() {
            index.insert_row(id, row)?;
        }
        Ok(())
    }

    /// Removes a row from every index
    pub fn apply_remove(&mut self, id: RowId, row: &Row) {
        for index in self.indexes.values_mut() {
            index.remove_row(id, row);
        }
    }

    /// Rebuilds every index from the table's current content.
    ///
    /// Deterministic: tables iterate in insertion order and chains sort by
    /// row id, so a rebuild always produces the same trees.
    pub fn rebuild(&mut self, table: &Table) -> IndexResult<()> {
        let defs: Vec<IndexDef> = self.indexes.values().map(|i| i.def().clone()).collect();
        self.indexes.clear();
        for def in defs {
            self.indexes.insert(def.name.clone(), OrderedIndex::new(def));
        }
        for (id, row) in table.iter() {
            self.apply_insert(id, row)?;
        }
        Logger::log(
            Severity::Info,
            Event::IndexRebuilt.as_str(),
            &[
                ("indexes", &self.indexes.len().to_string()),
                ("rows", &table.len().to_string()),
            ],
        );
        Ok(())
    }
}
