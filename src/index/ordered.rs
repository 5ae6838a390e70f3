//! Ordered index structure
//!
//! An index maps composite keys to duplicate chains of row ids, stored in
//! a BTreeMap for deterministic key order. Chains are kept sorted by row
//! id, which reproduces insertion order for an append-only table.
//!
//! Positioning builds a half-open key window from the lookup type and the
//! active search-key prefix; the returned cursor walks that window in the
//! requested direction and never leaves it.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde_json::Value;

use crate::plan::{LookupType, SortDirection};
use crate::storage::{Row, RowId};

use super::cursor::{Direction, TreeCursor};
use super::errors::{IndexError, IndexResult};
use super::key::{CompositeKey, IndexKey};

/// Definition of one index over a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDef {
    /// Index name, unique within a catalog
    pub name: String,
    /// Table column ordinals forming the key, in key order
    pub columns: Vec<usize>,
    /// Whether duplicate keys are rejected
    pub unique: bool,
}

impl IndexDef {
    /// Creates a non-unique index definition
    pub fn new(name: impl Into<String>, columns: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: false,
        }
    }

    /// Creates a unique index definition
    pub fn unique(name: impl Into<String>, columns: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            columns,
            unique: true,
        }
    }
}

/// Ordered index over one table
#[derive(Debug, Clone)]
pub struct OrderedIndex {
    def: IndexDef,
    tree: BTreeMap<CompositeKey, Vec<RowId>>,
}

impl OrderedIndex {
    /// Creates an empty index
    pub fn new(def: IndexDef) -> Self {
        Self {
            def,
            tree: BTreeMap::new(),
        }
    }

    /// Returns the index definition
    pub fn def(&self) -> &IndexDef {
        &self.def
    }

    /// Returns the index name
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Returns the number of key columns
    pub fn key_width(&self) -> usize {
        self.def.columns.len()
    }

    /// Returns the table column ordinals forming the key
    pub fn key_columns(&self) -> &[usize] {
        &self.def.columns
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of indexed rows
    pub fn row_count(&self) -> usize {
        self.tree.values().map(|chain| chain.len()).sum()
    }

    /// Encodes the key of a row under this index's key columns.
    ///
    /// Returns `None` when any key column holds a value with no key
    /// encoding; such rows are not indexed.
    pub fn key_for_row(&self, row: &Row) -> Option<CompositeKey> {
        let values: Option<Vec<IndexKey>> = self
            .def
            .columns
            .iter()
            .map(|&ordinal| row.get(ordinal).and_then(IndexKey::from_value))
            .collect();
        values.map(CompositeKey::new)
    }

    /// Indexes a row.
    ///
    /// Rows without a key encoding are skipped. A unique index rejects a
    /// second row for an existing key.
    pub fn insert_row(&mut self, id: RowId, row: &Row) -> IndexResult<()> {
        let Some(key) = self.key_for_row(row) else {
            return Ok(());
        };
        let chain = self.tree.entry(key).or_default();
        if self.def.unique && !chain.is_empty() {
            return Err(IndexError::unique_violation(&self.def.name));
        }
        match chain.binary_search(&id) {
            Ok(_) => {}
            Err(pos) => chain.insert(pos, id),
        }
        Ok(())
    }

    /// Removes a row from the index, if present
    pub fn remove_row(&mut self, id: RowId, row: &Row) {
        let Some(key) = self.key_for_row(row) else {
            return;
        };
        if let Some(chain) = self.tree.get_mut(&key) {
            if let Ok(pos) = chain.binary_search(&id) {
                chain.remove(pos);
            }
            if chain.is_empty() {
                self.tree.remove(&key);
            }
        }
    }

    /// Returns true if a row with this exact key is indexed
    pub fn contains_key(&self, key: &CompositeKey) -> bool {
        self.tree.contains_key(key)
    }

    /// Positions a cursor for a lookup.
    ///
    /// `key` holds the active search-key values (a prefix of the key
    /// schema; possibly empty). With zero active values every lookup type
    /// degrades to a full traversal in direction order.
    pub fn position_for_lookup(
        &self,
        lookup: LookupType,
        key: &[Value],
        direction: SortDirection,
    ) -> IndexResult<TreeCursor<'_>> {
        if key.len() > self.key_width() {
            return Err(IndexError::key_width(self.key_width(), key.len()));
        }
        let travel = if direction.is_descending() {
            Direction::Reverse
        } else {
            Direction::Forward
        };

        if key.is_empty() {
            let full = (Bound::<CompositeKey>::Unbounded, Bound::Unbounded);
            return Ok(TreeCursor::new(self.tree.range::<CompositeKey, _>(full), travel, None));
        }

        let prefix: Vec<IndexKey> = key
            .iter()
            .enumerate()
            .map(|(slot, value)| {
                IndexKey::from_value(value).ok_or(IndexError::unindexable_key(slot))
            })
            .collect::<IndexResult<_>>()?;

        let start = CompositeKey::new(prefix.clone());
        let fence = CompositeKey::prefix_successor(&prefix);

        let (window, at_key) = match lookup {
            LookupType::Eq | LookupType::GeoContains => (
                (Bound::Included(start), Bound::Excluded(fence)),
                Some(prefix),
            ),
            LookupType::Gte => ((Bound::Included(start), Bound::Unbounded), None),
            LookupType::Gt => ((Bound::Included(fence), Bound::Unbounded), None),
            LookupType::Lt => ((Bound::Unbounded, Bound::Excluded(start)), None),
            LookupType::Lte => ((Bound::Unbounded, Bound::Excluded(fence)), None),
            LookupType::Scan => ((Bound::Unbounded, Bound::Unbounded), None),
        };

        Ok(TreeCursor::new(self.tree.range(window), travel, at_key))
    }
}
