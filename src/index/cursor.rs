//! Index cursors
//!
//! A cursor is transient per-execution iteration state: positioned once by
//! the index, advanced monotonically, and dropped when the scan ends. It
//! borrows a view into the index tree; the index owns the structure.

use std::collections::btree_map;

use crate::storage::RowId;

use super::key::{CompositeKey, IndexKey};

/// Iteration interface consumed by the scan executor.
///
/// `next_at_key` serves equality lookups: it yields the duplicate chain of
/// the positioned key and nothing else. `next` yields rows in index order
/// with no key constraint. `skip` advances past rows by rank without
/// surfacing them.
pub trait ScanCursor {
    /// Next row in the positioned key's duplicate chain, if any.
    ///
    /// Returns `None` once the chain is exhausted, and always `None` for
    /// cursors positioned without an equality key.
    fn next_at_key(&mut self) -> Option<RowId>;

    /// Next row in index order within the cursor's window
    fn next(&mut self) -> Option<RowId>;

    /// Advances past up to `count` rows, returning how many were skipped
    fn skip(&mut self, count: usize) -> usize;
}

/// Direction of cursor travel over the key window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Cursor over an ordered index tree.
///
/// The window (key range) is fixed at positioning time; the cursor only
/// moves forward through it. Duplicate chains are yielded in row-id order
/// regardless of travel direction, preserving insertion order within a key.
#[derive(Debug)]
pub struct TreeCursor<'a> {
    entries: btree_map::Range<'a, CompositeKey, Vec<RowId>>,
    direction: Direction,
    /// Equality prefix for `next_at_key`, when positioned by one
    at_key: Option<Vec<IndexKey>>,
    current: Option<(&'a CompositeKey, &'a [RowId])>,
    chain_pos: usize,
}

impl<'a> TreeCursor<'a> {
    pub(super) fn new(
        entries: btree_map::Range<'a, CompositeKey, Vec<RowId>>,
        direction: Direction,
        at_key: Option<Vec<IndexKey>>,
    ) -> Self {
        Self {
            entries,
            direction,
            at_key,
            current: None,
            chain_pos: 0,
        }
    }

    /// Moves to the next key entry in travel direction
    fn advance_entry(&mut self) -> bool {
        let next = match self.direction {
            Direction::Forward => self.entries.next(),
            Direction::Reverse => self.entries.next_back(),
        };
        match next {
            Some((key, chain)) => {
                self.current = Some((key, chain.as_slice()));
                self.chain_pos = 0;
                true
            }
            None => {
                self.current = None;
                false
            }
        }
    }

    /// Yields the next row id in window order
    fn step(&mut self) -> Option<RowId> {
        loop {
            if let Some((_, chain)) = self.current {
                if self.chain_pos < chain.len() {
                    let id = chain[self.chain_pos];
                    self.chain_pos += 1;
                    return Some(id);
                }
            }
            if !self.advance_entry() {
                return None;
            }
        }
    }
}

impl ScanCursor for TreeCursor<'_> {
    fn next_at_key(&mut self) -> Option<RowId> {
        self.at_key.as_ref()?;
        loop {
            match self.current {
                Some((key, chain)) => {
                    let prefix = self.at_key.as_deref().unwrap_or(&[]);
                    if !key.starts_with(prefix) {
                        return None;
                    }
                    if self.chain_pos < chain.len() {
                        let id = chain[self.chain_pos];
                        self.chain_pos += 1;
                        return Some(id);
                    }
                    if !self.advance_entry() {
                        return None;
                    }
                }
                None => {
                    if !self.advance_entry() {
                        return None;
                    }
                }
            }
        }
    }

    fn next(&mut self) -> Option<RowId> {
        self.step()
    }

    fn skip(&mut self, count: usize) -> usize {
        let mut skipped = 0;
        while skipped < count {
            if self.step().is_none() {
                break;
            }
            skipped += 1;
        }
        skipped
    }
}
