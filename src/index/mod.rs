//! Ordered index subsystem for rowandb
//!
//! Indexes are derived, in-memory state over a base table: BTreeMap trees
//! of composite keys to duplicate chains of row ids. The scan executor
//! positions cursors over them; the catalog keeps them in sync with
//! base-table appends.
//!
//! # Design principles
//!
//! - Derived state: indexes mirror the table, never the source of truth
//! - Deterministic: BTreeMap key order, chains sorted by row id
//! - Cursors borrow; the index owns the structure
//!
//! # Invariants
//!
//! - Duplicate chains hold row ids in ascending (insertion) order
//! - Unique indexes never hold two rows for one key
//! - A cursor's window never widens after positioning

mod catalog;
mod cursor;
mod errors;
mod key;
mod ordered;

pub use catalog::IndexCatalog;
pub use cursor::{Direction, ScanCursor, TreeCursor};
pub use errors::{IndexError, IndexErrorCode, IndexResult};
pub use key::{CompositeKey, IndexKey};
pub use ordered::{IndexDef, OrderedIndex};
