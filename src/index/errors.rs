//! Index error types
//!
//! Error codes:
//! - ROWAN_INDEX_DUPLICATE (ERROR)
//! - ROWAN_INDEX_UNIQUE (ERROR)
//! - ROWAN_INDEX_KEY_UNINDEXABLE (ERROR)
//! - ROWAN_INDEX_KEY_WIDTH (ERROR)

use std::fmt;

/// Index-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexErrorCode {
    /// An index with the same name already exists
    RowanIndexDuplicate,
    /// A unique index rejected a duplicate key
    RowanIndexUnique,
    /// A key value cannot be encoded as an index key part
    RowanIndexKeyUnindexable,
    /// A key has more parts than the index key schema
    RowanIndexKeyWidth,
}

impl IndexErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            IndexErrorCode::RowanIndexDuplicate => "ROWAN_INDEX_DUPLICATE",
            IndexErrorCode::RowanIndexUnique => "ROWAN_INDEX_UNIQUE",
            IndexErrorCode::RowanIndexKeyUnindexable => "ROWAN_INDEX_KEY_UNINDEXABLE",
            IndexErrorCode::RowanIndexKeyWidth => "ROWAN_INDEX_KEY_WIDTH",
        }
    }
}

impl fmt::Display for IndexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Index error type with context
#[derive(Debug, Clone)]
pub struct IndexError {
    code: IndexErrorCode,
    message: String,
}

impl IndexError {
    /// Create a duplicate-index-name error
    pub fn duplicate(name: &str) -> Self {
        Self {
            code: IndexErrorCode::RowanIndexDuplicate,
            message: format!("index {name} already exists"),
        }
    }

    /// Create a unique-violation error
    pub fn unique_violation(name: &str) -> Self {
        Self {
            code: IndexErrorCode::RowanIndexUnique,
            message: format!("unique index {name} rejected a duplicate key"),
        }
    }

    /// Create an unindexable-key-value error
    pub fn unindexable_key(slot: usize) -> Self {
        Self {
            code: IndexErrorCode::RowanIndexKeyUnindexable,
            message: format!("search key slot {slot} holds a value with no key encoding"),
        }
    }

    /// Create a key-width error
    pub fn key_width(width: usize, active: usize) -> Self {
        Self {
            code: IndexErrorCode::RowanIndexKeyWidth,
            message: format!("{active} active key parts against a {width}-column key schema"),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> IndexErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for IndexError {}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
