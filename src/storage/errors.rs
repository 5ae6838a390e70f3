//! Storage error types
//!
//! Error codes:
//! - ROWAN_STORAGE_ARITY (ERROR)
//! - ROWAN_STORAGE_MISSING_ROW (FATAL)

use std::fmt;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation failed but the engine is healthy
    Error,
    /// In-memory state is inconsistent; the engine must halt
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Row width does not match the table schema
    RowanStorageArity,
    /// A row id resolved to no row
    RowanStorageMissingRow,
}

impl StorageErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::RowanStorageArity => "ROWAN_STORAGE_ARITY",
            StorageErrorCode::RowanStorageMissingRow => "ROWAN_STORAGE_MISSING_ROW",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::RowanStorageArity => Severity::Error,
            StorageErrorCode::RowanStorageMissingRow => Severity::Fatal,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error type with context
#[derive(Debug, Clone)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
}

impl StorageError {
    /// Create an arity mismatch error
    pub fn arity(expected: usize, actual: usize) -> Self {
        Self {
            code: StorageErrorCode::RowanStorageArity,
            message: format!("row has {actual} values, table schema has {expected} columns"),
        }
    }

    /// Create a missing-row error (FATAL)
    pub fn missing_row(row_id: u64) -> Self {
        Self {
            code: StorageErrorCode::RowanStorageMissingRow,
            message: format!("row id {row_id} resolves to no row"),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
