//! Scan executor error types
//!
//! Error codes:
//! - ROWAN_SCAN_CONFIG (FATAL)
//! - ROWAN_SCAN_EVAL (ERROR)
//! - ROWAN_SCAN_RESOURCE (ERROR)

use std::fmt;

use crate::plan::PlanError;
use crate::storage::StorageError;

/// Severity levels for executor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The current execution failed but the executor stays usable
    Error,
    /// The compiled plan cannot run at all; never retried
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

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Plan shape is inconsistent with the target index or sink (FATAL)
    RowanScanConfig,
    /// Expression evaluation failed during key, predicate, or projection work
    RowanScanEval,
    /// An index or base-table operation failed mid-scan
    RowanScanResource,
}

impl ExecutorErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::RowanScanConfig => "ROWAN_SCAN_CONFIG",
            ExecutorErrorCode::RowanScanEval => "ROWAN_SCAN_EVAL",
            ExecutorErrorCode::RowanScanResource => "ROWAN_SCAN_RESOURCE",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            ExecutorErrorCode::RowanScanConfig => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone)]
pub struct ExecutorError {
    /// Error code
    code: ExecutorErrorCode,
    /// Human-readable message
    message: String,
}

impl ExecutorError {
    /// Create a configuration error (FATAL, raised at initialization)
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::RowanScanConfig,
            message: reason.into(),
        }
    }

    /// Create an evaluation error
    pub fn evaluation(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::RowanScanEval,
            message: reason.into(),
        }
    }

    /// Create a resource error
    pub fn resource(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::RowanScanResource,
            message: reason.into(),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExecutorErrorCode {
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

impl fmt::Display for ExecutorError {
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

impl std::error::Error for ExecutorError {}

impl From<PlanError> for ExecutorError {
    fn from(err: PlanError) -> Self {
        Self::evaluation(err.to_string())
    }
}

impl From<StorageError> for ExecutorError {
    fn from(err: StorageError) -> Self {
        Self::resource(err.to_string())
    }
}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
