//! Crate-level error type
//!
//! Unified error surface for callers driving the engine across module
//! boundaries. Module errors keep their own code spaces; this wrapper
//! only forwards them.

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::index::IndexError;
use crate::plan::PlanError;
use crate::storage::StorageError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Unified engine error
#[derive(Debug, Error)]
pub enum EngineError {
    /// Plan compilation or expression evaluation failure
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Index definition or maintenance failure
    #[error(transparent)]
    Index(#[from] IndexError),

    /// Scan execution failure
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Base-table failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl EngineError {
    /// Returns the stable string code of the underlying error
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Plan(err) => err.code().code(),
            EngineError::Index(err) => err.code().code(),
            EngineError::Executor(err) => err.code().code(),
            EngineError::Storage(err) => err.code().code(),
        }
    }
}
