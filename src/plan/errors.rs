//! Plan error types
//!
//! Error codes:
//! - ROWAN_PLAN_PARAMETER (ERROR)
//! - ROWAN_PLAN_COLUMN (ERROR)

use std::fmt;

/// Plan-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanErrorCode {
    /// An expression referenced a parameter with no binding
    RowanPlanParameter,
    /// An expression referenced a column outside the row
    RowanPlanColumn,
}

impl PlanErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            PlanErrorCode::RowanPlanParameter => "ROWAN_PLAN_PARAMETER",
            PlanErrorCode::RowanPlanColumn => "ROWAN_PLAN_COLUMN",
        }
    }
}

impl fmt::Display for PlanErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Plan error type with context
#[derive(Debug, Clone)]
pub struct PlanError {
    code: PlanErrorCode,
    message: String,
}

impl PlanError {
    /// Create an unbound-parameter error
    pub fn unbound_parameter(index: usize) -> Self {
        Self {
            code: PlanErrorCode::RowanPlanParameter,
            message: format!("parameter {index} has no binding"),
        }
    }

    /// Create a column-out-of-range error
    pub fn column_out_of_range(ordinal: usize) -> Self {
        Self {
            code: PlanErrorCode::RowanPlanColumn,
            message: format!("column {ordinal} is not in scope"),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> PlanErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for PlanError {}

/// Result type for plan operations
pub type PlanResult<T> = Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PlanError::unbound_parameter(2).code().code(),
            "ROWAN_PLAN_PARAMETER"
        );
        assert_eq!(
            PlanError::column_out_of_range(5).code().code(),
            "ROWAN_PLAN_COLUMN"
        );
    }

    #[test]
    fn test_display_carries_context() {
        let display = format!("{}", PlanError::unbound_parameter(2));
        assert!(display.contains("parameter 2"));
    }
}
