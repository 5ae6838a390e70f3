//! Scalar expressions
//!
//! Expressions are evaluated against the current parameter bindings and,
//! where one is in scope, the current row. Search-key and end-key
//! construction evaluates with no row; predicates and projections evaluate
//! with the candidate row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::storage::Row;

use super::errors::{PlanError, PlanResult};

/// A scalar expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A constant value
    Literal(Value),
    /// A statement parameter, by binding position
    Parameter(usize),
    /// A column of the row in scope, by ordinal
    Column(usize),
}

impl Expression {
    /// Creates a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// Creates a parameter reference
    pub fn parameter(index: usize) -> Self {
        Expression::Parameter(index)
    }

    /// Creates a column reference
    pub fn column(ordinal: usize) -> Self {
        Expression::Column(ordinal)
    }

    /// Evaluates the expression.
    ///
    /// `row` is the row in scope, if any; key construction passes `None`.
    /// Unbound parameters and out-of-scope columns are evaluation errors.
    pub fn evaluate(&self, params: &[Value], row: Option<&Row>) -> PlanResult<Value> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Parameter(index) => params
                .get(*index)
                .cloned()
                .ok_or_else(|| PlanError::unbound_parameter(*index)),
            Expression::Column(ordinal) => row
                .and_then(|r| r.get(*ordinal))
                .cloned()
                .ok_or_else(|| PlanError::column_out_of_range(*ordinal)),
        }
    }
}
