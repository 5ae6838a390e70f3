//! Residual predicate filtering
//!
//! Rows are filtered strictly: no type coercion, exact comparisons only.
//! Numbers compare with numbers, strings with strings; a missing column or
//! a null value never matches.

use serde_json::Value;

use crate::plan::{FilterOp, Predicate};
use crate::storage::Row;

use super::errors::ExecutorResult;

/// Evaluates residual predicates against candidate rows
pub struct RowFilter;

impl RowFilter {
    /// Checks if a row matches all predicates (AND semantics).
    ///
    /// Comparison values are expressions evaluated against the parameter
    /// bindings; evaluation failure aborts the execution.
    pub fn matches(row: &Row, predicates: &[Predicate], params: &[Value]) -> ExecutorResult<bool> {
        for predicate in predicates {
            if !Self::matches_predicate(row, predicate, params)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Checks if a row matches a single predicate
    fn matches_predicate(
        row: &Row,
        predicate: &Predicate,
        params: &[Value],
    ) -> ExecutorResult<bool> {
        let actual = match row.get(predicate.column) {
            Some(v) => v,
            None => return Ok(false),
        };

        // Null values never match.
        if actual.is_null() {
            return Ok(false);
        }

        let matched = match &predicate.op {
            FilterOp::Eq(expr) => {
                let expected = expr.evaluate(params, Some(row))?;
                actual == &expected
            }
            FilterOp::Gt(expr) => Self::gt_match(actual, &expr.evaluate(params, Some(row))?),
            FilterOp::Gte(expr) => Self::gte_match(actual, &expr.evaluate(params, Some(row))?),
            FilterOp::Lt(expr) => Self::lt_match(actual, &expr.evaluate(params, Some(row))?),
            FilterOp::Lte(expr) => Self::lte_match(actual, &expr.evaluate(params, Some(row))?),
        };
        Ok(matched)
    }

    /// Greater than (numeric and string only)
    fn gt_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af > bf;
                }
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return ai > bi;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a > b,
            _ => false,
        }
    }

    /// Greater than or equal (numeric and string only)
    fn gte_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af >= bf;
                }
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return ai >= bi;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a >= b,
            _ => false,
        }
    }

    /// Less than (numeric and string only)
    fn lt_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af < bf;
                }
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return ai < bi;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a < b,
            _ => false,
        }
    }

    /// Less than or equal (numeric and string only)
    fn lte_match(actual: &Value, bound: &Value) -> bool {
        match (actual, bound) {
            (Value::Number(a), Value::Number(b)) => {
                if let (Some(af), Some(bf)) = (a.as_f64(), b.as_f64()) {
                    return af <= bf;
                }
                if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                    return ai <= bi;
                }
                false
            }
            (Value::String(a), Value::String(b)) => a <= b,
            _ => false,
        }
    }
}
