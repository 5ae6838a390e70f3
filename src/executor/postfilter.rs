//! Counting postfilter
//!
//! Every candidate row passes through the postfilter before projection.
//! The decision combines the residual predicate with offset/limit
//! accounting: rows failing the predicate or consumed by the offset are
//! skipped, and the scan stops as soon as the limit is satisfied.
//!
//! When the plan is eligible for the rank-based offset skip, the executor
//! consumes the offset on the cursor before the loop and constructs the
//! postfilter with the offset already satisfied. Output is identical to
//! naive per-row counting; only the work performed differs.

use serde_json::Value;

use crate::plan::Predicate;
use crate::storage::Row;

use super::errors::ExecutorResult;
use super::filters::RowFilter;

/// Per-row postfilter decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDecision {
    /// Row passes predicate and offset; project and emit it
    Accept,
    /// Row is rejected; keep scanning
    Skip,
    /// No further row can qualify; terminate the scan
    Stop,
}

/// Offset/limit/predicate postfilter over one execution
#[derive(Debug)]
pub struct CountingPostfilter<'p> {
    predicate: &'p [Predicate],
    offset_remaining: u64,
    limit_remaining: Option<u64>,
}

impl<'p> CountingPostfilter<'p> {
    /// Creates a postfilter counting the full offset per row
    pub fn new(predicate: &'p [Predicate], offset: u64, limit: Option<u64>) -> Self {
        Self {
            predicate,
            offset_remaining: offset,
            limit_remaining: limit,
        }
    }

    /// Creates a postfilter whose offset was already consumed by rank
    pub fn with_offset_consumed(predicate: &'p [Predicate], limit: Option<u64>) -> Self {
        Self {
            predicate,
            offset_remaining: 0,
            limit_remaining: limit,
        }
    }

    /// Returns true while the limit has not been reached
    pub fn is_under_limit(&self) -> bool {
        self.limit_remaining != Some(0)
    }

    /// Decides the fate of one candidate row
    pub fn eval(&mut self, row: &Row, params: &[Value]) -> ExecutorResult<RowDecision> {
        if !self.is_under_limit() {
            return Ok(RowDecision::Stop);
        }
        if !RowFilter::matches(row, self.predicate, params)? {
            return Ok(RowDecision::Skip);
        }
        if self.offset_remaining > 0 {
            self.offset_remaining -= 1;
            return Ok(RowDecision::Skip);
        }
        if let Some(remaining) = self.limit_remaining.as_mut() {
            *remaining -= 1;
        }
        Ok(RowDecision::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::plan::Expression;

    fn row(x: i64) -> Row {
        Row::new(vec![json!(x)])
    }

    #[test]
    fn test_accept_without_bounds() {
        let mut filter = CountingPostfilter::new(&[], 0, None);
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Accept);
        assert_eq!(filter.eval(&row(2), &[]).unwrap(), RowDecision::Accept);
    }

    #[test]
    fn test_offset_skips_then_accepts() {
        let mut filter = CountingPostfilter::new(&[], 2, None);
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Skip);
        assert_eq!(filter.eval(&row(2), &[]).unwrap(), RowDecision::Skip);
        assert_eq!(filter.eval(&row(3), &[]).unwrap(), RowDecision::Accept);
    }

    #[test]
    fn test_limit_stops_scan() {
        let mut filter = CountingPostfilter::new(&[], 0, Some(1));
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Accept);
        assert!(!filter.is_under_limit());
        assert_eq!(filter.eval(&row(2), &[]).unwrap(), RowDecision::Stop);
    }

    #[test]
    fn test_zero_limit_stops_immediately() {
        let mut filter = CountingPostfilter::new(&[], 0, Some(0));
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Stop);
    }

    #[test]
    fn test_predicate_skip_does_not_consume_offset() {
        let predicate = vec![Predicate::gte(0, Expression::literal(json!(10)))];
        let mut filter = CountingPostfilter::new(&predicate, 1, None);
        // Fails predicate: skipped without touching the offset.
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Skip);
        // Passes predicate: consumed by the offset.
        assert_eq!(filter.eval(&row(10), &[]).unwrap(), RowDecision::Skip);
        // Passes predicate, offset satisfied: accepted.
        assert_eq!(filter.eval(&row(11), &[]).unwrap(), RowDecision::Accept);
    }

    #[test]
    fn test_offset_consumed_constructor() {
        let mut filter = CountingPostfilter::with_offset_consumed(&[], Some(2));
        assert_eq!(filter.eval(&row(1), &[]).unwrap(), RowDecision::Accept);
        assert_eq!(filter.eval(&row(2), &[]).unwrap(), RowDecision::Accept);
        assert_eq!(filter.eval(&row(3), &[]).unwrap(), RowDecision::Stop);
    }

    #[test]
    fn test_evaluation_error_propagates() {
        let predicate = vec![Predicate::eq(0, Expression::parameter(4))];
        let mut filter = CountingPostfilter::new(&predicate, 0, None);
        assert!(filter.eval(&row(1), &[]).is_err());
    }
}
