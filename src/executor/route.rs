//! Output routing
//!
//! Exactly one sink is active per executor instance, chosen at
//! initialization from the plan shape: projected rows either materialize
//! into the owned result table, feed an inline aggregate whose running
//! state spans the execution, or drive point inserts into a base table.
//! The route performs no buffering of its own.

use std::fmt;

use crate::index::IndexCatalog;
use crate::observability::{Event, Logger, Severity};
use crate::plan::InlineSink;
use crate::storage::{Row, Table};

use super::errors::{ExecutorError, ExecutorResult};
use super::result::ResultTable;

/// Inline aggregate consumer: keeps running state across one execution
pub trait AggregateConsumer {
    /// Folds one accepted row into the running aggregate
    fn accept(&mut self, row: &Row) -> ExecutorResult<()>;
}

/// Inline insert consumer: performs one point insert per accepted row
pub trait InsertConsumer {
    /// Inserts one accepted row into the target base table
    fn accept(&mut self, row: Row) -> ExecutorResult<()>;
}

/// Which sink a route feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Materialize,
    Aggregate,
    Insert,
}

impl RouteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Materialize => "materialize",
            RouteKind::Aggregate => "aggregate",
            RouteKind::Insert => "insert",
        }
    }

    /// Returns the inline-sink selector this kind satisfies, if any
    pub fn inline_sink(&self) -> Option<InlineSink> {
        match self {
            RouteKind::Materialize => None,
            RouteKind::Aggregate => Some(InlineSink::Aggregate),
            RouteKind::Insert => Some(InlineSink::Insert),
        }
    }
}

/// The configured output sink, exactly one payload active
pub enum OutputRoute {
    /// Append to the owned result table
    Materialize(ResultTable),
    /// Forward to an inline aggregate consumer
    Aggregate(Box<dyn AggregateConsumer>),
    /// Forward to an inline insert consumer
    Insert(Box<dyn InsertConsumer>),
}

impl OutputRoute {
    /// Creates a materializing route with an empty result table
    pub fn materialize() -> Self {
        OutputRoute::Materialize(ResultTable::new())
    }

    /// Creates an aggregate route
    pub fn aggregate(consumer: Box<dyn AggregateConsumer>) -> Self {
        OutputRoute::Aggregate(consumer)
    }

    /// Creates an insert route
    pub fn insert(consumer: Box<dyn InsertConsumer>) -> Self {
        OutputRoute::Insert(consumer)
    }

    /// Returns which sink this route feeds
    pub fn kind(&self) -> RouteKind {
        match self {
            OutputRoute::Materialize(_) => RouteKind::Materialize,
            OutputRoute::Aggregate(_) => RouteKind::Aggregate,
            OutputRoute::Insert(_) => RouteKind::Insert,
        }
    }

    /// Delivers one projected row to the active sink
    pub fn deliver(&mut self, row: Row) -> ExecutorResult<()> {
        match self {
            OutputRoute::Materialize(table) => {
                table.append(row);
                Ok(())
            }
            OutputRoute::Aggregate(consumer) => consumer.accept(&row),
            OutputRoute::Insert(consumer) => consumer.accept(row),
        }
    }

    /// Returns the result table, if this is a materializing route
    pub fn result(&self) -> Option<&ResultTable> {
        match self {
            OutputRoute::Materialize(table) => Some(table),
            _ => None,
        }
    }

    /// Consumes the route, returning the result table if it has one
    pub fn into_result(self) -> Option<ResultTable> {
        match self {
            OutputRoute::Materialize(table) => Some(table),
            _ => None,
        }
    }
}

impl fmt::Debug for OutputRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputRoute").field(&self.kind()).finish()
    }
}

/// COUNT(*)-style inline aggregate: counts accepted rows
#[derive(Debug, Default)]
pub struct RowCountAggregate {
    count: u64,
}

impl RowCountAggregate {
    /// Creates a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows accepted so far
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl AggregateConsumer for RowCountAggregate {
    fn accept(&mut self, _row: &Row) -> ExecutorResult<()> {
        self.count += 1;
        Ok(())
    }
}

/// Insert consumer backed by an owned base table and its index catalog.
///
/// Each accepted row is a point insert: uniqueness is checked before the
/// table append so a rejected row leaves both structures unchanged.
#[derive(Debug)]
pub struct TableInserter {
    table: Table,
    catalog: IndexCatalog,
}

impl TableInserter {
    /// Creates an inserter over a target table and its indexes
    pub fn new(table: Table, catalog: IndexCatalog) -> Self {
        Self { table, catalog }
    }

    /// Consumes the inserter, returning the table and catalog
    pub fn into_parts(self) -> (Table, IndexCatalog) {
        (self.table, self.catalog)
    }

    /// Returns the target table
    pub fn table(&self) -> &Table {
        &self.table
    }
}

impl InsertConsumer for TableInserter {
    fn accept(&mut self, row: Row) -> ExecutorResult<()> {
        self.catalog.check_insert(&row).map_err(|e| {
            Logger::log_stderr(
                Severity::Error,
                Event::InsertRejected.as_str(),
                &[("code", e.code().code())],
            );
            ExecutorError::resource(e.to_string())
        })?;
        let id = self.table.insert(row)?;
        let inserted = self
            .table
            .row(id)
            .cloned()
            .ok_or_else(|| ExecutorError::resource(format!("row {id} vanished after insert")))?;
        self.catalog
            .apply_insert(id, &inserted)
            .map_err(|e| ExecutorError::resource(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexDef;
    use crate::schema::TableSchema;
    use serde_json::json;

    #[test]
    fn test_materialize_route() {
        let mut route = OutputRoute::materialize();
        assert_eq!(route.kind(), RouteKind::Materialize);
        route.deliver(Row::new(vec![json!(1)])).unwrap();
        assert_eq!(route.result().unwrap().len(), 1);
    }

    #[test]
    fn test_aggregate_route_keeps_running_state() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct SharedCount(Rc<Cell<u64>>);
        impl AggregateConsumer for SharedCount {
            fn accept(&mut self, _row: &Row) -> ExecutorResult<()> {
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let count = Rc::new(Cell::new(0));
        let mut route = OutputRoute::aggregate(Box::new(SharedCount(Rc::clone(&count))));
        route.deliver(Row::new(vec![json!(1)])).unwrap();
        route.deliver(Row::new(vec![json!(2)])).unwrap();
        assert_eq!(count.get(), 2);
        assert!(route.result().is_none());
    }

    #[test]
    fn test_row_count_aggregate() {
        let mut agg = RowCountAggregate::new();
        agg.accept(&Row::new(vec![json!(1)])).unwrap();
        agg.accept(&Row::new(vec![json!(2)])).unwrap();
        assert_eq!(agg.count(), 2);
    }

    #[test]
    fn test_table_inserter_point_inserts() {
        let table = Table::new(TableSchema::new(["x", "y"]));
        let catalog = IndexCatalog::new();
        let mut inserter = TableInserter::new(table, catalog);
        inserter
            .accept(Row::new(vec![json!(1), json!("a")]))
            .unwrap();
        assert_eq!(inserter.table().len(), 1);
    }

    #[test]
    fn test_table_inserter_unique_violation_is_resource_error() {
        let table = Table::new(TableSchema::new(["x", "y"]));
        let mut catalog = IndexCatalog::new();
        catalog
            .create_index(IndexDef::unique("idx_x", vec![0]))
            .unwrap();
        let mut inserter = TableInserter::new(table, catalog);
        inserter
            .accept(Row::new(vec![json!(1), json!("a")]))
            .unwrap();
        let err = inserter
            .accept(Row::new(vec![json!(1), json!("b")]))
            .unwrap_err();
        assert_eq!(err.code().code(), "ROWAN_SCAN_RESOURCE");
        // The rejected row landed nowhere.
        assert_eq!(inserter.table().len(), 1);
    }

    #[test]
    fn test_table_inserter_arity_violation() {
        let table = Table::new(TableSchema::new(["x", "y"]));
        let mut inserter = TableInserter::new(table, IndexCatalog::new());
        let err = inserter.accept(Row::new(vec![json!(1)])).unwrap_err();
        assert_eq!(err.code().code(), "ROWAN_SCAN_RESOURCE");
    }

    #[test]
    fn test_route_kind_inline_sink_mapping() {
        assert_eq!(RouteKind::Materialize.inline_sink(), None);
        assert_eq!(RouteKind::Aggregate.inline_sink(), Some(InlineSink::Aggregate));
        assert_eq!(RouteKind::Insert.inline_sink(), Some(InlineSink::Insert));
    }
}
