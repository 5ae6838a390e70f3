//! Index-scan executor
//!
//! Execution flow (strict order):
//!
//! 1. Evaluate search-key and end-key expressions into the owned buffers
//! 2. Position a cursor on the target index per the lookup type
//! 3. Fetch candidate rows: duplicate chain for equality lookups, index
//!    order for range and full scans
//! 4. Stop at the end-key fence, if one is configured
//! 5. Consult the postfilter: skip, stop, or accept each candidate
//! 6. Project accepted rows and deliver them to the configured sink
//!
//! All plan-shape decisions (lookup type, direction, sink, projection
//! resolution, rank-skip eligibility) are made once at initialization;
//! per-execution state is limited to the key buffers, the cursor, and the
//! postfilter counters.

use std::cmp::Ordering;

use serde_json::Value;

use crate::index::{
    CompositeKey, IndexCatalog, IndexError, IndexErrorCode, IndexKey, IndexResult, OrderedIndex,
    ScanCursor,
};
use crate::observability::{Event, Logger, MetricsRegistry, Severity};
use crate::plan::{EndBound, IndexScanPlan, LookupType, SortDirection};
use crate::storage::{Row, RowId, StorageError, Table};

use super::errors::{ExecutorError, ExecutorResult};
use super::postfilter::{CountingPostfilter, RowDecision};
use super::projector::Projector;
use super::result::ResultTable;
use super::route::OutputRoute;
use super::search_key::KeyBuffer;

/// Index capability consumed by the scan executor
pub trait ScanIndex {
    /// Number of key columns
    fn key_width(&self) -> usize;

    /// Table column ordinals forming the key
    fn key_columns(&self) -> &[usize];

    /// Positions a cursor for a lookup over the active key prefix
    fn position_for_lookup(
        &self,
        lookup: LookupType,
        key: &[Value],
        direction: SortDirection,
    ) -> IndexResult<Box<dyn ScanCursor + '_>>;
}

impl ScanIndex for OrderedIndex {
    fn key_width(&self) -> usize {
        OrderedIndex::key_width(self)
    }

    fn key_columns(&self) -> &[usize] {
        OrderedIndex::key_columns(self)
    }

    fn position_for_lookup(
        &self,
        lookup: LookupType,
        key: &[Value],
        direction: SortDirection,
    ) -> IndexResult<Box<dyn ScanCursor + '_>> {
        Ok(Box::new(OrderedIndex::position_for_lookup(
            self, lookup, key, direction,
        )?))
    }
}

/// Base-table read capability consumed by the scan executor.
///
/// Candidate rows stay owned by the store; the executor reads them for
/// filtering and projection and never mutates them.
pub trait RowStore {
    /// Width of stored rows
    fn column_count(&self) -> usize;

    /// Returns the row with the given id
    fn row(&self, id: RowId) -> Option<&Row>;
}

impl RowStore for Table {
    fn column_count(&self) -> usize {
        self.schema().width()
    }

    fn row(&self, id: RowId) -> Option<&Row> {
        Table::row(self, id)
    }
}

/// Fetches the next candidate row for an index scan.
///
/// Equality-class lookups drain the positioned key's duplicate chain
/// first; once the chain is exhausted, only a zero-key scan falls through
/// to unconstrained index order. Range and full scans always advance in
/// index order. Returns `None` when the scan is exhausted.
pub fn fetch_next_row(
    lookup: LookupType,
    cursor: &mut dyn ScanCursor,
    active_search_keys: usize,
) -> Option<RowId> {
    if lookup.is_equality_class() {
        if let Some(id) = cursor.next_at_key() {
            return Some(id);
        }
    }
    if !lookup.is_equality_class() || active_search_keys == 0 {
        return cursor.next();
    }
    None
}

/// End-key fence: stops a scan at the far end of travel
struct EndFence {
    prefix: Vec<IndexKey>,
    bound: EndBound,
    descending: bool,
}

impl EndFence {
    /// Returns true when the candidate's key lies beyond the fence
    fn exceeded_by(&self, row: &Row, key_columns: &[usize]) -> ExecutorResult<bool> {
        let mut parts = Vec::with_capacity(self.prefix.len());
        for &ordinal in key_columns.iter().take(self.prefix.len()) {
            let value = row.get(ordinal).ok_or_else(|| {
                ExecutorError::resource(format!(
                    "candidate row is missing key column {ordinal}"
                ))
            })?;
            let part = IndexKey::from_value(value).ok_or_else(|| {
                ExecutorError::resource(format!(
                    "candidate key column {ordinal} has no key encoding"
                ))
            })?;
            parts.push(part);
        }
        let key = CompositeKey::new(parts);
        let cmp = key.prefix_cmp(&self.prefix);
        let beyond = match (self.bound, self.descending) {
            (EndBound::Lte, false) => cmp == Ordering::Greater,
            (EndBound::Lt, false) => cmp != Ordering::Less,
            (EndBound::Lte, true) => cmp == Ordering::Less,
            (EndBound::Lt, true) => cmp != Ordering::Greater,
        };
        Ok(beyond)
    }
}

/// Per-execution row accounting
struct ScanStats {
    scanned: u64,
    emitted: u64,
}

/// Executor for one compiled index-scan plan.
///
/// Initialized once per compiled plan, executed once per statement. The
/// plan is borrowed immutably for the executor's lifetime; per-execution
/// state (key buffers, cursor, postfilter counters) is rebuilt on every
/// `execute` call, so an aborted execution leaves the executor reusable.
pub struct IndexScanExecutor<'p, I: ScanIndex, S: RowStore> {
    plan: &'p IndexScanPlan,
    index: &'p I,
    store: &'p S,

    // Search key
    search_key: KeyBuffer,
    end_key: KeyBuffer,

    // Inline projection
    projector: Projector,

    // Output routing
    route: OutputRoute,

    metrics: Option<&'p MetricsRegistry>,

    // Plan-shape decisions, precomputed at initialization
    lookup: LookupType,
    direction: SortDirection,
    rank_skip: bool,
}

impl<'p, S: RowStore> IndexScanExecutor<'p, OrderedIndex, S> {
    /// Initializes an executor, resolving the target index by name.
    ///
    /// An unresolvable index is a configuration error: fatal, never
    /// retried.
    pub fn initialize(
        plan: &'p IndexScanPlan,
        catalog: &'p IndexCatalog,
        store: &'p S,
        route: OutputRoute,
    ) -> ExecutorResult<Self> {
        let index = catalog.resolve(&plan.index_name).ok_or_else(|| {
            ExecutorError::configuration(format!(
                "index {} cannot be resolved",
                plan.index_name
            ))
        })?;
        Self::with_index(plan, index, store, route)
    }
}

impl<'p, I: ScanIndex, S: RowStore> IndexScanExecutor<'p, I, S> {
    /// Initializes an executor over an already-resolved index handle.
    ///
    /// Validates the plan shape against the index key schema and the
    /// provided route, resolves the projector, and allocates both key
    /// buffers. All failures here are configuration errors.
    pub fn with_index(
        plan: &'p IndexScanPlan,
        index: &'p I,
        store: &'p S,
        route: OutputRoute,
    ) -> ExecutorResult<Self> {
        let width = index.key_width();
        if plan.search_keys.len() > width {
            return Err(ExecutorError::configuration(format!(
                "plan has {} search keys against a {width}-column key schema",
                plan.search_keys.len()
            )));
        }
        if plan.end_keys.len() > width {
            return Err(ExecutorError::configuration(format!(
                "plan has {} end keys against a {width}-column key schema",
                plan.end_keys.len()
            )));
        }
        if plan.lookup_type == LookupType::Scan && !plan.search_keys.is_empty() {
            return Err(ExecutorError::configuration(
                "full-scan lookup carries search keys",
            ));
        }
        if route.kind().inline_sink() != plan.inline_sink {
            return Err(ExecutorError::configuration(format!(
                "plan expects {} sink, route is {}",
                plan.inline_sink.map_or("materialize", |s| s.as_str()),
                route.kind().as_str()
            )));
        }
        let projector = Projector::resolve(plan.projection.as_ref(), store.column_count())?;
        // A predicate changes which rows the offset consumes, so the rank
        // jump is only sound without one.
        let rank_skip =
            plan.rank_offset_eligible && plan.offset > 0 && plan.predicate.is_empty();

        Logger::log(
            Severity::Trace,
            Event::ScanInitialized.as_str(),
            &[
                ("index", &plan.index_name),
                ("lookup", plan.lookup_type.as_str()),
                ("sink", route.kind().as_str()),
            ],
        );

        Ok(Self {
            plan,
            index,
            store,
            search_key: KeyBuffer::new(width),
            end_key: KeyBuffer::new(width),
            projector,
            route,
            metrics: None,
            lookup: plan.lookup_type,
            direction: plan.sort_direction,
            rank_skip,
        })
    }

    /// Attaches a metrics registry
    pub fn with_metrics(mut self, metrics: &'p MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Returns the configured route
    pub fn route(&self) -> &OutputRoute {
        &self.route
    }

    /// Returns the materialized result table, if that sink is configured
    pub fn result(&self) -> Option<&ResultTable> {
        self.route.result()
    }

    /// Consumes the executor, returning its route
    pub fn into_route(self) -> OutputRoute {
        self.route
    }

    /// Runs the scan once against the given parameter bindings.
    ///
    /// Output reaches the configured sink; the return value carries only
    /// success or failure. Any error is terminal for this execution and
    /// leaves the executor ready for the next one.
    pub fn execute(&mut self, params: &[Value]) -> ExecutorResult<()> {
        match self.run(params) {
            Ok(stats) => {
                if let Some(metrics) = self.metrics {
                    metrics.increment_scans_executed();
                    metrics.add_rows_scanned(stats.scanned);
                    metrics.add_rows_emitted(stats.emitted);
                }
                Ok(())
            }
            Err(err) => {
                if let Some(metrics) = self.metrics {
                    metrics.increment_scans_failed();
                }
                Logger::log_stderr(
                    Severity::Error,
                    Event::ScanFailed.as_str(),
                    &[
                        ("code", err.code().code()),
                        ("index", &self.plan.index_name),
                    ],
                );
                Err(err)
            }
        }
    }

    fn run(&mut self, params: &[Value]) -> ExecutorResult<ScanStats> {
        // Key values are parameter-dependent, not row-dependent: build
        // both buffers exactly once per execution.
        let active = self.search_key.build(&self.plan.search_keys, params)?;
        let end_active = self.end_key.build(&self.plan.end_keys, params)?;

        let mut cursor = self
            .index
            .position_for_lookup(self.lookup, self.search_key.active(active), self.direction)
            .map_err(position_error)?;

        let end_fence = if end_active > 0 {
            let mut parts = Vec::with_capacity(end_active);
            for (slot, value) in self.end_key.active(end_active).iter().enumerate() {
                let part = IndexKey::from_value(value).ok_or_else(|| {
                    ExecutorError::evaluation(format!(
                        "end key slot {slot} holds a value with no key encoding"
                    ))
                })?;
                parts.push(part);
            }
            Some(EndFence {
                prefix: parts,
                bound: self.plan.end_bound,
                descending: self.direction.is_descending(),
            })
        } else {
            None
        };

        let mut postfilter = if self.rank_skip {
            cursor.skip(self.plan.offset as usize);
            CountingPostfilter::with_offset_consumed(&self.plan.predicate, self.plan.limit)
        } else {
            CountingPostfilter::new(&self.plan.predicate, self.plan.offset, self.plan.limit)
        };

        let mut stats = ScanStats {
            scanned: 0,
            emitted: 0,
        };

        while postfilter.is_under_limit() {
            let Some(row_id) = fetch_next_row(self.lookup, cursor.as_mut(), active) else {
                break;
            };
            stats.scanned += 1;

            let row = self
                .store
                .row(row_id)
                .ok_or_else(|| ExecutorError::from(StorageError::missing_row(row_id)))?;

            if let Some(fence) = &end_fence {
                if fence.exceeded_by(row, self.index.key_columns())? {
                    break;
                }
            }

            match postfilter.eval(row, params)? {
                RowDecision::Stop => break,
                RowDecision::Skip => continue,
                RowDecision::Accept => {
                    let output = self.projector.project(row, params)?;
                    self.route.deliver(output)?;
                    stats.emitted += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// Maps a positioning failure onto the executor error taxonomy
fn position_error(err: IndexError) -> ExecutorError {
    match err.code() {
        IndexErrorCode::RowanIndexKeyWidth => ExecutorError::configuration(err.to_string()),
        _ => ExecutorError::evaluation(err.to_string()),
    }
}
