//! Scan Determinism Tests
//!
//! - Repeated executions of one compiled plan produce identical output
//! - The rank-based offset skip never changes observable output
//! - Metrics counters are exact

use proptest::prelude::*;

use rowandb::executor::{ExecutorResult, IndexScanExecutor, OutputRoute};
use rowandb::index::{IndexCatalog, IndexDef};
use rowandb::observability::MetricsRegistry;
use rowandb::plan::{Expression, IndexScanPlan, LookupType, SortDirection};
use rowandb::schema::TableSchema;
use rowandb::storage::{Row, Table};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn make_table(keys: &[i64]) -> (Table, IndexCatalog) {
    let mut table = Table::new(TableSchema::new(["x", "tag"]));
    for (i, key) in keys.iter().enumerate() {
        table
            .insert(Row::new(vec![json!(key), json!(format!("r{i}"))]))
            .unwrap();
    }
    let mut catalog = IndexCatalog::new();
    catalog.create_index(IndexDef::new("idx_x", vec![0])).unwrap();
    catalog.rebuild(&table).unwrap();
    (table, catalog)
}

fn run_scan(
    plan: &IndexScanPlan,
    table: &Table,
    catalog: &IndexCatalog,
    params: &[Value],
) -> ExecutorResult<Vec<Row>> {
    let mut executor =
        IndexScanExecutor::initialize(plan, catalog, table, OutputRoute::materialize())?;
    executor.execute(params)?;
    Ok(executor.into_route().into_result().unwrap().into_rows())
}

fn render(rows: &[Row]) -> String {
    serde_json::to_string(rows).unwrap()
}

// =============================================================================
// Idempotence
// =============================================================================

/// Re-initializing and re-running the same plan against an unmodified
/// index produces the same output sequence.
#[test]
fn test_repeated_initialization_is_idempotent() {
    let (table, catalog) = make_table(&[3, 1, 2, 1]);
    let plan = IndexScanPlan::new("idx_x", LookupType::Gte)
        .with_search_key(Expression::parameter(0))
        .with_sort(SortDirection::Asc);

    let first = run_scan(&plan, &table, &catalog, &[json!(1)]).unwrap();
    let second = run_scan(&plan, &table, &catalog, &[json!(1)]).unwrap();
    assert_eq!(render(&first), render(&second));
}

/// One executor instance re-executed with the same bindings produces the
/// same output each time.
#[test]
fn test_one_executor_many_executions() {
    let (table, catalog) = make_table(&[2, 1, 2]);
    let plan = IndexScanPlan::new("idx_x", LookupType::Eq)
        .with_search_key(Expression::literal(json!(2)));

    let mut executor =
        IndexScanExecutor::initialize(&plan, &catalog, &table, OutputRoute::materialize())
            .unwrap();
    executor.execute(&[]).unwrap();
    let after_one = executor.result().unwrap().len();
    executor.execute(&[]).unwrap();
    let after_two = executor.result().unwrap().len();

    // Each execution appends the same two rows.
    assert_eq!(after_one, 2);
    assert_eq!(after_two, 4);
}

// =============================================================================
// Rank-Skip Equivalence
// =============================================================================

/// Exhaustive offset/limit grid: the rank-skip plan and the naive plan
/// produce byte-identical output.
#[test]
fn test_rank_skip_equivalence_grid() {
    let (table, catalog) = make_table(&[1, 1, 2, 3, 3, 3, 4]);

    for direction in [SortDirection::Asc, SortDirection::Desc] {
        for offset in 0..8u64 {
            for limit in 0..8u64 {
                let naive = IndexScanPlan::new("idx_x", LookupType::Scan)
                    .with_sort(direction)
                    .with_offset(offset)
                    .with_limit(limit);
                let optimized = naive.clone().with_rank_offset_optimization();

                let naive_rows = run_scan(&naive, &table, &catalog, &[]).unwrap();
                let optimized_rows = run_scan(&optimized, &table, &catalog, &[]).unwrap();
                assert_eq!(
                    render(&naive_rows),
                    render(&optimized_rows),
                    "offset={offset} limit={limit} {direction:?}"
                );
            }
        }
    }
}

/// The rank skip composes with a lower bound and an end key.
#[test]
fn test_rank_skip_with_bounds() {
    let (table, catalog) = make_table(&[1, 2, 3, 4, 5, 6]);
    let naive = IndexScanPlan::new("idx_x", LookupType::Gte)
        .with_search_key(Expression::literal(json!(2)))
        .with_end_key(Expression::literal(json!(5)))
        .with_sort(SortDirection::Asc)
        .with_offset(1)
        .with_limit(2);
    let optimized = naive.clone().with_rank_offset_optimization();

    let naive_rows = run_scan(&naive, &table, &catalog, &[]).unwrap();
    let optimized_rows = run_scan(&optimized, &table, &catalog, &[]).unwrap();
    assert_eq!(render(&naive_rows), render(&optimized_rows));
}

// =============================================================================
// Metrics
// =============================================================================

/// Counters record exactly the rows fetched and emitted.
#[test]
fn test_metrics_exact() {
    let (table, catalog) = make_table(&[1, 2, 3]);
    let metrics = MetricsRegistry::new();
    let plan = IndexScanPlan::new("idx_x", LookupType::Scan)
        .with_sort(SortDirection::Asc)
        .with_limit(2);

    let mut executor =
        IndexScanExecutor::initialize(&plan, &catalog, &table, OutputRoute::materialize())
            .unwrap()
            .with_metrics(&metrics);
    executor.execute(&[]).unwrap();

    assert_eq!(metrics.scans_executed(), 1);
    assert_eq!(metrics.scans_failed(), 0);
    assert_eq!(metrics.rows_emitted(), 2);
    assert_eq!(metrics.rows_scanned(), 2);
}

/// A failed execution counts as a failure, not a success.
#[test]
fn test_metrics_failed_scan() {
    let (table, catalog) = make_table(&[1]);
    let metrics = MetricsRegistry::new();
    let plan = IndexScanPlan::new("idx_x", LookupType::Eq)
        .with_search_key(Expression::parameter(0));

    let mut executor =
        IndexScanExecutor::initialize(&plan, &catalog, &table, OutputRoute::materialize())
            .unwrap()
            .with_metrics(&metrics);
    assert!(executor.execute(&[]).is_err());

    assert_eq!(metrics.scans_executed(), 0);
    assert_eq!(metrics.scans_failed(), 1);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// For arbitrary key multisets and offset/limit pairs, the rank-skip
    /// plan matches the naive plan byte for byte.
    #[test]
    fn prop_rank_skip_matches_naive(
        keys in proptest::collection::vec(-20i64..20, 0..40),
        offset in 0u64..50,
        limit in 0u64..50,
        descending in any::<bool>(),
    ) {
        let (table, catalog) = make_table(&keys);
        let direction = if descending {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        let naive = IndexScanPlan::new("idx_x", LookupType::Scan)
            .with_sort(direction)
            .with_offset(offset)
            .with_limit(limit);
        let optimized = naive.clone().with_rank_offset_optimization();

        let naive_rows = run_scan(&naive, &table, &catalog, &[]).unwrap();
        let optimized_rows = run_scan(&optimized, &table, &catalog, &[]).unwrap();
        prop_assert_eq!(render(&naive_rows), render(&optimized_rows));
    }

    /// Every row yielded by a greater-or-equal scan respects the bound,
    /// and keys arrive in non-decreasing order.
    #[test]
    fn prop_gte_bound_respected(
        keys in proptest::collection::vec(-20i64..20, 0..40),
        bound in -25i64..25,
    ) {
        let (table, catalog) = make_table(&keys);
        let plan = IndexScanPlan::new("idx_x", LookupType::Gte)
            .with_search_key(Expression::literal(json!(bound)))
            .with_sort(SortDirection::Asc);

        let rows = run_scan(&plan, &table, &catalog, &[]).unwrap();
        let yielded: Vec<i64> = rows
            .iter()
            .map(|r| r.get(0).and_then(Value::as_i64).unwrap())
            .collect();

        prop_assert!(yielded.iter().all(|&k| k >= bound));
        prop_assert!(yielded.windows(2).all(|w| w[0] <= w[1]));

        let expected = keys.iter().filter(|&&k| k >= bound).count();
        prop_assert_eq!(yielded.len(), expected);
    }

    /// Repeated executions are idempotent for arbitrary content.
    #[test]
    fn prop_idempotent_executions(
        keys in proptest::collection::vec(-10i64..10, 0..30),
        bound in -12i64..12,
    ) {
        let (table, catalog) = make_table(&keys);
        let plan = IndexScanPlan::new("idx_x", LookupType::Lte)
            .with_search_key(Expression::literal(json!(bound)))
            .with_sort(SortDirection::Desc);

        let first = run_scan(&plan, &table, &catalog, &[]).unwrap();
        let second = run_scan(&plan, &table, &catalog, &[]).unwrap();
        prop_assert_eq!(render(&first), render(&second));
    }
}
