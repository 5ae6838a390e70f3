//! Index-scan executor subsystem for rowandb
//!
//! The executor consumes one compiled plan and walks the target index,
//! fusing key lookup, cursor iteration, offset/limit accounting, residual
//! filtering, inline projection, and output routing into a single hot
//! loop.
//!
//! # Execution flow (strict order)
//!
//! 1. Build search/end keys from expressions, once per execution
//! 2. Position a cursor per the lookup type and sort direction
//! 3. Fetch candidates: duplicate chain for equality, index order otherwise
//! 4. Stop at the end-key fence
//! 5. Postfilter: skip, stop, or accept
//! 6. Project and deliver to exactly one sink
//!
//! # Invariants
//!
//! - Rows surface in native index key order for the chosen direction
//! - The rank-based offset skip never changes observable output
//! - Any error is terminal for the current execution; the executor stays
//!   usable for the next one

mod errors;
mod filters;
mod index_scan;
mod postfilter;
mod projector;
mod result;
mod route;
mod search_key;

pub use errors::{ExecutorError, ExecutorErrorCode, ExecutorResult, Severity};
pub use filters::RowFilter;
pub use index_scan::{fetch_next_row, IndexScanExecutor, RowStore, ScanIndex};
pub use postfilter::{CountingPostfilter, RowDecision};
pub use projector::Projector;
pub use result::ResultTable;
pub use route::{
    AggregateConsumer, InsertConsumer, OutputRoute, RouteKind, RowCountAggregate, TableInserter,
};
pub use search_key::KeyBuffer;
