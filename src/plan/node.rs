//! Compiled index-scan plan description
//!
//! A plan is produced once per compiled statement and is immutable
//! thereafter: the executor borrows it for its whole lifetime and derives
//! all static shape decisions (lookup type, sort direction, sink choice,
//! rank-skip eligibility) from it at initialization time.

use serde::{Deserialize, Serialize};

use super::expr::Expression;

/// How the scan positions and walks the index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupType {
    /// First row equal to the search key, then its duplicate chain
    Eq,
    /// First row strictly above the search key, then index order
    Gt,
    /// First row at or above the search key, then index order
    Gte,
    /// Rows strictly below the search key, in direction order
    Lt,
    /// Rows at or below the search key, in direction order
    Lte,
    /// Rows whose key cell contains the search geometry; iterated like Eq
    GeoContains,
    /// Full ordered traversal, no search key
    Scan,
}

impl LookupType {
    /// Returns the name used in explain output
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupType::Eq => "EQ",
            LookupType::Gt => "GT",
            LookupType::Gte => "GTE",
            LookupType::Lt => "LT",
            LookupType::Lte => "LTE",
            LookupType::GeoContains => "GEO_CONTAINS",
            LookupType::Scan => "SCAN",
        }
    }

    /// Returns true for the equality class (duplicate-chain iteration)
    pub fn is_equality_class(&self) -> bool {
        matches!(self, LookupType::Eq | LookupType::GeoContains)
    }

    /// Returns true for range lookups
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            LookupType::Gt | LookupType::Gte | LookupType::Lt | LookupType::Lte
        )
    }
}

/// Requested output order relative to index key order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
    /// The statement does not care; the scan runs forward
    Unordered,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::Unordered => "unordered",
        }
    }

    /// Returns true if the index is walked in reverse key order
    pub fn is_descending(&self) -> bool {
        matches!(self, SortDirection::Desc)
    }
}

/// How the end key bounds a range scan from above
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndBound {
    /// Stop at the first key at or above the end key
    Lt,
    /// Stop at the first key strictly above the end key
    Lte,
}

impl EndBound {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndBound::Lt => "lt",
            EndBound::Lte => "lte",
        }
    }
}

/// Filter operation comparing a row column against an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterOp {
    /// Equality: column = expr
    Eq(Expression),
    /// Greater than: column > expr
    Gt(Expression),
    /// Greater than or equal: column >= expr
    Gte(Expression),
    /// Less than: column < expr
    Lt(Expression),
    /// Less than or equal: column <= expr
    Lte(Expression),
}

impl FilterOp {
    /// Returns the operation name for explain output
    pub fn op_name(&self) -> &'static str {
        match self {
            FilterOp::Eq(_) => "eq",
            FilterOp::Gt(_) => "gt",
            FilterOp::Gte(_) => "gte",
            FilterOp::Lt(_) => "lt",
            FilterOp::Lte(_) => "lte",
        }
    }

    /// Returns true if this is an equality operation
    pub fn is_equality(&self) -> bool {
        matches!(self, FilterOp::Eq(_))
    }
}

/// A single residual predicate (column ordinal + operation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    /// Column ordinal in the candidate row
    pub column: usize,
    /// Filter operation
    pub op: FilterOp,
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(column: usize, expr: Expression) -> Self {
        Self {
            column,
            op: FilterOp::Eq(expr),
        }
    }

    /// Create a greater-than predicate
    pub fn gt(column: usize, expr: Expression) -> Self {
        Self {
            column,
            op: FilterOp::Gt(expr),
        }
    }

    /// Create a greater-or-equal predicate
    pub fn gte(column: usize, expr: Expression) -> Self {
        Self {
            column,
            op: FilterOp::Gte(expr),
        }
    }

    /// Create a less-than predicate
    pub fn lt(column: usize, expr: Expression) -> Self {
        Self {
            column,
            op: FilterOp::Lt(expr),
        }
    }

    /// Create a less-or-equal predicate
    pub fn lte(column: usize, expr: Expression) -> Self {
        Self {
            column,
            op: FilterOp::Lte(expr),
        }
    }
}

/// One output column of an inline projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectionColumn {
    /// Direct copy of an input column, resolved once at initialization
    PassThrough(usize),
    /// Computed from an expression over the candidate row
    Computed(Expression),
}

/// Inline projection plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPlan {
    /// Output columns in ordinal order
    pub columns: Vec<ProjectionColumn>,
}

impl ProjectionPlan {
    /// Creates a projection from explicit output columns
    pub fn new(columns: Vec<ProjectionColumn>) -> Self {
        Self { columns }
    }

    /// Creates a pure pass-through projection over the given input columns
    pub fn pass_through(columns: impl IntoIterator<Item = usize>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(ProjectionColumn::PassThrough)
                .collect(),
        }
    }

    /// Returns the input column map if every output is a direct copy
    pub fn all_pass_through(&self) -> Option<Vec<usize>> {
        self.columns
            .iter()
            .map(|c| match c {
                ProjectionColumn::PassThrough(ordinal) => Some(*ordinal),
                ProjectionColumn::Computed(_) => None,
            })
            .collect()
    }
}

/// Which inline consumer the plan fuses into the scan, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InlineSink {
    /// Rows feed a running aggregate
    Aggregate,
    /// Rows drive point inserts into a base table
    Insert,
}

impl InlineSink {
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineSink::Aggregate => "aggregate",
            InlineSink::Insert => "insert",
        }
    }
}

/// Immutable index-scan plan description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexScanPlan {
    /// Target index name
    pub index_name: String,
    /// Lookup type
    pub lookup_type: LookupType,
    /// Requested sort direction
    pub sort_direction: SortDirection,
    /// Search-key expressions, one per leading key column
    pub search_keys: Vec<Expression>,
    /// End-key expressions bounding range scans from above
    pub end_keys: Vec<Expression>,
    /// How the end key bounds the scan
    pub end_bound: EndBound,
    /// Residual predicate, AND semantics; empty means none
    pub predicate: Vec<Predicate>,
    /// Rows to skip before emitting
    pub offset: u64,
    /// Maximum rows to emit; `None` means unlimited
    pub limit: Option<u64>,
    /// Inline projection, if any
    pub projection: Option<ProjectionPlan>,
    /// Inline consumer the scan feeds, if any
    pub inline_sink: Option<InlineSink>,
    /// Whether offset+limit+direction admit a rank-based offset skip
    pub rank_offset_eligible: bool,
}

impl IndexScanPlan {
    /// Creates a plan with no keys, predicate, bounds, or projection
    pub fn new(index_name: impl Into<String>, lookup_type: LookupType) -> Self {
        Self {
            index_name: index_name.into(),
            lookup_type,
            sort_direction: SortDirection::Unordered,
            search_keys: Vec::new(),
            end_keys: Vec::new(),
            end_bound: EndBound::Lte,
            predicate: Vec::new(),
            offset: 0,
            limit: None,
            projection: None,
            inline_sink: None,
            rank_offset_eligible: false,
        }
    }

    /// Appends a search-key expression
    pub fn with_search_key(mut self, expr: Expression) -> Self {
        self.search_keys.push(expr);
        self
    }

    /// Appends an end-key expression
    pub fn with_end_key(mut self, expr: Expression) -> Self {
        self.end_keys.push(expr);
        self
    }

    /// Sets the end bound type
    pub fn with_end_bound(mut self, bound: EndBound) -> Self {
        self.end_bound = bound;
        self
    }

    /// Sets the sort direction
    pub fn with_sort(mut self, direction: SortDirection) -> Self {
        self.sort_direction = direction;
        self
    }

    /// Appends a residual predicate
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate.push(predicate);
        self
    }

    /// Sets the offset
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the limit
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the inline projection
    pub fn with_projection(mut self, projection: ProjectionPlan) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Sets the inline sink
    pub fn with_inline_sink(mut self, sink: InlineSink) -> Self {
        self.inline_sink = Some(sink);
        self
    }

    /// Marks the plan eligible for the rank-based offset skip
    pub fn with_rank_offset_optimization(mut self) -> Self {
        self.rank_offset_eligible = true;
        self
    }

    /// Returns the number of search-key expressions
    pub fn search_key_count(&self) -> usize {
        self.search_keys.len()
    }
}
