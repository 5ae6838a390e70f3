//! rowandb - a strict, deterministic, in-memory relational execution engine
//!
//! The core of the crate is the index-scan executor: compiled plans walk an
//! ordered index, filter and project the matching rows, and deliver each
//! surviving row to exactly one configured output sink.

pub mod error;
pub mod executor;
pub mod index;
pub mod observability;
pub mod plan;
pub mod schema;
pub mod storage;
