//! Table schema subsystem for rowandb
//!
//! Schemas are positional: a table is a fixed-width sequence of named
//! columns, and rows are tuples addressed by column ordinal. The executor
//! and storage layers use schemas for arity validation only; value typing
//! and coercion are out of scope.

mod types;

pub use types::{Column, TableSchema};
