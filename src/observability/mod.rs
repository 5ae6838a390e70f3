//! Observability subsystem for rowandb
//!
//! Structured logging, typed events, and deterministic metrics for the
//! execution engine.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on execution
//! 2. No async machinery or background threads
//! 3. Deterministic output: same events, same log lines
//! 4. Counters only, exact values

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::MetricsRegistry;
