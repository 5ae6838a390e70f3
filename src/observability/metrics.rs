//! Metrics registry
//!
//! Counters only, monotonic, exact. Thread-safe via atomics with `Relaxed`
//! ordering; executor instances on separate worker threads share one
//! registry without locking.

use std::sync::atomic::{AtomicU64, Ordering};

/// Registry of engine counters
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful scan executions
    scans_executed: AtomicU64,
    /// Aborted scan executions
    scans_failed: AtomicU64,
    /// Candidate rows fetched from cursors
    rows_scanned: AtomicU64,
    /// Rows delivered to a sink
    rows_emitted: AtomicU64,
    /// Rows appended through the inline insert route
    rows_inserted: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment successful scan executions
    pub fn increment_scans_executed(&self) {
        self.scans_executed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment aborted scan executions
    pub fn increment_scans_failed(&self) {
        self.scans_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Add candidate rows fetched during one execution
    pub fn add_rows_scanned(&self, rows: u64) {
        self.rows_scanned.fetch_add(rows, Ordering::Relaxed);
    }

    /// Add rows delivered to a sink during one execution
    pub fn add_rows_emitted(&self, rows: u64) {
        self.rows_emitted.fetch_add(rows, Ordering::Relaxed);
    }

    /// Increment rows appended through the inline insert route
    pub fn increment_rows_inserted(&self) {
        self.rows_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get successful scan executions
    pub fn scans_executed(&self) -> u64 {
        self.scans_executed.load(Ordering::Relaxed)
    }

    /// Get aborted scan executions
    pub fn scans_failed(&self) -> u64 {
        self.scans_failed.load(Ordering::Relaxed)
    }

    /// Get candidate rows fetched
    pub fn rows_scanned(&self) -> u64 {
        self.rows_scanned.load(Ordering::Relaxed)
    }

    /// Get rows delivered to sinks
    pub fn rows_emitted(&self) -> u64 {
        self.rows_emitted.load(Ordering::Relaxed)
    }

    /// Get rows appended through the inline insert route
    pub fn rows_inserted(&self) -> u64 {
        self.rows_inserted.load(Ordering::Relaxed)
    }
}
