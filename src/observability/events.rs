//! Observable engine events
//!
//! Events are explicit and typed: every loggable occurrence in the engine
//! has one variant here, with a stable name and a default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in the execution engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Catalog
    /// An index was defined
    IndexCreated,
    /// Indexes were rebuilt from the base table
    IndexRebuilt,

    // Scan execution
    /// A scan executor was initialized against a plan
    ScanInitialized,
    /// A scan execution completed
    ScanExecuted,
    /// A scan execution aborted with an error
    ScanFailed,

    // Inline insert route
    /// An inline insert consumer appended a row
    InsertApplied,
    /// An inline insert was rejected by a constraint
    InsertRejected,
}

impl Event {
    /// Returns the stable event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::IndexCreated => "INDEX_CREATED",
            Event::IndexRebuilt => "INDEX_REBUILT",
            Event::ScanInitialized => "SCAN_INITIALIZED",
            Event::ScanExecuted => "SCAN_EXECUTED",
            Event::ScanFailed => "SCAN_FAILED",
            Event::InsertApplied => "INSERT_APPLIED",
            Event::InsertRejected => "INSERT_REJECTED",
        }
    }

    /// Returns the default severity for this event
    pub fn default_severity(&self) -> Severity {
        match self {
            Event::ScanFailed | Event::InsertRejected => Severity::Error,
            Event::ScanInitialized => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
