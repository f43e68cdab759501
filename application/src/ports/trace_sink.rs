//! Port for structured trace logging.
//!
//! Defines the [`TraceSink`] trait for recording per-problem traces
//! (candidate texts, winning key, agreement) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the machine-readable
//! record used for offline inspection (JSONL).

use serde_json::Value;

/// A structured trace event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; the sink adds its own timestamp.
pub struct TraceEvent {
    /// Event type identifier (e.g., "problem_trace")
    pub event_type: &'static str,
    /// JSON payload with event-specific data
    pub payload: Value,
}

impl TraceEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording trace events.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). `record` is intentionally synchronous and non-fallible so trace
/// logging can never disrupt the main flow — write failures are dropped.
pub trait TraceSink: Send + Sync {
    /// Record a trace event.
    fn record(&self, event: TraceEvent);
}

/// No-op implementation for tests and when tracing is disabled.
pub struct NoTraceSink;

impl TraceSink for NoTraceSink {
    fn record(&self, _event: TraceEvent) {}
}
