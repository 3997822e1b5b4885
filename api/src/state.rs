//! Receiver state module.
//!
//! Owns the three signal accumulators shared by the ingestion handlers and
//! whoever inspects or resets them.

use shared::models::{LogRecord, MetricRecord, TraceRecord};
use shared::otlp::{Record, SignalKind};
use shared::storage::{Accumulator, AccumulatorError};

/// State shared across all request handlers.
///
/// Cloning is cheap and every clone sees the same accumulators, so a test
/// can keep one handle while the router owns another. Independent instances
/// never share records.
#[derive(Clone, Default)]
pub struct ReceiverState {
    traces: Accumulator<TraceRecord>,
    metrics: Accumulator<MetricRecord>,
    logs: Accumulator<LogRecord>,
}

impl ReceiverState {
    /// Creates a new state with empty accumulators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trace accumulator.
    #[must_use]
    pub fn traces(&self) -> &Accumulator<TraceRecord> {
        &self.traces
    }

    /// Returns the metrics accumulator.
    #[must_use]
    pub fn metrics(&self) -> &Accumulator<MetricRecord> {
        &self.metrics
    }

    /// Returns the logs accumulator.
    #[must_use]
    pub fn logs(&self) -> &Accumulator<LogRecord> {
        &self.logs
    }

    /// Appends a decoded record to the accumulator of its signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the accumulator lock is poisoned; nothing is
    /// appended in that case.
    pub fn append(&self, record: Record) -> Result<(), AccumulatorError> {
        match record {
            Record::Traces(r) => self.traces.append(r),
            Record::Metrics(r) => self.metrics.append(r),
            Record::Logs(r) => self.logs.append(r),
        }
    }

    /// Returns the number of records held for a signal.
    ///
    /// # Errors
    ///
    /// Returns an error if the accumulator lock is poisoned.
    pub fn len(&self, kind: SignalKind) -> Result<usize, AccumulatorError> {
        match kind {
            SignalKind::Traces => self.traces.len(),
            SignalKind::Metrics => self.metrics.len(),
            SignalKind::Logs => self.logs.len(),
        }
    }

    /// Clears every accumulator.
    ///
    /// Each accumulator is cleared atomically on its own; the three clears
    /// are not atomic together, so call this between scenarios rather than
    /// while exports are in flight.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; later accumulators are still
    /// cleared.
    pub fn reset_all(&self) -> Result<(), AccumulatorError> {
        let results = [self.traces.clear(), self.metrics.clear(), self.logs.clear()];
        tracing::debug!("Receiver state reset");
        results.into_iter().collect()
    }
}
