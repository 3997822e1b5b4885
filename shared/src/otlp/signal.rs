//! Signal kinds and the decoded record envelope.

use crate::models::{LogRecord, MetricRecord, TraceRecord};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the three OTLP telemetry signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Spans, exported as `ExportTraceServiceRequest`.
    Traces,
    /// Metric data points, exported as `ExportMetricsServiceRequest`.
    Metrics,
    /// Log records, exported as `ExportLogsServiceRequest`.
    Logs,
}

impl SignalKind {
    /// All signal kinds, in route order.
    pub const ALL: [SignalKind; 3] = [SignalKind::Traces, SignalKind::Metrics, SignalKind::Logs];

    /// Returns the OTLP/HTTP path this signal is exported to.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            SignalKind::Traces => "/v1/traces",
            SignalKind::Metrics => "/v1/metrics",
            SignalKind::Logs => "/v1/logs",
        }
    }

    /// Returns the lowercase signal name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Traces => "traces",
            SignalKind::Metrics => "metrics",
            SignalKind::Logs => "logs",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a signal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown signal '{0}', expected one of: traces, metrics, logs")]
pub struct ParseSignalKindError(String);

impl FromStr for SignalKind {
    type Err = ParseSignalKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "traces" | "trace" => Ok(SignalKind::Traces),
            "metrics" | "metric" => Ok(SignalKind::Metrics),
            "logs" | "log" => Ok(SignalKind::Logs),
            _ => Err(ParseSignalKindError(s.to_string())),
        }
    }
}

/// A decoded export request for any signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A decoded trace export request.
    Traces(TraceRecord),
    /// A decoded metrics export request.
    Metrics(MetricRecord),
    /// A decoded logs export request.
    Logs(LogRecord),
}

impl Record {
    /// Returns the signal this record belongs to.
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        match self {
            Record::Traces(_) => SignalKind::Traces,
            Record::Metrics(_) => SignalKind::Metrics,
            Record::Logs(_) => SignalKind::Logs,
        }
    }
}

impl From<TraceRecord> for Record {
    fn from(record: TraceRecord) -> Self {
        Record::Traces(record)
    }
}

impl From<MetricRecord> for Record {
    fn from(record: MetricRecord) -> Self {
        Record::Metrics(record)
    }
}

impl From<LogRecord> for Record {
    fn from(record: LogRecord) -> Self {
        Record::Logs(record)
    }
}
