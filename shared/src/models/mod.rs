//! Record models for the three OTLP signals.
//!
//! Records are the OTLP export requests exactly as decoded from the wire.
//! They are plain value types: equality is structural and every field keeps
//! its protobuf default when unset.

pub mod log;
pub mod metric;
pub mod trace;

use crate::otlp::proto::collector::logs::v1::ExportLogsServiceRequest;
use crate::otlp::proto::collector::metrics::v1::ExportMetricsServiceRequest;
use crate::otlp::proto::collector::trace::v1::ExportTraceServiceRequest;
use crate::otlp::proto::metrics::v1::metric::Data;
use crate::otlp::Record;

/// A decoded trace export request.
pub type TraceRecord = ExportTraceServiceRequest;

/// A decoded metrics export request.
pub type MetricRecord = ExportMetricsServiceRequest;

/// A decoded logs export request.
pub type LogRecord = ExportLogsServiceRequest;

/// Counts the leaf items carried by an export request.
pub trait RecordCount {
    /// Returns the number of spans, data points or log records in the request.
    fn item_count(&self) -> usize;
}

impl RecordCount for TraceRecord {
    fn item_count(&self) -> usize {
        self.resource_spans
            .iter()
            .flat_map(|rs| &rs.scope_spans)
            .map(|ss| ss.spans.len())
            .sum()
    }
}

impl RecordCount for MetricRecord {
    fn item_count(&self) -> usize {
        self.resource_metrics
            .iter()
            .flat_map(|rm| &rm.scope_metrics)
            .flat_map(|sm| &sm.metrics)
            .map(|metric| match &metric.data {
                Some(Data::Gauge(g)) => g.data_points.len(),
                Some(Data::Sum(s)) => s.data_points.len(),
                Some(Data::Histogram(h)) => h.data_points.len(),
                Some(Data::ExponentialHistogram(h)) => h.data_points.len(),
                Some(Data::Summary(s)) => s.data_points.len(),
                None => 0,
            })
            .sum()
    }
}

impl RecordCount for LogRecord {
    fn item_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|rl| &rl.scope_logs)
            .map(|sl| sl.log_records.len())
            .sum()
    }
}

impl RecordCount for Record {
    fn item_count(&self) -> usize {
        match self {
            Record::Traces(r) => r.item_count(),
            Record::Metrics(r) => r.item_count(),
            Record::Logs(r) => r.item_count(),
        }
    }
}
