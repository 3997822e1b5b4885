//! Metric export request builders.

use super::MetricRecord;
use crate::otlp::proto::common::v1::InstrumentationScope;
use crate::otlp::proto::metrics::v1::{
    metric::Data, number_data_point, Gauge, Metric, NumberDataPoint, ResourceMetrics,
    ScopeMetrics,
};
use crate::otlp::proto::resource::v1::Resource;

/// Builds a metrics request with one resource, one scope and one gauge
/// holding a single `f64` data point.
#[must_use]
pub fn metric_request_with_gauge(name: impl Into<String>, value: f64) -> MetricRecord {
    MetricRecord {
        resource_metrics: vec![ResourceMetrics {
            resource: Some(Resource::default()),
            scope_metrics: vec![ScopeMetrics {
                scope: Some(InstrumentationScope::default()),
                metrics: vec![Metric {
                    name: name.into(),
                    data: Some(Data::Gauge(Gauge {
                        data_points: vec![NumberDataPoint {
                            value: Some(number_data_point::Value::AsDouble(value)),
                            ..Default::default()
                        }],
                    })),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

/// Returns the first gauge value of a metric, if it has one.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn gauge_value(metric: &Metric) -> Option<f64> {
    let Some(Data::Gauge(gauge)) = &metric.data else {
        return None;
    };
    match gauge.data_points.first()?.value.as_ref()? {
        number_data_point::Value::AsDouble(v) => Some(*v),
        number_data_point::Value::AsInt(v) => Some(*v as f64),
    }
}
