//! Trace export request builders.

use super::TraceRecord;
use crate::otlp::proto::common::v1::InstrumentationScope;
use crate::otlp::proto::resource::v1::Resource;
use crate::otlp::proto::trace::v1::{span::SpanKind, ResourceSpans, ScopeSpans, Span};

/// Trace id used by [`trace_request_with_span`].
pub const SAMPLE_TRACE_ID: [u8; 16] = [
    0x4b, 0xf9, 0x2f, 0x35, 0x77, 0xb3, 0x4d, 0xa6, 0xa3, 0xce, 0x92, 0x9d, 0x0e, 0x0e, 0x47, 0x36,
];

/// Span id used by [`trace_request_with_span`].
pub const SAMPLE_SPAN_ID: [u8; 8] = [0x00, 0xf0, 0x67, 0xaa, 0x0b, 0xa9, 0x02, 0xb7];

/// Builds a trace request with one resource, one scope and one internal span.
#[must_use]
pub fn trace_request_with_span(name: impl Into<String>) -> TraceRecord {
    TraceRecord {
        resource_spans: vec![ResourceSpans {
            resource: Some(Resource::default()),
            scope_spans: vec![ScopeSpans {
                scope: Some(InstrumentationScope::default()),
                spans: vec![Span {
                    trace_id: SAMPLE_TRACE_ID.to_vec(),
                    span_id: SAMPLE_SPAN_ID.to_vec(),
                    name: name.into(),
                    kind: SpanKind::Internal as i32,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}
