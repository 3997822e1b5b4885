//! Integration tests for trace ingestion.
//!
//! Tests cover:
//! - Ingesting parent and child spans and reading them back unchanged
//! - The content-type gate
//! - Arrival order across sequential exports

use axum::http::StatusCode;
use shared::models::trace::{trace_request_with_span, SAMPLE_SPAN_ID, SAMPLE_TRACE_ID};
use shared::models::TraceRecord;
use shared::otlp::proto::common::v1::{any_value, AnyValue, KeyValue};
use shared::otlp::proto::trace::v1::{
    span::SpanKind, status::StatusCode as SpanStatusCode, Span, Status,
};
use shared::otlp::{encode, Record};

use super::common::{post_bytes, post_record, test_app};

fn string_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(value.to_string())),
        }),
    }
}

#[tokio::test]
async fn test_ingest_parent_and_child_spans() {
    let (app, state) = test_app();

    let mut request = trace_request_with_span("HTTP GET /users");
    let scope_spans = &mut request.resource_spans[0].scope_spans[0];
    scope_spans.spans[0].kind = SpanKind::Server as i32;
    scope_spans.spans[0].start_time_unix_nano = 1_700_000_000_000_000_000;
    scope_spans.spans[0].end_time_unix_nano = 1_700_000_000_150_000_000;
    scope_spans.spans.push(Span {
        trace_id: SAMPLE_TRACE_ID.to_vec(),
        span_id: vec![0x11; 8],
        parent_span_id: SAMPLE_SPAN_ID.to_vec(),
        name: "SELECT * FROM users".to_string(),
        kind: SpanKind::Client as i32,
        attributes: vec![string_attr("db.system", "postgresql")],
        status: Some(Status {
            code: SpanStatusCode::Ok as i32,
            ..Default::default()
        }),
        ..Default::default()
    });

    let (status, body) = post_record(app, request.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let traces = state.traces().snapshot().unwrap();
    assert_eq!(traces, vec![request]);

    let spans = &traces[0].resource_spans[0].scope_spans[0].spans;
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[1].parent_span_id, spans[0].span_id);
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected() {
    let (app, state) = test_app();
    let bytes = encode(&Record::Traces(trace_request_with_span("span")));

    for content_type in ["application/json", "text/plain", "application/octet-stream"] {
        let (status, _) =
            post_bytes(app.clone(), "/v1/traces", content_type, bytes.clone()).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE, "{content_type}");
    }

    assert_eq!(state.traces().len().unwrap(), 0);
}

#[tokio::test]
async fn test_content_type_parameters_are_ignored() {
    let (app, state) = test_app();
    let bytes = encode(&Record::Traces(trace_request_with_span("span")));

    let (status, _) = post_bytes(
        app,
        "/v1/traces",
        "application/x-protobuf; charset=utf-8",
        bytes,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.traces().len().unwrap(), 1);
}

#[tokio::test]
async fn test_sequential_traces_keep_post_order() {
    let (app, state) = test_app();

    let requests: Vec<TraceRecord> = ["first", "second", "third"]
        .into_iter()
        .map(trace_request_with_span)
        .collect();

    for request in &requests {
        let (status, _) = post_record(app.clone(), request.clone()).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(state.traces().snapshot().unwrap(), requests);
}
