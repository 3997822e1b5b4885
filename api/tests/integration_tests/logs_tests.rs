//! Integration tests for log ingestion.
//!
//! Tests cover:
//! - The forwarded-log example with every nested field checked
//! - Arrival order across sequential exports
//! - Malformed payloads leaving the accumulator untouched

use axum::http::StatusCode;
use shared::models::log::{log_request_with_body, string_body};
use shared::models::LogRecord;
use shared::otlp::proto::common::v1::{any_value, AnyValue, InstrumentationScope, KeyValue};
use shared::otlp::proto::logs::v1::{LogRecord as OtlpLogRecord, ResourceLogs, ScopeLogs};
use shared::otlp::proto::resource::v1::Resource;
use shared::otlp::CONTENT_TYPE_PROTOBUF;

use super::common::{post_bytes, post_record, test_app};

const MESSAGE: &str = "Starting transaction for session X";

#[tokio::test]
async fn test_ingest_single_log_end_to_end() {
    let (app, state) = test_app();

    let (status, body) = post_record(app, log_request_with_body(MESSAGE)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let logs = state.logs().snapshot().unwrap();
    assert_eq!(logs.len(), 1);

    let resource_logs = &logs[0].resource_logs;
    assert_eq!(resource_logs.len(), 1);
    assert_eq!(resource_logs[0].resource, Some(Resource::default()));
    assert!(resource_logs[0].schema_url.is_empty());

    let scope_logs = &resource_logs[0].scope_logs;
    assert_eq!(scope_logs.len(), 1);
    assert_eq!(scope_logs[0].scope, Some(InstrumentationScope::default()));

    let records = &scope_logs[0].log_records;
    assert_eq!(records.len(), 1);
    assert_eq!(string_body(&records[0]), Some(MESSAGE));

    let expected = OtlpLogRecord {
        body: Some(AnyValue {
            value: Some(any_value::Value::StringValue(MESSAGE.to_string())),
        }),
        ..Default::default()
    };
    assert_eq!(records[0], expected);
}

#[tokio::test]
async fn test_ingest_log_as_forwarded_by_collector() {
    let (app, state) = test_app();

    // Shape of a log after a collector parsed the raw line into fields.
    let forwarded = LogRecord {
        resource_logs: vec![ResourceLogs {
            resource: Some(Resource::default()),
            scope_logs: vec![ScopeLogs {
                scope: Some(InstrumentationScope::default()),
                log_records: vec![OtlpLogRecord {
                    time_unix_nano: 1_468_281_402_000_000_000,
                    observed_time_unix_nano: 1_468_281_402_000_000_000,
                    severity_text: "INFO".to_string(),
                    body: Some(AnyValue {
                        value: Some(any_value::Value::StringValue(MESSAGE.to_string())),
                    }),
                    attributes: vec![KeyValue {
                        key: "class".to_string(),
                        value: Some(AnyValue {
                            value: Some(any_value::Value::StringValue(
                                "MySecretApp.com.Transaction.Manager".to_string(),
                            )),
                        }),
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    };

    let (status, _) = post_record(app, forwarded.clone()).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(state.logs().snapshot().unwrap(), vec![forwarded]);
}

#[tokio::test]
async fn test_sequential_logs_keep_post_order() {
    let (app, state) = test_app();

    let requests: Vec<LogRecord> = (0..5)
        .map(|i| log_request_with_body(format!("message {i}")))
        .collect();

    for request in &requests {
        let (status, _) = post_record(app.clone(), request.clone()).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert_eq!(state.logs().snapshot().unwrap(), requests);
}

#[tokio::test]
async fn test_malformed_log_is_inert() {
    let (app, state) = test_app();

    let (status, _) = post_record(app.clone(), log_request_with_body("kept")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post_bytes(
        app,
        "/v1/logs",
        CONTENT_TYPE_PROTOBUF,
        b"not a protobuf payload".to_vec(),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.logs().len().unwrap(), 1);
    assert_eq!(state.traces().len().unwrap(), 0);
    assert_eq!(state.metrics().len().unwrap(), 0);
}
