//! Log export request builders.

use super::LogRecord;
use crate::otlp::proto::common::v1::{any_value, AnyValue, InstrumentationScope};
use crate::otlp::proto::logs::v1::{LogRecord as OtlpLogRecord, ResourceLogs, ScopeLogs};
use crate::otlp::proto::resource::v1::Resource;

/// Builds a logs request with one resource, one scope and one log record
/// whose body is the given string.
///
/// Every other field keeps its protobuf default.
///
/// # Example
///
/// ```
/// use shared::models::log::{log_request_with_body, string_body};
///
/// let request = log_request_with_body("Starting transaction");
/// let log = &request.resource_logs[0].scope_logs[0].log_records[0];
/// assert_eq!(string_body(log), Some("Starting transaction"));
/// ```
#[must_use]
pub fn log_request_with_body(body: impl Into<String>) -> LogRecord {
    LogRecord {
        resource_logs: vec![ResourceLogs {
            resource: Some(Resource::default()),
            scope_logs: vec![ScopeLogs {
                scope: Some(InstrumentationScope::default()),
                log_records: vec![OtlpLogRecord {
                    body: Some(AnyValue {
                        value: Some(any_value::Value::StringValue(body.into())),
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

/// Returns the body of a log record if it is a string value.
#[must_use]
pub fn string_body(log: &OtlpLogRecord) -> Option<&str> {
    match log.body.as_ref()?.value.as_ref()? {
        any_value::Value::StringValue(s) => Some(s),
        _ => None,
    }
}
