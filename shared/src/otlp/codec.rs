//! Protobuf wire codec for OTLP export requests.
//!
//! Decoding is strict about the wire format but not about content: an empty
//! payload decodes to an empty request, which is a valid export.

use super::signal::{Record, SignalKind};
use crate::models::{LogRecord, MetricRecord, TraceRecord};
use prost::Message;
use thiserror::Error;

/// Content type of binary OTLP/HTTP payloads.
pub const CONTENT_TYPE_PROTOBUF: &str = "application/x-protobuf";

/// Errors that can occur while decoding an OTLP payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a well-formed protobuf message of the expected schema.
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        /// The signal the payload was decoded as.
        kind: SignalKind,
        /// The underlying protobuf error.
        #[source]
        source: prost::DecodeError,
    },
}

impl DecodeError {
    /// Returns the signal the failed payload was decoded as.
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        match self {
            DecodeError::Malformed { kind, .. } => *kind,
        }
    }
}

/// Decodes a payload as an export request of the given signal.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the bytes do not parse.
pub fn decode(bytes: &[u8], kind: SignalKind) -> Result<Record, DecodeError> {
    match kind {
        SignalKind::Traces => decode_traces(bytes).map(Record::Traces),
        SignalKind::Metrics => decode_metrics(bytes).map(Record::Metrics),
        SignalKind::Logs => decode_logs(bytes).map(Record::Logs),
    }
}

/// Decodes an `ExportTraceServiceRequest`.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the bytes do not parse.
pub fn decode_traces(bytes: &[u8]) -> Result<TraceRecord, DecodeError> {
    decode_message(bytes, SignalKind::Traces)
}

/// Decodes an `ExportMetricsServiceRequest`.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the bytes do not parse.
pub fn decode_metrics(bytes: &[u8]) -> Result<MetricRecord, DecodeError> {
    decode_message(bytes, SignalKind::Metrics)
}

/// Decodes an `ExportLogsServiceRequest`.
///
/// # Errors
///
/// Returns [`DecodeError::Malformed`] if the bytes do not parse.
pub fn decode_logs(bytes: &[u8]) -> Result<LogRecord, DecodeError> {
    decode_message(bytes, SignalKind::Logs)
}

fn decode_message<M: Message + Default>(bytes: &[u8], kind: SignalKind) -> Result<M, DecodeError> {
    M::decode(bytes).map_err(|source| DecodeError::Malformed { kind, source })
}

/// Encodes a record into protobuf bytes.
#[must_use]
pub fn encode(record: &Record) -> Vec<u8> {
    match record {
        Record::Traces(request) => request.encode_to_vec(),
        Record::Metrics(request) => request.encode_to_vec(),
        Record::Logs(request) => request.encode_to_vec(),
    }
}
