//! OpenTelemetry Protocol (OTLP) support.
//!
//! This module provides the binary wire codec for OTLP/HTTP export requests
//! and the [`SignalKind`] / [`Record`] types used to route them.
//!
//! # Example
//!
//! ```
//! use shared::models::log::log_request_with_body;
//! use shared::otlp::{decode, encode, Record, SignalKind};
//!
//! let record = Record::Logs(log_request_with_body("hello"));
//! let bytes = encode(&record);
//! assert_eq!(decode(&bytes, SignalKind::Logs).unwrap(), record);
//! ```

pub mod codec;
pub mod signal;

pub use codec::{
    decode, decode_logs, decode_metrics, decode_traces, encode, DecodeError,
    CONTENT_TYPE_PROTOBUF,
};
pub use signal::{ParseSignalKindError, Record, SignalKind};

/// Generated protobuf types from the OTLP definitions.
pub use opentelemetry_proto::tonic as proto;
