//! otelsink Shared Library
//!
//! This crate contains the OTLP wire codec, record models and in-memory
//! accumulators used by the otelsink receiver and CLI.
//!
//! # Modules
//!
//! - [`models`] - Record types and request builders for traces, metrics and logs
//! - [`otlp`] - Protobuf codec and signal routing types
//! - [`storage`] - Concurrency-safe append-only accumulators
//!
//! # Example
//!
//! ```
//! use shared::models::log::log_request_with_body;
//! use shared::models::LogRecord;
//! use shared::storage::Accumulator;
//!
//! let logs: Accumulator<LogRecord> = Accumulator::new();
//! logs.append(log_request_with_body("User logged in")).unwrap();
//!
//! assert_eq!(logs.len().unwrap(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod otlp;
pub mod storage;

/// Re-export common dependencies for convenience.
pub use prost;
