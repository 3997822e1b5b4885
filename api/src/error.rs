//! Error types for the receiver.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::otlp::DecodeError;
use shared::storage::AccumulatorError;
use std::net::SocketAddr;
use thiserror::Error;

/// Reasons an export request is rejected.
///
/// None of these leave a record behind: rejection happens before the append,
/// and a failed append commits nothing.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The declared content type has no decoder.
    #[error("Unsupported content type: {found}")]
    UnsupportedContentType {
        /// The content type the client sent, or `<missing>`.
        found: String,
    },

    /// The body did not decode as the route's export request.
    #[error(transparent)]
    MalformedPayload(#[from] DecodeError),

    /// The accumulator could not take the record.
    #[error("Failed to store record: {0}")]
    InternalFault(#[from] AccumulatorError),
}

impl IngestError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            IngestError::UnsupportedContentType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            IngestError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            IngestError::InternalFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned alongside a rejection.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code.
    pub code: u16,
    /// Error message.
    pub message: String,
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Errors from starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured host and port do not form a socket address.
    #[error("Invalid listen address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    /// Binding the listener failed.
    #[error("Failed to bind to address {addr}: {source}")]
    Bind {
        /// The address we tried to bind.
        addr: SocketAddr,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The server task panicked or was cancelled.
    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
