//! OTLP HTTP receiver endpoints.
//!
//! Implements the OpenTelemetry Protocol HTTP endpoints for ingesting logs,
//! metrics, and traces encoded as binary protobuf (`application/x-protobuf`).
//! Every accepted export is appended whole to the matching accumulator and
//! answered with `200 OK` and an empty body.
//!
//! # Endpoints
//!
//! - `POST /v1/logs` - Ingest OTLP logs
//! - `POST /v1/metrics` - Ingest OTLP metrics
//! - `POST /v1/traces` - Ingest OTLP traces

use crate::error::IngestError;
use crate::state::ReceiverState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use shared::models::RecordCount;
use shared::otlp::{self, DecodeError, Record, SignalKind, CONTENT_TYPE_PROTOBUF};

/// Decodes a request body as the export request of a signal.
type Decoder = fn(&[u8], SignalKind) -> Result<Record, DecodeError>;

/// Content types accepted on every OTLP route, with the decoder for each.
///
/// Anything not listed is rejected with `415 Unsupported Media Type`.
const DECODERS: &[(&str, Decoder)] = &[(CONTENT_TYPE_PROTOBUF, otlp::decode)];

/// Creates the OTLP routes with receiver state.
pub fn otlp_routes(state: ReceiverState) -> Router {
    Router::new()
        .route(SignalKind::Logs.path(), post(ingest_logs))
        .route(SignalKind::Metrics.path(), post(ingest_metrics))
        .route(SignalKind::Traces.path(), post(ingest_traces))
        .with_state(state)
}

/// Looks up the decoder for the request's declared content type.
///
/// Media types compare case-insensitively and parameters such as `charset`
/// are ignored.
fn decoder_for(headers: &HeaderMap) -> Result<Decoder, IngestError> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        return Err(IngestError::UnsupportedContentType {
            found: "<missing>".to_string(),
        });
    };

    let content_type = value.to_str().unwrap_or_default();
    let media_type = content_type.split(';').next().unwrap_or_default().trim();

    DECODERS
        .iter()
        .find(|(accepted, _)| accepted.eq_ignore_ascii_case(media_type))
        .map(|(_, decoder)| *decoder)
        .ok_or_else(|| IngestError::UnsupportedContentType {
            found: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        })
}

/// Decodes one export request and appends it to the signal's accumulator.
fn ingest(
    kind: SignalKind,
    state: &ReceiverState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<StatusCode, IngestError> {
    let result = decoder_for(headers)
        .and_then(|decoder| Ok(decoder(&body[..], kind)?))
        .and_then(|record| {
            let items = record.item_count();
            state.append(record)?;
            Ok(items)
        });

    match result {
        Ok(items) => {
            tracing::debug!(signal = %kind, items, bytes = body.len(), "Accepted OTLP export");
            Ok(StatusCode::OK)
        }
        Err(e) => {
            if matches!(e, IngestError::InternalFault(_)) {
                tracing::error!(signal = %kind, error = %e, "Failed to store OTLP export");
            } else {
                tracing::warn!(signal = %kind, error = %e, "Rejected OTLP export");
            }
            Err(e)
        }
    }
}

/// Handler for OTLP logs ingestion.
///
/// Accepts `ExportLogsServiceRequest` in protobuf format.
async fn ingest_logs(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, IngestError> {
    ingest(SignalKind::Logs, &state, &headers, &body)
}

/// Handler for OTLP metrics ingestion.
///
/// Accepts `ExportMetricsServiceRequest` in protobuf format.
async fn ingest_metrics(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, IngestError> {
    ingest(SignalKind::Metrics, &state, &headers, &body)
}

/// Handler for OTLP traces ingestion.
///
/// Accepts `ExportTraceServiceRequest` in protobuf format.
async fn ingest_traces(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, IngestError> {
    ingest(SignalKind::Traces, &state, &headers, &body)
}
