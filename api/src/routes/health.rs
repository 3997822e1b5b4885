//! Receiver status endpoint.
//!
//! `GET /health` answers once the listener is up and reports how many
//! exports each accumulator currently holds, so a harness can check both
//! readiness and progress without reaching into the process.

use crate::state::ReceiverState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use shared::otlp::SignalKind;

/// Status reported while every accumulator is readable.
const HEALTHY: &str = "healthy";
/// Status reported once any accumulator lock is poisoned.
const DEGRADED: &str = "degraded";

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when an accumulator can no longer be read.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Exports held per signal.
    pub exports: ExportCounts,
}

/// Per-signal export counts. A signal whose accumulator is unreadable is
/// left out.
#[derive(Debug, Default, Serialize)]
pub struct ExportCounts {
    /// Traces exports held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<usize>,
    /// Metrics exports held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<usize>,
    /// Logs exports held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<usize>,
}

impl ExportCounts {
    fn slot(&mut self, kind: SignalKind) -> &mut Option<usize> {
        match kind {
            SignalKind::Traces => &mut self.traces,
            SignalKind::Metrics => &mut self.metrics,
            SignalKind::Logs => &mut self.logs,
        }
    }
}

/// Creates the health check routes.
pub fn health_routes(state: ReceiverState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check handler.
///
/// Answers `200` with the export counts, or `503` if an accumulator is
/// poisoned.
async fn health_check(
    State(state): State<ReceiverState>,
) -> (StatusCode, Json<HealthResponse>) {
    let mut exports = ExportCounts::default();
    let mut degraded = false;

    for kind in SignalKind::ALL {
        match state.len(kind) {
            Ok(count) => *exports.slot(kind) = Some(count),
            Err(e) => {
                tracing::warn!(signal = %kind, error = %e, "Accumulator unreadable");
                degraded = true;
            }
        }
    }

    let (code, status) = if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, DEGRADED)
    } else {
        (StatusCode::OK, HEALTHY)
    };

    (
        code,
        Json(HealthResponse {
            status,
            service: "otelsink",
            version: env!("CARGO_PKG_VERSION"),
            exports,
        }),
    )
}
