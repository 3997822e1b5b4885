//! otelsink API Server
//!
//! This crate provides the OTLP/HTTP receiver used to verify what an
//! OpenTelemetry Collector forwards. Export requests for traces, metrics and
//! logs are decoded and kept in memory until the owner resets them.
//!
//! # Architecture
//!
//! The receiver is built on Axum and Tokio, providing:
//! - OTLP/HTTP endpoints (`/v1/traces`, `/v1/metrics`, `/v1/logs`)
//! - A health endpoint reporting readiness and per-signal export counts
//! - A [`ReceiverState`] owning one accumulator per signal
//!
//! # Example
//!
//! ```no_run
//! use api::{spawn_server, Config, ReceiverState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = spawn_server(Config::ephemeral(), ReceiverState::new()).await?;
//!     println!("export to http://{}", server.addr());
//!
//!     // ... drive a collector at the receiver, then inspect:
//!     let logs = server.state().logs().snapshot()?;
//!     println!("received {} log exports", logs.len());
//!
//!     server.state().reset_all()?;
//!     server.shutdown().await?;
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod routes;
mod state;

pub use config::Config;
pub use error::{ErrorBody, IngestError, ServerError};
pub use state::ReceiverState;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use shared::otlp::SignalKind;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Runs the otelsink receiver.
///
/// This function initializes the server with configuration from environment variables
/// and starts listening for incoming connections. It handles graceful shutdown on
/// SIGTERM/SIGINT signals.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The server fails to bind to the configured address
/// - A fatal error occurs during operation
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    run_server_with_config(config).await
}

/// Runs the otelsink receiver with the provided configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The configured address is invalid or cannot be bound
/// - A fatal error occurs during operation
pub async fn run_server_with_config(config: Config) -> Result<()> {
    let state = ReceiverState::new();
    let (listener, addr) = bind(&config).await?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        max_body_bytes = config.max_body_bytes,
        "otelsink receiver starting"
    );
    tracing::info!(%addr, "Listening for connections");

    axum::serve(listener, create_router_with_config(state.clone(), &config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log_totals(&state);
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Starts the receiver in a background task.
///
/// Port `0` binds an OS-assigned port; [`ServerHandle::addr`] reports the
/// actual address. The handle shares `state` with the server.
///
/// # Errors
///
/// Returns an error if the configured address is invalid or cannot be bound.
pub async fn spawn_server(
    config: Config,
    state: ReceiverState,
) -> Result<ServerHandle, ServerError> {
    let (listener, addr) = bind(&config).await?;
    let app = create_router_with_config(state.clone(), &config);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .map_err(ServerError::Serve)
    });

    tracing::info!(%addr, "otelsink receiver started");

    Ok(ServerHandle {
        state,
        addr,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

async fn bind(config: &Config) -> Result<(TcpListener, SocketAddr), ServerError> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let bound = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;
    Ok((listener, bound))
}

/// A handle to a receiver running in the background.
///
/// Dropping the handle signals the server to shut down.
pub struct ServerHandle {
    state: ReceiverState,
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
}

impl std::fmt::Debug for ServerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerHandle")
            .field("addr", &self.addr)
            .finish_non_exhaustive()
    }
}

impl ServerHandle {
    /// Returns the address the server is listening on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the state the server appends to.
    #[must_use]
    pub fn state(&self) -> &ReceiverState {
        &self.state
    }

    /// Returns the base URL of the receiver, e.g. `http://127.0.0.1:4318`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Gracefully shuts down the server and waits for it to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the server failed or its task panicked.
    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.task.take() {
            Some(task) => task.await?,
            None => Ok(()),
        }
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Creates the application router with default limits.
///
/// This function is public to allow testing the router without starting a full server.
pub fn create_router(state: ReceiverState) -> Router {
    create_router_with_config(state, &Config::default())
}

/// Creates the application router with all routes and middleware.
pub fn create_router_with_config(state: ReceiverState, config: &Config) -> Router {
    Router::new()
        .merge(routes::health_routes(state.clone()))
        .merge(routes::otlp_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

fn log_totals(state: &ReceiverState) {
    for kind in SignalKind::ALL {
        match state.len(kind) {
            Ok(count) => tracing::info!(signal = %kind, count, "Exports received"),
            Err(e) => tracing::warn!(signal = %kind, error = %e, "Could not count exports"),
        }
    }
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
