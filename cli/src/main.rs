//! otelsink CLI
//!
//! Command-line helper for producing and inspecting OTLP/HTTP protobuf
//! payloads, e.g. to exercise a receiver with curl.
//!
//! # Usage
//!
//! ```bash
//! otelsink encode logs --text "Starting transaction" --output log.bin
//! curl -H 'Content-Type: application/x-protobuf' --data-binary @log.bin \
//!     http://localhost:4318/v1/logs
//! otelsink decode logs log.bin
//! ```

#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use shared::models::log::log_request_with_body;
use shared::models::metric::metric_request_with_gauge;
use shared::models::trace::trace_request_with_span;
use shared::models::RecordCount;
use shared::otlp::{self, Record, SignalKind};
use std::io::Write;
use std::path::PathBuf;

/// otelsink CLI - encode and decode OTLP/HTTP protobuf payloads
#[derive(Parser)]
#[command(name = "otelsink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a minimal export request as protobuf
    Encode {
        /// Signal to build a request for (traces, metrics, logs)
        signal: SignalKind,

        /// Log body, span name, or metric name
        #[arg(short, long)]
        text: String,

        /// Gauge value, for metrics
        #[arg(long, default_value_t = 1.0)]
        value: f64,

        /// File to write to (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a protobuf export request and print it as JSON
    Decode {
        /// Signal the payload was exported as (traces, metrics, logs)
        signal: SignalKind,

        /// File holding the payload
        input: PathBuf,
    },
}

/// Builds the minimal request for a signal.
fn build_record(signal: SignalKind, text: &str, value: f64) -> Record {
    match signal {
        SignalKind::Traces => Record::Traces(trace_request_with_span(text)),
        SignalKind::Metrics => Record::Metrics(metric_request_with_gauge(text, value)),
        SignalKind::Logs => Record::Logs(log_request_with_body(text)),
    }
}

/// Decodes a payload and renders it as pretty JSON.
fn decode_to_json(bytes: &[u8], signal: SignalKind) -> anyhow::Result<String> {
    let record = otlp::decode(bytes, signal)?;
    tracing::debug!(%signal, items = record.item_count(), "Decoded payload");

    let json = match &record {
        Record::Traces(r) => serde_json::to_string_pretty(r)?,
        Record::Metrics(r) => serde_json::to_string_pretty(r)?,
        Record::Logs(r) => serde_json::to_string_pretty(r)?,
    };
    Ok(json)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Encode {
            signal,
            text,
            value,
            output,
        }) => {
            let bytes = otlp::encode(&build_record(signal, &text, value));
            match output {
                Some(path) => std::fs::write(&path, &bytes)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => std::io::stdout().lock().write_all(&bytes)?,
            }
            tracing::info!(%signal, bytes = bytes.len(), "Encoded payload");
        }
        Some(Commands::Decode { signal, input }) => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            println!("{}", decode_to_json(&bytes, signal)?);
        }
        None => {
            println!("otelsink CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
