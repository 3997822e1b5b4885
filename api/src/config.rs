//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::Result;
use std::net::{AddrParseError, SocketAddr};

/// Default OTLP/HTTP port.
pub const DEFAULT_PORT: u16 = 4318;

/// Default cap on request body size (4 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `OTELSINK_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `OTELSINK_PORT`: The port to listen on (default: 4318, `0` picks a free port)
/// - `OTELSINK_MAX_BODY_BYTES`: Largest accepted request body (default: 4 MiB)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `OTELSINK_PORT` is set but cannot be parsed as a valid port number
    /// - `OTELSINK_MAX_BODY_BYTES` is set but cannot be parsed as a size
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("OTELSINK_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("OTELSINK_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?
            .unwrap_or(DEFAULT_PORT);

        let max_body_bytes = std::env::var("OTELSINK_MAX_BODY_BYTES")
            .ok()
            .map(|b| b.parse::<usize>())
            .transpose()?
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        Ok(Self {
            host,
            port,
            max_body_bytes,
        })
    }

    /// Configuration for tests: loopback host and an OS-assigned port.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Self::default()
        }
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
