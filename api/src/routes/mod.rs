//! API route definitions.
//!
//! This module organizes all HTTP routes for the otelsink receiver.

mod health;
mod otlp;

pub use health::health_routes;
pub use otlp::otlp_routes;
