//! Error types for the simulation core

use thiserror::Error;

/// Construction-time validation failures.
///
/// Every variant corresponds to one invalid-parameter condition and carries
/// the offending value(s). None of these can occur once a simulation has been
/// constructed: `run` has no failure paths.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimError {
    #[error("invalid queue capacity {clients}: at least one client must be simulated")]
    InvalidQueueSize { clients: usize },

    #[error("invalid exponential rate lambda = {lambda}: rate must be positive")]
    InvalidExponentialRate { lambda: f64 },

    #[error("invalid triangular bounds (a = {a}, m = {m}, b = {b}): require a <= m <= b and a < b")]
    InvalidTriangularBounds { a: f64, m: f64, b: f64 },
}
