//! Error types for statistics and export

use thiserror::Error;

/// Errors surfaced by the statistics engine and its exporters.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A percent error was requested against a theoretical moment of zero.
    #[error("percent error undefined: theoretical value is zero")]
    UndefinedPercentError,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
