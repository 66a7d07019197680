//! Error types for power-tool invocations

use thiserror::Error;

/// Error type for one power-tool invocation
#[derive(Debug, Error)]
pub enum BmcError {
    /// The power tool could not be launched at all
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Waiting for the power tool's exit status failed
    #[error("failed to collect power tool exit status: {0}")]
    Wait(#[source] std::io::Error),
}

/// Result type for power-tool invocations
pub type Result<T> = std::result::Result<T, BmcError>;
