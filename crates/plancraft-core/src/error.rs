//! Error types for Plancraft

use thiserror::Error;

/// Main error type for Plancraft operations
#[derive(Debug, Error)]
pub enum PlancraftError {
    /// Error in solver or schema configuration, raised at build time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Error during score calculation
    #[error("Score calculation error: {0}")]
    ScoreCalculation(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Plancraft operations
pub type Result<T> = std::result::Result<T, PlancraftError>;
