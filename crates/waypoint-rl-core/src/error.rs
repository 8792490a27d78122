//! Error types for waypoint-rl

use thiserror::Error;

/// Result type for waypoint-rl operations
pub type Result<T> = std::result::Result<T, TrajRLError>;

/// waypoint-rl error types
#[derive(Debug, Error)]
pub enum TrajRLError {
    /// Step called before the first reset
    #[error("Episode not started, call reset first")]
    NotReset,

    /// Episode already terminated
    #[error("Episode terminated, call reset")]
    EpisodeTerminated,

    /// Construction or configuration rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Action does not match the action space
    #[error("Action not in action space: {0}")]
    ActionSpaceViolation(String),

    /// Failure reported by the flight environment
    #[error("Environment error: {0}")]
    Environment(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for TrajRLError {
    fn from(err: serde_json::Error) -> Self {
        TrajRLError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for TrajRLError {
    fn from(err: std::io::Error) -> Self {
        TrajRLError::Io(err.to_string())
    }
}
