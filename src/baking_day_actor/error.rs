//! Error types for the baking day actor.

use thiserror::Error;

/// Errors that can occur during baking day operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BakingDayError {
    /// No baking day has this id or share token.
    #[error("Baking day not found: {0}")]
    NotFound(String),

    /// The submitted data is invalid (unknown weekday, empty menu, zero cap).
    #[error("Baking day validation error: {0}")]
    ValidationError(String),

    /// The baking day collection could not be read or written.
    #[error("Baking day storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for BakingDayError {
    fn from(msg: String) -> Self {
        BakingDayError::ActorCommunicationError(msg)
    }
}
