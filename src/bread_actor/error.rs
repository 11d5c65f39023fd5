//! Error types for the bread type actor.

use thiserror::Error;

/// Errors that can occur during bread type operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BreadTypeError {
    /// The requested bread type was not found.
    #[error("Bread type not found: {0}")]
    NotFound(String),

    /// A bread type with exactly this name already exists.
    #[error("Bread type already exists: {0}")]
    DuplicateName(String),

    /// The submitted data is invalid (e.g. an empty name).
    #[error("Bread type validation error: {0}")]
    ValidationError(String),

    /// The bread type collection could not be read or written.
    #[error("Bread type storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for BreadTypeError {
    fn from(msg: String) -> Self {
        BreadTypeError::ActorCommunicationError(msg)
    }
}
