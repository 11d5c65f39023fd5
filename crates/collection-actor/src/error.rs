//! # Framework Errors
//!
//! This module defines the common error types used throughout the actor framework.
//! By centralizing error definitions, we ensure consistent error handling across
//! all actors and clients.

use crate::store::StoreError;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl FrameworkError {
    /// Recovers the entity's own error type from an [`FrameworkError::EntityError`].
    ///
    /// Returns the original error untouched when it is not an entity error or
    /// when the boxed error is of a different type, so callers can fall through
    /// to their own mapping.
    pub fn into_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("sold out")]
    struct SoldOut;

    #[test]
    fn test_into_entity_recovers_typed_error() {
        let err = FrameworkError::EntityError(Box::new(SoldOut));
        assert_eq!(err.into_entity::<SoldOut>().unwrap(), SoldOut);
    }

    #[test]
    fn test_into_entity_passes_other_errors_through() {
        let err = FrameworkError::NotFound("day_1".into());
        assert!(matches!(
            err.into_entity::<SoldOut>(),
            Err(FrameworkError::NotFound(id)) if id == "day_1"
        ));

        let foreign = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            foreign.into_entity::<SoldOut>(),
            Err(FrameworkError::EntityError(_))
        ));
    }
}
