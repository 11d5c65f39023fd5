//! Error types for the order actor.

use crate::baking_day_actor::BakingDayError;
use crate::model::BreadTypeId;
use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while taking or querying orders.
///
/// Every rejection is recoverable and meant to be shown to the customer, except
/// `StorageUnavailable` and `ActorCommunicationError`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// Unknown share token or baking day.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Ordering for this baking day closed at `deadline`.
    #[error("Ordering closed at {deadline}")]
    WindowClosed { deadline: NaiveDateTime },

    /// This customer already ordered for this baking day.
    #[error("{0} has already ordered for this baking day")]
    DuplicateCustomer(String),

    /// Missing name, contact or lines, or a bread type the day does not offer.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// More loaves than one order may contain.
    #[error("Too many loaves: requested {requested}, at most {limit} per order")]
    QuotaExceeded { requested: u32, limit: u32 },

    /// Not enough of one bread type left.
    #[error("Not enough {bread_type_id} left: requested {requested}, available {available}")]
    CapacityExceeded {
        bread_type_id: BreadTypeId,
        requested: u32,
        available: u32,
    },

    /// The order or baking day collection could not be read or written.
    #[error("Order storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<BakingDayError> for OrderError {
    fn from(err: BakingDayError) -> Self {
        match err {
            BakingDayError::NotFound(what) => OrderError::NotFound(what),
            BakingDayError::ValidationError(msg) => OrderError::ValidationError(msg),
            BakingDayError::StorageUnavailable(msg) => OrderError::StorageUnavailable(msg),
            BakingDayError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
        }
    }
}
