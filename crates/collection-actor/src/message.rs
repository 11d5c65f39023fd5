//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the lifecycle of an immutable record plus a custom
/// `Action` for collection-specific logic:
///
/// - **Create**: Uses [`ActorEntity::Create`] to append a new record.
/// - **Get**: Fetches one record by ID.
/// - **List**: Fetches the whole collection in stored order.
/// - **Delete**: Removes one record by ID.
/// - **Action**: Executes a custom [`ActorEntity::Action`] against the whole collection.
///
/// This type is generic over `T: ActorEntity`, so you can't send a bread-type
/// payload to the order actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
