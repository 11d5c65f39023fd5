//! Shared surface of the typed collection clients.
//!
//! A typed client wraps a [`ResourceClient`] and only has to say how engine
//! failures become its own error type; `get`, `list` and `delete` come for free.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Default record operations for a typed client.
///
/// # Example
///
/// ```rust
/// use collection_actor::{ActorClient, ActorEntity, FrameworkError, Records, ResourceClient};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Loaf { id: u32 }
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct LoafError(String);
///
/// impl From<String> for LoafError {
///     fn from(s: String) -> Self { LoafError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Loaf {
///     type Id = u32;
///     type Create = ();
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = LoafError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: ()) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn handle_action(_: (), _: &mut Records<Self>, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct LoafClient {
///     inner: ResourceClient<Loaf>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Loaf> for LoafClient {
///     type Error = LoafError;
///
///     fn inner(&self) -> &ResourceClient<Loaf> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         LoafError(e.to_string())
///     }
/// }
///
/// async fn usage(client: LoafClient) {
/// ///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    /// Turns an engine failure into the client's error, usually by recovering
    /// the typed entity error with [`FrameworkError::into_entity`].
    fn map_error(e: FrameworkError) -> Self::Error;

    /// `Ok(None)` when no record has this id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Every record, in stored order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Requesting delete");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
