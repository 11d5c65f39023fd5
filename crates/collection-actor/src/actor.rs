//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns one collection
//! and serializes every read-modify-write against it. It implements the "Server"
//! side of the Actor Model.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::records::Records;
use crate::store::CollectionStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a persisted collection of records.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the receiver end of the
/// channel and is the only writer of its [`CollectionStore`].
///
/// **Concurrency Model**:
/// Each request is handled to completion before the next is received: the
/// collection is read fresh from the store, the decision is made, and the
/// collection is written back if it changed. No other task writes the collection,
/// so checks such as "is there capacity left?" and the write that consumes the
/// capacity can never interleave with another request.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use collection_actor::{ActorEntity, CollectionStore, MemoryStore, Records, ResourceActor};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Loaf { id: String, name: String }
/// #[derive(Debug, thiserror::Error)] #[error("loaf error")] struct LoafError;
///
/// #[async_trait]
/// impl ActorEntity for Loaf {
///     type Id = String;
///     type Create = String;
///     type Action = ();
///     type ActionResult = usize;
///     type Context = ();
///     type Error = LoafError;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(id: String, name: String) -> Result<Self, Self::Error> {
///         Ok(Self { id, name })
///     }
///     async fn handle_action(_: (), records: &mut Records<Self>, _: &()) -> Result<usize, Self::Error> {
///         Ok(records.len())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let store: Arc<dyn CollectionStore<Loaf>> = Arc::new(MemoryStore::new("loaves"));
///     let (actor, client) = ResourceActor::new(10, store, || "loaf_1".to_string());
///     tokio::spawn(actor.run(()));
///
///     let id = client.create("Rye".to_string()).await.unwrap();
///     assert_eq!(id, "loaf_1");
///     assert_eq!(client.perform_action(()).await.unwrap(), 1);
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Arc<dyn CollectionStore<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `store` - The backing collection. The actor must be its only writer.
    /// * `next_id_fn` - Generates the id of each record created through `Create`.
    pub fn new(
        buffer_size: usize,
        store: Arc<dyn CollectionStore<T>>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "OrderLine" instead of "bakery_orders::model::order::OrderLine")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let collection = self.store.name().to_string();
        info!(entity_type, %collection, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = self
                        .load()
                        .await
                        .map(|records| records.find(&id).cloned());
                    if let Ok(item) = &result {
                        debug!(entity_type, %id, found = item.is_some(), "Get");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    let result = self.load().await.map(Records::into_vec);
                    if let Ok(items) = &result {
                        debug!(entity_type, size = items.len(), "List");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let result = self.action(action, &context).await;
                    match &result {
                        Ok(_) => debug!(entity_type, "Action ok"),
                        Err(e) => warn!(entity_type, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, %collection, "Shutdown");
    }

    async fn load(&self) -> Result<Records<T>, FrameworkError> {
        Ok(Records::new(self.store.read_all().await?))
    }

    async fn persist(&self, records: &Records<T>) -> Result<(), FrameworkError> {
        if records.is_dirty() {
            self.store.write_all(records.as_slice()).await?;
        }
        Ok(())
    }

    async fn create(&self, params: T::Create, context: &T::Context) -> Result<T::Id, FrameworkError> {
        let mut records = self.load().await?;
        let id = (self.next_id_fn)();

        let mut item = T::from_create_params(id, params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(records.as_slice(), context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        // on_create may re-key the record (e.g. on an id collision).
        let id = item.id().clone();
        records.push(item);
        self.persist(&records).await?;
        Ok(id)
    }

    async fn delete(&self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let mut records = self.load().await?;
        let Some(item) = records.find(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        item.on_delete(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        records.retain(|record| record.id() != id);
        self.persist(&records).await
    }

    async fn action(
        &self,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut records = self.load().await?;
        let result = T::handle_action(action, &mut records, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        self.persist(&records).await?;
        Ok(result)
    }
}
