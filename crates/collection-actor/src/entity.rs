//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract that every record type (bread types,
//! baking days, order lines, …) must implement to be managed by the generic
//! `ResourceActor`. It specifies associated types for IDs, DTOs, actions, context and
//! errors, and provides lifecycle hooks (`on_create`, `on_delete`, `handle_action`).
//!
//! # Architecture Note
//! By defining a contract (`ActorEntity`) that all our record types must satisfy, we
//! write the `ResourceActor` logic *once* and reuse it for every collection.
//!
//! Records are immutable once stored, so there is no update hook. Everything that
//! is not create/get/list/delete goes through a collection-level **Action**, which
//! sees the whole record set. That is where cross-record rules live (uniqueness,
//! capacity, cascades).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! You do **not** need to implement these unless you want to customize behavior.
//! The default implementation does nothing (`Ok(())`).

use crate::records::Records;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any record type must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks (e.g., calling
/// other actors). The `Context` type is injected into every hook, which allows "Late
/// Binding" of dependencies (passing clients to `run()` instead of `new()`).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The unique identifier for this record.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new record (DTO - Data Transfer Object).
    type Create: Send + Sync + Debug;

    /// Enum representing collection-specific operations (e.g., `PurgeBakingDay`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients deal with a single
    /// error type, at the cost of some variants being impossible for some actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Construct the full record from the ID and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is constructed and before it is stored.
    ///
    /// `existing` is the collection as it stands, so uniqueness rules can be enforced here.
    async fn on_create(
        &mut self,
        _existing: &[Self],
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called immediately before the record is removed from the collection.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a collection-specific action against the freshly loaded records.
    ///
    /// Any mutation made through `records` is persisted once the handler returns `Ok`.
    /// On `Err` nothing is written.
    async fn handle_action(
        action: Self::Action,
        records: &mut Records<Self>,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
