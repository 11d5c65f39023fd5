//! # Collection Actor
//!
//! This crate provides the building blocks for type-safe actors that each own one
//! persisted collection of records. It follows a **Resource-Oriented Architecture
//! (ROA)** on top of the **Actor Model**: every collection gets the same
//! create/get/list/delete surface plus collection-specific actions, and every
//! collection is owned by exactly one task.
//!
//! ## Why one actor per collection?
//!
//! The stores behind a collection are deliberately dumb: read everything, overwrite
//! everything. Two concurrent read-modify-write cycles against such a store lose
//! updates. Routing every request for a collection through a single actor makes
//! the cycles sequential without locks, transactions or retries.
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - Record type, creation rules, custom actions
//! 2. **Runtime Layer** ([`ResourceActor`]) - Message processing over a [`CollectionStore`]
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - Type-safe communication
//! 4. **Storage Layer** ([`CollectionStore`]) - [`JsonFileStore`] on disk, [`MemoryStore`] for tests
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction
//! time. An actor whose rules need another collection receives that collection's client
//! as its `Context`:
//!
//! ```rust,ignore
//! let (day_actor, day_client) = ResourceActor::<BakingDay>::new(32, day_store, BakingDayId::generate);
//! let (order_actor, order_client) = ResourceActor::<OrderLine>::new(32, order_store, OrderLineId::generate);
//!
//! tokio::spawn(day_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext { baking_days: day_client.clone(), .. }));
//! ```
//!
//! Keep the dependency graph **acyclic**: an actor awaiting a second actor that is
//! itself awaiting the first deadlocks both.
//!
//! ## Testing
//!
//! See the [`mock`] module for `MockClient` and the channel-level helpers.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod records;
pub mod store;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use records::Records;
pub use store::{CollectionStore, JsonFileStore, MemoryStore, StoreError};
