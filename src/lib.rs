//! # Bakery Orders
//!
//! > **Order taking for a small bakery, one actor per collection.**
//!
//! An operator defines bread types and baking days with a cap per bread, shares
//! one link per baking day, and customers place small orders against those caps
//! until the ordering deadline.
//!
//! ## Design
//!
//! Each collection (bread types, baking days, order lines) is a flat JSON file
//! owned by exactly one [`ResourceActor`](collection_actor::ResourceActor). An
//! actor reads its collection fresh for every request, decides, and writes it
//! back before taking the next request. Capacity checks and the write that
//! consumes the capacity therefore never interleave with another submission:
//! concurrent orders cannot overbook a bread.
//!
//! ## Module Tour
//!
//! ### 1. The Records ([`model`])
//! Typed records and DTOs: [`BreadType`](model::BreadType),
//! [`BakingDay`](model::BakingDay), [`OrderLine`](model::OrderLine).
//!
//! ### 2. The Actors ([`bread_actor`], [`baking_day_actor`], [`order_actor`])
//! [`ActorEntity`](collection_actor::ActorEntity) implementations. The ordering
//! rules live in the order actor.
//!
//! ### 3. The Interface ([`clients`])
//! Typed clients per collection, and the [`CatalogClient`](clients::CatalogClient)
//! façade for operator and customer operations.
//!
//! ### 4. Rules and Views ([`policy`], [`reporting`], [`clock`])
//! Deadline and quota policy, availability and day summaries, wall-clock access.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`], [`auth`])
//! Configuration loading, operator login, actor wiring, health and shutdown.
//!
//! ## Running the Demo
//!
//! ```bash
//! BAKERY__OPERATOR__PASSWORD=secret RUST_LOG=info cargo run
//! ```

pub mod auth;
pub mod baking_day_actor;
pub mod bread_actor;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod policy;
pub mod reporting;
