//! Typed records stored in the three collections, plus their DTOs.
//!
//! The [`ActorEntity`](collection_actor::ActorEntity) implementations live next to
//! each actor (`bread_actor`, `baking_day_actor`, `order_actor`).

pub mod baking_day;
pub mod bread;
pub mod ids;
pub mod order;

pub use baking_day::*;
pub use bread::*;
pub use ids::*;
pub use order::*;
