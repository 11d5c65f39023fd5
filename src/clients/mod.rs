//! Type-safe wrappers around [`ResourceClient`](collection_actor::ResourceClient).

pub mod baking_day_client;
pub mod bread_type_client;
pub mod catalog_client;
pub mod order_client;

pub use baking_day_client::*;
pub use bread_type_client::*;
pub use catalog_client::*;
pub use order_client::*;
