//! Baking day collection: menus, share tokens and token resolution.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::BakingDayClient;
use crate::model::{BakingDay, BakingDayId};
use collection_actor::{CollectionStore, ResourceActor};
use std::sync::Arc;

/// Creates a new baking day actor over `store` and its client.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn CollectionStore<BakingDay>>,
) -> (ResourceActor<BakingDay>, BakingDayClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, store, BakingDayId::generate);
    let client = BakingDayClient::new(generic_client);

    (actor, client)
}
