//! Bread type collection: unique names, no custom actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::BreadTypeClient;
use crate::model::{BreadType, BreadTypeId};
use collection_actor::{CollectionStore, ResourceActor};
use std::sync::Arc;

/// Creates a new bread type actor over `store` and its client.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn CollectionStore<BreadType>>,
) -> (ResourceActor<BreadType>, BreadTypeClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, store, BreadTypeId::generate);
    let client = BreadTypeClient::new(generic_client);

    (actor, client)
}
