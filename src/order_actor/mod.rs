//! Order line collection: submission rules and per-day queries.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{BakingDayClient, OrderClient};
use crate::clock::Clock;
use crate::model::{OrderLine, OrderLineId};
use crate::policy::OrderPolicy;
use collection_actor::{CollectionStore, ResourceActor};
use std::sync::Arc;

/// Dependencies injected into the order actor at `run()`.
///
/// The order actor calls the baking day actor, never the other way round.
#[derive(Clone)]
pub struct OrderContext {
    pub baking_days: BakingDayClient,
    pub policy: OrderPolicy,
    pub clock: Arc<dyn Clock>,
}

/// Creates a new order actor over `store` and its client.
pub fn new(
    buffer_size: usize,
    store: Arc<dyn CollectionStore<OrderLine>>,
) -> (ResourceActor<OrderLine>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size, store, OrderLineId::generate);
    let client = OrderClient::new(generic_client);

    (actor, client)
}
