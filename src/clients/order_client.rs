use crate::model::{BakingDayId, OrderGroupId, OrderLine, OrderSubmission};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the order actor.
///
/// All validation happens inside the actor while it handles `Submit`, so two
/// submissions can never both pass a capacity check against the same snapshot.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<OrderLine>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<OrderLine>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, submission), fields(share_token = %submission.share_token))]
    pub async fn submit(&self, submission: OrderSubmission) -> Result<OrderGroupId, OrderError> {
        debug!(?submission, "submit called");
        info!("Sending submit to actor");
        match self.action(OrderAction::Submit(submission)).await? {
            OrderActionResult::Submitted(group_id) => Ok(group_id),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn lines_for_day(&self, baking_day_id: BakingDayId) -> Result<Vec<OrderLine>, OrderError> {
        debug!("Sending request");
        match self.action(OrderAction::LinesForDay(baking_day_id)).await? {
            OrderActionResult::Lines(lines) => Ok(lines),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn has_ordered(
        &self,
        baking_day_id: BakingDayId,
        customer_name: &str,
    ) -> Result<bool, OrderError> {
        debug!("Sending request");
        let action = OrderAction::HasOrdered {
            baking_day_id,
            customer_name: customer_name.to_string(),
        };
        match self.action(action).await? {
            OrderActionResult::HasOrdered(found) => Ok(found),
            other => Err(unexpected(other)),
        }
    }

    /// Removes all lines of a baking day; returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_baking_day(&self, baking_day_id: BakingDayId) -> Result<usize, OrderError> {
        debug!("Sending request");
        match self.action(OrderAction::PurgeBakingDay(baking_day_id)).await? {
            OrderActionResult::Purged(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    async fn action(&self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        self.inner.perform_action(action).await.map_err(Self::map_error)
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<OrderLine> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<OrderLine> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Storage(err)) => OrderError::StorageUnavailable(err.to_string()),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
