use crate::baking_day_actor::{BakingDayAction, BakingDayActionResult, BakingDayError};
use crate::model::{BakingDay, BakingDayCreate, BakingDayId, ShareToken};
use async_trait::async_trait;
use chrono::NaiveDate;
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the baking day actor.
#[derive(Clone)]
pub struct BakingDayClient {
    inner: ResourceClient<BakingDay>,
}

impl BakingDayClient {
    pub fn new(inner: ResourceClient<BakingDay>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_baking_day(
        &self,
        params: BakingDayCreate,
    ) -> Result<BakingDayId, BakingDayError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// `Ok(None)` when no baking day carries `token`.
    #[instrument(skip(self))]
    pub async fn resolve_share_token(
        &self,
        token: &ShareToken,
    ) -> Result<Option<BakingDay>, BakingDayError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(BakingDayAction::ResolveShareToken(token.clone()))
            .await
            .map_err(Self::map_error)?
        {
            BakingDayActionResult::Resolved(day) => Ok(day),
            other => Err(unexpected(other)),
        }
    }

    /// Baking days dated `from` or later, earliest first.
    #[instrument(skip(self))]
    pub async fn upcoming(&self, from: NaiveDate) -> Result<Vec<BakingDay>, BakingDayError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(BakingDayAction::Upcoming { from })
            .await
            .map_err(Self::map_error)?
        {
            BakingDayActionResult::Upcoming(days) => Ok(days),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: BakingDayActionResult) -> BakingDayError {
    BakingDayError::ActorCommunicationError(format!("Unexpected action result: {result:?}"))
}

#[async_trait]
impl ActorClient<BakingDay> for BakingDayClient {
    type Error = BakingDayError;

    fn inner(&self) -> &ResourceClient<BakingDay> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<BakingDayError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => BakingDayError::NotFound(id),
            Err(FrameworkError::Storage(err)) => BakingDayError::StorageUnavailable(err.to_string()),
            Err(other) => BakingDayError::ActorCommunicationError(other.to_string()),
        }
    }
}
