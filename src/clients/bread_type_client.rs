use crate::bread_actor::BreadTypeError;
use crate::model::{BreadType, BreadTypeCreate, BreadTypeId};
use async_trait::async_trait;
use collection_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the bread type actor.
#[derive(Clone)]
pub struct BreadTypeClient {
    inner: ResourceClient<BreadType>,
}

impl BreadTypeClient {
    pub fn new(inner: ResourceClient<BreadType>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_bread_type(&self, name: &str) -> Result<BreadTypeId, BreadTypeError> {
        debug!("Sending request");
        self.inner
            .create(BreadTypeCreate::new(name))
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<BreadType> for BreadTypeClient {
    type Error = BreadTypeError;

    fn inner(&self) -> &ResourceClient<BreadType> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity::<BreadTypeError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => BreadTypeError::NotFound(id),
            Err(FrameworkError::Storage(err)) => BreadTypeError::StorageUnavailable(err.to_string()),
            Err(other) => BreadTypeError::ActorCommunicationError(other.to_string()),
        }
    }
}
