//! [`ActorEntity`] implementation for [`BreadType`].
//!
//! Bread types have no custom actions; the catalog only creates, lists and
//! deletes them. Deleting one does not touch baking days or orders that still
//! reference it.

use super::BreadTypeError;
use crate::model::{BreadType, BreadTypeCreate, BreadTypeId};
use async_trait::async_trait;
use collection_actor::{ActorEntity, Records};
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for BreadType {
    type Id = BreadTypeId;
    type Create = BreadTypeCreate;
    type Action = Infallible;
    type ActionResult = Infallible;
    type Context = ();
    type Error = BreadTypeError;

    fn id(&self) -> &BreadTypeId {
        &self.id
    }

    /// Trims the name; an empty name is rejected.
    fn from_create_params(id: BreadTypeId, params: BreadTypeCreate) -> Result<Self, Self::Error> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(BreadTypeError::ValidationError(
                "Bread type name must not be empty".into(),
            ));
        }
        Ok(Self::new(id, name))
    }

    /// Names are unique, compared case-sensitively.
    async fn on_create(&mut self, existing: &[Self], _ctx: &()) -> Result<(), Self::Error> {
        if existing.iter().any(|bread| bread.name == self.name) {
            return Err(BreadTypeError::DuplicateName(self.name.clone()));
        }
        Ok(())
    }

    async fn handle_action(
        action: Infallible,
        _records: &mut Records<Self>,
        _ctx: &(),
    ) -> Result<Infallible, Self::Error> {
        match action {}
    }
}
