//! The application façade.
//!
//! `CatalogClient` combines the three collection clients into the operations the
//! operator and the customers perform. Operator operations require an
//! [`OperatorSession`]; customer operations are authorized by the share token
//! alone.

use super::{BakingDayClient, BreadTypeClient, OrderClient};
use crate::auth::OperatorSession;
use crate::baking_day_actor::BakingDayError;
use crate::bread_actor::BreadTypeError;
use crate::clock::{next_weekday, parse_weekday, Clock};
use crate::model::{
    BakingDay, BakingDayCreate, BakingDayId, BreadOption, BreadType, BreadTypeId, OrderGroupId,
    OrderSubmission, ShareToken,
};
use crate::order_actor::OrderError;
use crate::policy::OrderPolicy;
use crate::reporting::{BreadLabels, DayReport, OrderPage, UpcomingDay};
use collection_actor::ActorClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

/// Any error surfaced by a catalog operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error(transparent)]
    BreadType(#[from] BreadTypeError),

    #[error(transparent)]
    BakingDay(#[from] BakingDayError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

impl CatalogError {
    /// True when a collection could not be read or written.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(
            self,
            CatalogError::BreadType(BreadTypeError::StorageUnavailable(_))
                | CatalogError::BakingDay(BakingDayError::StorageUnavailable(_))
                | CatalogError::Order(OrderError::StorageUnavailable(_))
        )
    }
}

#[derive(Clone)]
pub struct CatalogClient {
    breads: BreadTypeClient,
    days: BakingDayClient,
    orders: OrderClient,
    policy: OrderPolicy,
    clock: Arc<dyn Clock>,
}

impl CatalogClient {
    pub fn new(
        breads: BreadTypeClient,
        days: BakingDayClient,
        orders: OrderClient,
        policy: OrderPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            breads,
            days,
            orders,
            policy,
            clock,
        }
    }

    pub fn policy(&self) -> &OrderPolicy {
        &self.policy
    }

    // =========================================================================
    // OPERATOR
    // =========================================================================

    #[instrument(skip(self, _session))]
    pub async fn create_bread_type(
        &self,
        _session: &OperatorSession,
        name: &str,
    ) -> Result<BreadTypeId, CatalogError> {
        Ok(self.breads.create_bread_type(name).await?)
    }

    pub async fn list_bread_types(
        &self,
        _session: &OperatorSession,
    ) -> Result<Vec<BreadType>, CatalogError> {
        Ok(self.breads.list().await?)
    }

    /// Removes the bread type only; menus and orders that reference it keep the
    /// dangling id and show it as "Unknown".
    #[instrument(skip(self, _session))]
    pub async fn delete_bread_type(
        &self,
        _session: &OperatorSession,
        id: BreadTypeId,
    ) -> Result<(), CatalogError> {
        Ok(self.breads.delete(id).await?)
    }

    /// Schedules a baking day on the next `weekday` strictly after today.
    #[instrument(skip(self, _session, options))]
    pub async fn create_baking_day(
        &self,
        _session: &OperatorSession,
        weekday: &str,
        options: Vec<BreadOption>,
    ) -> Result<BakingDayId, CatalogError> {
        let weekday = parse_weekday(weekday).ok_or_else(|| {
            BakingDayError::ValidationError(format!("Unknown weekday: {weekday}"))
        })?;
        let date = next_weekday(self.clock.today(), weekday);
        let id = self
            .days
            .create_baking_day(BakingDayCreate { date, options })
            .await?;
        info!(baking_day_id = %id, %date, "Baking day scheduled");
        Ok(id)
    }

    /// Deletes the baking day, then every order line that belongs to it.
    ///
    /// Once the day is gone its share token no longer resolves, so no new lines
    /// can be added between the two steps. Returns the number of purged lines.
    #[instrument(skip(self, _session))]
    pub async fn delete_baking_day(
        &self,
        _session: &OperatorSession,
        id: BakingDayId,
    ) -> Result<usize, CatalogError> {
        self.days.delete(id.clone()).await?;
        let purged = self.orders.purge_baking_day(id.clone()).await?;
        info!(baking_day_id = %id, purged, "Baking day deleted");
        Ok(purged)
    }

    /// Baking days from today on, earliest first, with bread names.
    pub async fn upcoming_baking_days(
        &self,
        _session: &OperatorSession,
    ) -> Result<Vec<UpcomingDay>, CatalogError> {
        let days = self.days.upcoming(self.clock.today()).await?;
        let labels = self.labels().await?;
        Ok(days
            .into_iter()
            .map(|day| UpcomingDay::build(day, &labels))
            .collect())
    }

    /// All orders of one baking day with availability and totals.
    #[instrument(skip(self, _session))]
    pub async fn day_report(
        &self,
        _session: &OperatorSession,
        id: BakingDayId,
    ) -> Result<DayReport, CatalogError> {
        let day = self
            .days
            .get(id.clone())
            .await?
            .ok_or_else(|| BakingDayError::NotFound(id.to_string()))?;
        let lines = self.orders.lines_for_day(id).await?;
        let labels = self.labels().await?;
        Ok(DayReport::build(day, lines, &labels))
    }

    // =========================================================================
    // CUSTOMER
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn resolve_by_share_token(&self, token: &ShareToken) -> Result<BakingDay, CatalogError> {
        Ok(self
            .days
            .resolve_share_token(token)
            .await?
            .ok_or_else(|| BakingDayError::NotFound(format!("share token {token}")))?)
    }

    /// The order page: menu, live availability and whether ordering is open.
    #[instrument(skip(self))]
    pub async fn order_page(&self, token: &ShareToken) -> Result<OrderPage, CatalogError> {
        let day = self.resolve_by_share_token(token).await?;
        let window = self.policy.window(day.date, self.clock.now());
        let lines = self.orders.lines_for_day(day.id.clone()).await?;
        let labels = self.labels().await?;
        Ok(OrderPage::build(
            day,
            window,
            self.policy.max_loaves_per_order,
            &lines,
            &labels,
        ))
    }

    pub async fn submit_order(&self, submission: OrderSubmission) -> Result<OrderGroupId, CatalogError> {
        Ok(self.orders.submit(submission).await?)
    }

    /// Whether `customer_name` already ordered for the day behind `token`.
    #[instrument(skip(self))]
    pub async fn has_ordered(&self, token: &ShareToken, customer_name: &str) -> Result<bool, CatalogError> {
        let day = self.resolve_by_share_token(token).await?;
        Ok(self.orders.has_ordered(day.id, customer_name).await?)
    }

    async fn labels(&self) -> Result<BreadLabels, CatalogError> {
        Ok(BreadLabels::new(&self.breads.list().await?))
    }
}
