//! [`ActorEntity`] implementation for [`OrderLine`].
//!
//! This is where the ordering rules live. A submission is checked in a fixed
//! order:
//!
//! 1. the share token resolves to a baking day (`NotFound`)
//! 2. the ordering window is open (`WindowClosed`)
//! 3. the customer has not ordered for that day yet, if the policy asks (`DuplicateCustomer`)
//! 4. name, contact and at least one positive line are present, and every
//!    bread type is on the day's menu (`ValidationError`)
//! 5. the total stays within the per-order cap (`QuotaExceeded`)
//! 6. every line fits into what is left of its option (`CapacityExceeded`)
//!
//! Capacity is computed from the lines in the collection at the moment the
//! message is handled, and the accepted lines are written back before the actor
//! takes the next message.

use super::{OrderAction, OrderActionResult, OrderContext, OrderError};
use crate::model::{
    BakingDay, BakingDayId, LineRequest, OrderGroupId, OrderLine, OrderLineId, OrderSubmission,
};
use crate::policy::OrderWindow;
use crate::reporting::ordered_quantity;
use async_trait::async_trait;
use collection_actor::{ActorEntity, Records};
use std::convert::Infallible;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for OrderLine {
    type Id = OrderLineId;
    type Create = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn id(&self) -> &OrderLineId {
        &self.id
    }

    /// Lines are only ever created through [`OrderAction::Submit`].
    fn from_create_params(_id: OrderLineId, params: Infallible) -> Result<Self, Self::Error> {
        match params {}
    }

    async fn handle_action(
        action: OrderAction,
        records: &mut Records<Self>,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Submit(submission) => {
                submit(submission, records, ctx).await.map(OrderActionResult::Submitted)
            }
            OrderAction::LinesForDay(baking_day_id) => Ok(OrderActionResult::Lines(
                records
                    .iter()
                    .filter(|line| line.baking_day_id == baking_day_id)
                    .cloned()
                    .collect(),
            )),
            OrderAction::HasOrdered {
                baking_day_id,
                customer_name,
            } => Ok(OrderActionResult::HasOrdered(has_ordered(
                records.as_slice(),
                &baking_day_id,
                &customer_name,
            ))),
            OrderAction::PurgeBakingDay(baking_day_id) => {
                let purged = records.retain(|line| line.baking_day_id != baking_day_id);
                info!(%baking_day_id, purged, "Purged order lines");
                Ok(OrderActionResult::Purged(purged))
            }
        }
    }
}

async fn submit(
    submission: OrderSubmission,
    records: &mut Records<OrderLine>,
    ctx: &OrderContext,
) -> Result<OrderGroupId, OrderError> {
    let day = ctx
        .baking_days
        .resolve_share_token(&submission.share_token)
        .await?
        .ok_or_else(|| OrderError::NotFound(format!("share token {}", submission.share_token)))?;

    let now = ctx.clock.now();
    if let OrderWindow::Closed { deadline } = ctx.policy.window(day.date, now) {
        return Err(OrderError::WindowClosed { deadline });
    }

    let customer_name = submission.customer_name.trim();
    let customer_contact = submission.customer_contact.trim();

    if ctx.policy.unique_customer_per_day
        && has_ordered(records.as_slice(), &day.id, customer_name)
    {
        return Err(OrderError::DuplicateCustomer(customer_name.to_string()));
    }

    if customer_name.is_empty() {
        return Err(OrderError::ValidationError("Name is required".into()));
    }
    if customer_contact.is_empty() {
        return Err(OrderError::ValidationError("Contact is required".into()));
    }
    let lines = merge_lines(submission.lines);
    if lines.is_empty() {
        return Err(OrderError::ValidationError(
            "At least one bread must be ordered".into(),
        ));
    }
    if let Some(line) = lines.iter().find(|line| day.option(&line.bread_type_id).is_none()) {
        return Err(OrderError::ValidationError(format!(
            "Bread type {} is not offered on {}",
            line.bread_type_id, day.date
        )));
    }

    // Saturates so that oversized lines land in QuotaExceeded instead of wrapping.
    let requested = lines
        .iter()
        .fold(0u32, |total, line| total.saturating_add(line.quantity));
    let limit = ctx.policy.max_loaves_per_order;
    if requested > limit {
        return Err(OrderError::QuotaExceeded { requested, limit });
    }

    check_capacity(&day, &lines, records.as_slice())?;

    let group_id = OrderGroupId::generate();
    records.extend(lines.into_iter().map(|line| OrderLine {
        id: OrderLineId::generate(),
        group_id: group_id.clone(),
        baking_day_id: day.id.clone(),
        customer_name: customer_name.to_string(),
        customer_contact: customer_contact.to_string(),
        bread_type_id: line.bread_type_id,
        quantity: line.quantity,
        created_at: now,
    }));

    info!(%group_id, baking_day_id = %day.id, loaves = requested, "Order accepted");
    Ok(group_id)
}

/// Every line must fit into what is left of its option; nothing is accepted
/// partially.
fn check_capacity(
    day: &BakingDay,
    lines: &[LineRequest],
    existing: &[OrderLine],
) -> Result<(), OrderError> {
    for line in lines {
        let max_quantity = day
            .option(&line.bread_type_id)
            .map(|option| option.max_quantity)
            .unwrap_or(0);
        let ordered = ordered_quantity(existing, &day.id, &line.bread_type_id);
        let available = max_quantity.saturating_sub(ordered);
        debug!(bread_type_id = %line.bread_type_id, ordered, available, requested = line.quantity, "Capacity check");
        if line.quantity > available {
            return Err(OrderError::CapacityExceeded {
                bread_type_id: line.bread_type_id.clone(),
                requested: line.quantity,
                available,
            });
        }
    }
    Ok(())
}

/// Drops zero-quantity lines and sums repeated bread types, keeping first-seen order.
fn merge_lines(lines: Vec<LineRequest>) -> Vec<LineRequest> {
    let mut merged: Vec<LineRequest> = Vec::with_capacity(lines.len());
    for line in lines.into_iter().filter(|line| line.quantity > 0) {
        match merged
            .iter_mut()
            .find(|seen| seen.bread_type_id == line.bread_type_id)
        {
            Some(seen) => seen.quantity = seen.quantity.saturating_add(line.quantity),
            None => merged.push(line),
        }
    }
    merged
}

/// Case-insensitive, whitespace-insensitive match on the customer name.
pub(crate) fn has_ordered(lines: &[OrderLine], baking_day_id: &BakingDayId, customer_name: &str) -> bool {
    let wanted = customer_name.trim().to_lowercase();
    lines.iter().any(|line| {
        &line.baking_day_id == baking_day_id && line.customer_name.trim().to_lowercase() == wanted
    })
}
