//! Custom actions for the order actor.
//!
//! Order lines are never created one at a time: a whole submission goes through
//! [`OrderAction::Submit`] so that every check and the write happen in one message.

use crate::model::{BakingDayId, OrderGroupId, OrderLine, OrderSubmission};

/// Collection-level operations on order lines.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Validates a submission and stores all of its lines, or none.
    Submit(OrderSubmission),
    /// All lines for one baking day, in stored order.
    LinesForDay(BakingDayId),
    /// Whether `customer_name` (case-insensitive) already ordered for the day.
    HasOrdered {
        baking_day_id: BakingDayId,
        customer_name: String,
    },
    /// Removes every line of a deleted baking day.
    PurgeBakingDay(BakingDayId),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Submitted(OrderGroupId),
    Lines(Vec<OrderLine>),
    HasOrdered(bool),
    Purged(usize),
}
