use super::{BakingDayId, BreadTypeId, OrderGroupId, OrderLineId, ShareToken};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One bread type within one customer submission.
///
/// All lines of a submission share `group_id` and `created_at`. Lines are
/// immutable and only ever removed by deleting their baking day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    #[serde(rename = "order_group_id")]
    pub group_id: OrderGroupId,
    pub baking_day_id: BakingDayId,
    pub customer_name: String,
    #[serde(alias = "customer_phone")]
    pub customer_contact: String,
    pub bread_type_id: BreadTypeId,
    pub quantity: u32,
    pub created_at: NaiveDateTime,
}

/// A requested (bread type, quantity) pair, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRequest {
    pub bread_type_id: BreadTypeId,
    pub quantity: u32,
}

impl LineRequest {
    pub fn new(bread_type_id: impl Into<BreadTypeId>, quantity: u32) -> Self {
        Self {
            bread_type_id: bread_type_id.into(),
            quantity,
        }
    }
}

/// Everything a customer submits from the order page.
#[derive(Debug, Clone)]
pub struct OrderSubmission {
    pub share_token: ShareToken,
    pub customer_name: String,
    pub customer_contact: String,
    pub lines: Vec<LineRequest>,
}
