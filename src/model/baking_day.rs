use super::{BakingDayId, BreadTypeId, ShareToken};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A (bread type, cap) pair offered on a baking day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadOption {
    pub bread_type_id: BreadTypeId,
    pub max_quantity: u32,
}

impl BreadOption {
    pub fn new(bread_type_id: impl Into<BreadTypeId>, max_quantity: u32) -> Self {
        Self {
            bread_type_id: bread_type_id.into(),
            max_quantity,
        }
    }
}

/// One scheduled production run with a fixed menu of options.
///
/// The `share_token` is stored under the `share_link` key so existing data
/// files stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakingDay {
    pub id: BakingDayId,
    pub date: NaiveDate,
    #[serde(rename = "share_link")]
    pub share_token: ShareToken,
    pub options: Vec<BreadOption>,
}

impl BakingDay {
    /// The option for `bread_type_id`, if this day offers it.
    pub fn option(&self, bread_type_id: &BreadTypeId) -> Option<&BreadOption> {
        self.options
            .iter()
            .find(|option| &option.bread_type_id == bread_type_id)
    }

    /// Sum of all options' caps.
    pub fn max_total_loaves(&self) -> u32 {
        self.options
            .iter()
            .fold(0u32, |total, option| total.saturating_add(option.max_quantity))
    }
}

/// DTO for baking day creation.
///
/// The date is already resolved; see [`next_weekday`](crate::clock::next_weekday)
/// for turning a weekday name into a date.
#[derive(Debug, Clone)]
pub struct BakingDayCreate {
    pub date: NaiveDate,
    pub options: Vec<BreadOption>,
}
