//! Ordering policy: per-order cap, duplicate-customer rule and deadline.
//!
//! Two deployments exist. [`OrderPolicy::strict`] closes ordering two days
//! before the baking day at 22:00, caps an order at 2 loaves and allows one
//! order per customer per day. [`OrderPolicy::relaxed`] closes 36 hours before
//! midnight of the baking day, caps an order at 5 loaves and does not check for
//! repeat customers. The policy is configuration; it is never inferred.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// When ordering for a baking day closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeadlinePolicy {
    /// Midnight at the start of the baking day, minus `hours`.
    HoursBefore { hours: u32 },
    /// `days_before` days ahead of the baking day, at `cutoff` local time.
    EveningBefore { days_before: u32, cutoff: NaiveTime },
}

impl DeadlinePolicy {
    /// The first instant at which ordering for `date` is closed.
    pub fn deadline_for(&self, date: NaiveDate) -> NaiveDateTime {
        match *self {
            DeadlinePolicy::HoursBefore { hours } => {
                date.and_time(NaiveTime::MIN) - TimeDelta::hours(i64::from(hours))
            }
            DeadlinePolicy::EveningBefore {
                days_before,
                cutoff,
            } => (date - Days::new(u64::from(days_before))).and_time(cutoff),
        }
    }
}

/// Whether a baking day still takes orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OrderWindow {
    Open { deadline: NaiveDateTime },
    Closed { deadline: NaiveDateTime },
}

impl OrderWindow {
    pub fn is_open(&self) -> bool {
        matches!(self, OrderWindow::Open { .. })
    }

    pub fn deadline(&self) -> NaiveDateTime {
        match *self {
            OrderWindow::Open { deadline } | OrderWindow::Closed { deadline } => deadline,
        }
    }
}

/// The rules a submission is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPolicy {
    pub max_loaves_per_order: u32,
    pub unique_customer_per_day: bool,
    pub deadline: DeadlinePolicy,
}

impl OrderPolicy {
    /// 2 loaves, closes two days before at 22:00, one order per customer.
    pub fn strict() -> Self {
        Self {
            max_loaves_per_order: 2,
            unique_customer_per_day: true,
            deadline: DeadlinePolicy::EveningBefore {
                days_before: 2,
                cutoff: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN),
            },
        }
    }

    /// 5 loaves, closes 36 hours before the baking day, repeat customers allowed.
    pub fn relaxed() -> Self {
        Self {
            max_loaves_per_order: 5,
            unique_customer_per_day: false,
            deadline: DeadlinePolicy::HoursBefore { hours: 36 },
        }
    }

    pub fn deadline_for(&self, date: NaiveDate) -> NaiveDateTime {
        self.deadline.deadline_for(date)
    }

    /// Open while `now` is strictly before the deadline.
    pub fn window(&self, date: NaiveDate, now: NaiveDateTime) -> OrderWindow {
        let deadline = self.deadline_for(date);
        if now < deadline {
            OrderWindow::Open { deadline }
        } else {
            OrderWindow::Closed { deadline }
        }
    }
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self::strict()
    }
}
