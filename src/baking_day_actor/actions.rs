//! Custom actions for the baking day actor.
//!
//! Both are queries over the whole collection; neither mutates it.

use crate::model::{BakingDay, ShareToken};
use chrono::NaiveDate;

/// Collection-level operations on baking days.
#[derive(Debug, Clone)]
pub enum BakingDayAction {
    /// Looks a baking day up by its share token.
    ResolveShareToken(ShareToken),
    /// Baking days on or after `from`, earliest first.
    Upcoming { from: NaiveDate },
}

/// Results from BakingDayActions - variants match 1:1 with BakingDayAction
#[derive(Debug, Clone)]
pub enum BakingDayActionResult {
    Resolved(Option<BakingDay>),
    Upcoming(Vec<BakingDay>),
}
