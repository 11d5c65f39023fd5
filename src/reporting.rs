//! Availability and per-day summaries derived from order lines.
//!
//! Everything here is a pure function of a baking day and the order lines passed
//! in, so calling it twice over the same lines yields the same answer. Lines for
//! other baking days are ignored.

use crate::model::{BakingDay, BakingDayId, BreadType, BreadTypeId, OrderLine};
use crate::policy::OrderWindow;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Placeholder shown for bread types that no longer exist.
pub const UNKNOWN_BREAD: &str = "Unknown";

/// Sum of quantities of all lines for `(baking_day_id, bread_type_id)`.
pub fn ordered_quantity<'a>(
    lines: impl IntoIterator<Item = &'a OrderLine>,
    baking_day_id: &BakingDayId,
    bread_type_id: &BreadTypeId,
) -> u32 {
    lines
        .into_iter()
        .filter(|line| &line.baking_day_id == baking_day_id && &line.bread_type_id == bread_type_id)
        .fold(0u32, |total, line| total.saturating_add(line.quantity))
}

/// Live state of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionAvailability {
    pub bread_type_id: BreadTypeId,
    pub max_quantity: u32,
    pub ordered_quantity: u32,
    /// Negative only if the capacity invariant was broken.
    pub available: i64,
}

/// Per-option ordered and remaining quantities, in menu order.
pub fn compute_availability(day: &BakingDay, lines: &[OrderLine]) -> Vec<OptionAvailability> {
    day.options
        .iter()
        .map(|option| {
            let ordered = ordered_quantity(lines, &day.id, &option.bread_type_id);
            let available = i64::from(option.max_quantity) - i64::from(ordered);
            if available < 0 {
                warn!(
                    baking_day_id = %day.id,
                    bread_type_id = %option.bread_type_id,
                    max_quantity = option.max_quantity,
                    ordered,
                    "Option is overcommitted"
                );
            }
            OptionAvailability {
                bread_type_id: option.bread_type_id.clone(),
                max_quantity: option.max_quantity,
                ordered_quantity: ordered,
                available,
            }
        })
        .collect()
}

/// Totals for one baking day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// Distinct order groups.
    pub total_orders: usize,
    pub total_loaves: u32,
    pub max_total_loaves: u32,
}

pub fn compute_day_summary(day: &BakingDay, lines: &[OrderLine]) -> DaySummary {
    let day_lines = lines.iter().filter(|line| line.baking_day_id == day.id);
    let mut groups = HashSet::new();
    let mut total_loaves: u32 = 0;
    for line in day_lines {
        groups.insert(&line.group_id);
        total_loaves = total_loaves.saturating_add(line.quantity);
    }
    DaySummary {
        total_orders: groups.len(),
        total_loaves,
        max_total_loaves: day.max_total_loaves(),
    }
}

/// Bread type id to display name lookup.
#[derive(Debug, Clone, Default)]
pub struct BreadLabels {
    names: HashMap<BreadTypeId, String>,
}

impl BreadLabels {
    pub fn new(breads: &[BreadType]) -> Self {
        Self {
            names: breads
                .iter()
                .map(|bread| (bread.id.clone(), bread.name.clone()))
                .collect(),
        }
    }

    /// The bread's name, or [`UNKNOWN_BREAD`] if it was deleted.
    pub fn name_of(&self, id: &BreadTypeId) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or(UNKNOWN_BREAD)
    }
}

// =============================================================================
// LABELLED VIEWS
// =============================================================================

/// An option with its bread name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledOption {
    pub bread_type_id: BreadTypeId,
    pub bread_name: String,
    pub max_quantity: u32,
}

/// A baking day as listed on the operator's home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingDay {
    pub baking_day: BakingDay,
    pub options: Vec<LabeledOption>,
}

impl UpcomingDay {
    pub fn build(baking_day: BakingDay, labels: &BreadLabels) -> Self {
        let options = baking_day
            .options
            .iter()
            .map(|option| LabeledOption {
                bread_type_id: option.bread_type_id.clone(),
                bread_name: labels.name_of(&option.bread_type_id).to_string(),
                max_quantity: option.max_quantity,
            })
            .collect();
        Self {
            baking_day,
            options,
        }
    }
}

/// Availability of one option with its bread name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledAvailability {
    pub bread_name: String,
    #[serde(flatten)]
    pub availability: OptionAvailability,
}

fn label_availability(
    day: &BakingDay,
    lines: &[OrderLine],
    labels: &BreadLabels,
) -> Vec<LabeledAvailability> {
    compute_availability(day, lines)
        .into_iter()
        .map(|availability| LabeledAvailability {
            bread_name: labels.name_of(&availability.bread_type_id).to_string(),
            availability,
        })
        .collect()
}

/// What a customer sees behind a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPage {
    pub baking_day: BakingDay,
    pub window: OrderWindow,
    pub max_loaves_per_order: u32,
    pub options: Vec<LabeledAvailability>,
}

impl OrderPage {
    pub fn build(
        baking_day: BakingDay,
        window: OrderWindow,
        max_loaves_per_order: u32,
        lines: &[OrderLine],
        labels: &BreadLabels,
    ) -> Self {
        let options = label_availability(&baking_day, lines, labels);
        Self {
            baking_day,
            window,
            max_loaves_per_order,
            options,
        }
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

/// An order line with its bread name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledLine {
    pub bread_name: String,
    #[serde(flatten)]
    pub line: OrderLine,
}

/// The operator's view of all orders for one baking day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub baking_day: BakingDay,
    pub lines: Vec<LabeledLine>,
    pub options: Vec<LabeledAvailability>,
    pub summary: DaySummary,
}

impl DayReport {
    pub fn build(baking_day: BakingDay, lines: Vec<OrderLine>, labels: &BreadLabels) -> Self {
        let options = label_availability(&baking_day, &lines, labels);
        let summary = compute_day_summary(&baking_day, &lines);
        let lines = lines
            .into_iter()
            .filter(|line| line.baking_day_id == baking_day.id)
            .map(|line| LabeledLine {
                bread_name: labels.name_of(&line.bread_type_id).to_string(),
                line,
            })
            .collect();
        Self {
            baking_day,
            lines,
            options,
            summary,
        }
    }
}
