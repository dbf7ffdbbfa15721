//! Revenue recognition: how much a deal brings in during a given month
//!
//! A deal's schedule is resolved once. Explicit timeline entries win; a deal
//! without entries falls back to booking its full amount in the month of its
//! expected close date. Lost deals never recognize anything.

use super::Deal;
use crate::assumptions::Scenario;
use crate::projection::Month;
use std::collections::BTreeMap;

/// Where a deal's revenue lands on the calendar
#[derive(Debug, Clone, PartialEq)]
pub enum RevenueSchedule {
    /// Explicit entries, summed per month
    Scheduled(BTreeMap<Month, i64>),
    /// Full deal amount in the close month
    SingleDate { month: Month, amount: i64 },
    /// Nothing to recognize (lost, or no entries and no close date)
    Unscheduled,
}

impl RevenueSchedule {
    pub fn for_deal(deal: &Deal) -> Self {
        if deal.stage.is_lost() {
            return Self::Unscheduled;
        }

        if !deal.timeline.is_empty() {
            let mut by_month: BTreeMap<Month, i64> = BTreeMap::new();
            for entry in &deal.timeline {
                let total = by_month.entry(entry.month).or_insert(0);
                *total = total.saturating_add(entry.amount);
            }
            return Self::Scheduled(by_month);
        }

        match deal.expected_close_date {
            Some(date) => Self::SingleDate {
                month: Month::of(date),
                amount: deal.amount,
            },
            None => Self::Unscheduled,
        }
    }

    /// Unweighted amount scheduled for `month`
    pub fn amount_in(&self, month: Month) -> i64 {
        match self {
            Self::Scheduled(by_month) => by_month.get(&month).copied().unwrap_or(0),
            Self::SingleDate { month: close, amount } if *close == month => *amount,
            Self::SingleDate { .. } | Self::Unscheduled => 0,
        }
    }
}

/// A deal's weighted contribution to one month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recognition {
    pub amount: f64,
}

impl Recognition {
    /// Only strictly positive contributions are attributed to the deal
    pub fn attributed(&self) -> bool {
        self.amount > 0.0
    }
}

/// A deal paired with its resolved schedule and effective probability
#[derive(Debug, Clone)]
pub struct ScheduledDeal<'a> {
    pub deal: &'a Deal,
    pub probability: u8,
    pub schedule: RevenueSchedule,
}

impl<'a> ScheduledDeal<'a> {
    pub fn new(deal: &'a Deal) -> Self {
        Self {
            deal,
            probability: deal.probability(),
            schedule: RevenueSchedule::for_deal(deal),
        }
    }

    /// Resolve every deal in a slice
    pub fn resolve_all(deals: &'a [Deal]) -> Vec<ScheduledDeal<'a>> {
        deals.iter().map(ScheduledDeal::new).collect()
    }

    /// Revenue scheduled for `month`, ignoring probability
    pub fn unweighted(&self, month: Month) -> i64 {
        self.schedule.amount_in(month)
    }

    /// Revenue for `month` weighted by the scenario's multiplier
    pub fn contribution(&self, month: Month, scenario: Scenario) -> Recognition {
        let scheduled = self.unweighted(month);
        if scheduled == 0 {
            return Recognition { amount: 0.0 };
        }
        Recognition {
            amount: scheduled as f64 * scenario.multiplier(self.probability),
        }
    }
}

/// One-off contribution of `deal` to `month` under `scenario`
pub fn monthly_contribution(deal: &Deal, month: Month, scenario: Scenario) -> Recognition {
    ScheduledDeal::new(deal).contribution(month, scenario)
}
