//! Scheduled revenue by month and pipeline stage
//!
//! Unlike the scenario projector this ignores probability: it reports what is
//! on the calendar, not what is likely to land.

use crate::pipeline::{Deal, ScheduledDeal, Stage};
use crate::projection::Month;
use log::debug;
use serde::{Deserialize, Serialize};

/// Revenue totals per open stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBuckets {
    pub confirmed: i64,
    pub very_likely: i64,
    pub hot: i64,
    pub medium: i64,
    pub long_shot: i64,
}

impl StageBuckets {
    /// Accumulator for `stage`; lost deals have no bucket
    pub fn bucket_mut(&mut self, stage: Stage) -> Option<&mut i64> {
        match stage {
            Stage::Confirmed => Some(&mut self.confirmed),
            Stage::VeryLikely => Some(&mut self.very_likely),
            Stage::Hot => Some(&mut self.hot),
            Stage::Medium => Some(&mut self.medium),
            Stage::LongShot => Some(&mut self.long_shot),
            Stage::Lost => None,
        }
    }

    pub fn get(&self, stage: Stage) -> i64 {
        match stage {
            Stage::Confirmed => self.confirmed,
            Stage::VeryLikely => self.very_likely,
            Stage::Hot => self.hot,
            Stage::Medium => self.medium,
            Stage::LongShot => self.long_shot,
            Stage::Lost => 0,
        }
    }

    pub fn sum(&self) -> i64 {
        Stage::OPEN
            .iter()
            .map(|&s| self.get(s))
            .fold(0, i64::saturating_add)
    }
}

/// A deal's scheduled revenue in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineDeal {
    pub id: String,
    pub name: String,
    pub amount: i64,
    pub stage: Stage,
}

/// One month of the revenue timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineData {
    pub month: Month,
    /// e.g. "Oct 2026"
    pub month_label: String,
    #[serde(flatten)]
    pub buckets: StageBuckets,
    pub total: i64,
    pub deals: Vec<TimelineDeal>,
}

impl TimelineData {
    fn empty(month: Month) -> Self {
        Self {
            month,
            month_label: month.label(),
            buckets: StageBuckets::default(),
            total: 0,
            deals: Vec::new(),
        }
    }
}

/// Bucket unweighted scheduled revenue by stage for each month of the horizon
pub fn aggregate(deals: &[Deal], anchor: Month, horizon_months: usize) -> Vec<TimelineData> {
    let scheduled = ScheduledDeal::resolve_all(deals);

    let timeline: Vec<TimelineData> = Month::horizon(anchor, horizon_months)
        .map(|month| {
            let mut data = TimelineData::empty(month);
            for entry in &scheduled {
                let amount = entry.unweighted(month);
                if amount <= 0 {
                    continue;
                }
                let stage = entry.deal.stage;
                let Some(bucket) = data.buckets.bucket_mut(stage) else {
                    continue;
                };
                *bucket = bucket.saturating_add(amount);
                data.total = data.total.saturating_add(amount);
                data.deals.push(TimelineDeal {
                    id: entry.deal.id.clone(),
                    name: entry.deal.name.clone(),
                    amount,
                    stage,
                });
            }
            data
        })
        .collect();

    debug!(
        "Timeline: {} months, {} scheduled in total",
        timeline.len(),
        timeline.iter().map(|d| d.total).fold(0, i64::saturating_add)
    );
    timeline
}
