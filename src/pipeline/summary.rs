//! Pipeline value by stage
//!
//! Unlike the monthly projection this ignores timing entirely: it answers
//! "what is the open pipeline worth" using each deal's full amount.

use super::{Deal, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Totals for the deals sitting in one stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub count: usize,
    /// Sum of full deal amounts
    pub total: i64,
    /// Sum of amount × probability / 100
    pub weighted: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Open stages that hold at least one deal
    pub stages: BTreeMap<Stage, StageSummary>,
    pub total_weighted: f64,
}

impl PipelineSummary {
    /// Summary for `stage`, zeroed when no deal is in it
    pub fn stage(&self, stage: Stage) -> StageSummary {
        self.stages.get(&stage).copied().unwrap_or_default()
    }
}

/// Summarize all open deals; lost deals are excluded
pub fn summarize(deals: &[Deal]) -> PipelineSummary {
    let mut summary = PipelineSummary::default();

    for deal in deals.iter().filter(|d| !d.stage.is_lost()) {
        let weighted = deal.amount as f64 * f64::from(deal.probability()) / 100.0;
        let entry = summary.stages.entry(deal.stage).or_default();
        entry.count += 1;
        entry.total = entry.total.saturating_add(deal.amount);
        entry.weighted += weighted;
        summary.total_weighted += weighted;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarize_by_stage() {
        let deals = vec![
            Deal::new("d1", "A", Stage::Hot, 100_000),
            Deal::new("d2", "B", Stage::Hot, 200_000).with_probability(50),
            Deal::new("d3", "C", Stage::Confirmed, 400_000),
            Deal::new("d4", "D", Stage::Lost, 1_000_000),
        ];
        let summary = summarize(&deals);

        let hot = summary.stage(Stage::Hot);
        assert_eq!(hot.count, 2);
        assert_eq!(hot.total, 300_000);
        assert_relative_eq!(hot.weighted, 60_000.0 + 100_000.0);

        assert_eq!(summary.stage(Stage::Lost), StageSummary::default());
        assert!(!summary.stages.contains_key(&Stage::Lost));
        assert_relative_eq!(summary.total_weighted, 160_000.0 + 400_000.0);
    }

    #[test]
    fn test_stage_total_saturates() {
        let deals = vec![
            Deal::new("d1", "A", Stage::Medium, i64::MAX),
            Deal::new("d2", "B", Stage::Medium, i64::MAX),
        ];
        let summary = summarize(&deals);
        assert_eq!(summary.stage(Stage::Medium).count, 2);
        assert_eq!(summary.stage(Stage::Medium).total, i64::MAX);
    }

    #[test]
    fn test_empty_pipeline() {
        let summary = summarize(&[]);
        assert!(summary.stages.is_empty());
        assert_eq!(summary.total_weighted, 0.0);
    }
}
