//! Pipeline stage defaults
//!
//! Each stage carries a conventional probability that applies whenever a deal
//! does not state its own, plus presentation metadata.

use crate::pipeline::Stage;

/// Default attributes for one pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    pub stage: Stage,
    /// 0-100
    pub default_probability: u8,
    /// 1-based position in reports, confirmed first
    pub display_order: u8,
    pub label: &'static str,
}

impl StageConfig {
    pub fn for_stage(stage: Stage) -> Self {
        let (default_probability, display_order, label) = match stage {
            Stage::Confirmed => (100, 1, "Confirmed"),
            Stage::VeryLikely => (80, 2, "Very Likely"),
            Stage::Hot => (60, 3, "Hot"),
            Stage::Medium => (40, 4, "Medium"),
            Stage::LongShot => (20, 5, "Long Shot"),
            Stage::Lost => (0, 6, "Lost"),
        };
        Self {
            stage,
            default_probability,
            display_order,
            label,
        }
    }

    /// Every stage in display order
    pub fn all() -> Vec<StageConfig> {
        Stage::ALL.iter().map(|&s| Self::for_stage(s)).collect()
    }
}
