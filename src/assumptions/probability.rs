//! Conversion scenarios and the probability weighting each one applies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deals at or above this probability are the only ones counted in the worst case
pub const WORST_CASE_MIN_PROBABILITY: u8 = 80;

/// Conversion-rate assumption applied uniformly to every deal in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Every open deal converts in full
    Best,
    /// Each deal is weighted by its own probability
    Realistic,
    /// Only very likely and confirmed deals convert; nothing else counts
    Worst,
}

impl Scenario {
    /// All scenarios in reporting order
    pub const ALL: [Scenario; 3] = [Scenario::Best, Scenario::Realistic, Scenario::Worst];

    /// Weighting multiplier in [0, 1] for a deal with the given probability (0-100)
    pub fn multiplier(self, probability: u8) -> f64 {
        match self {
            Scenario::Best => 1.0,
            Scenario::Realistic => f64::from(probability.min(100)) / 100.0,
            Scenario::Worst => {
                if probability >= WORST_CASE_MIN_PROBABILITY {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Best => "best",
            Scenario::Realistic => "realistic",
            Scenario::Worst => "worst",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
