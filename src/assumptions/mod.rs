//! Forecast assumptions: scenario weighting and stage defaults

mod probability;
mod stages;

pub use probability::{Scenario, WORST_CASE_MIN_PROBABILITY};
pub use stages::StageConfig;
