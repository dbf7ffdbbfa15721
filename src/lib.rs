//! Pipeline Cashflow - scenario-based cash forecasting from a sales pipeline
//!
//! This library provides:
//! - Month-by-month cash balance projections under best, realistic and worst
//!   conversion scenarios
//! - Runway detection and critical-month flagging
//! - Scheduled revenue timelines bucketed by pipeline stage
//! - Pipeline value summaries and input loading for deals and expenses
//!
//! The engine is pure: it reads already-materialized deals and expenses and
//! returns fresh projection structures on every call.

pub mod error;
pub mod format;
pub mod assumptions;
pub mod pipeline;
pub mod ledger;
pub mod projection;
pub mod scenario;
pub mod timeline;

// Re-export commonly used types
pub use error::{ForecastError, Result};
pub use assumptions::{Scenario, StageConfig};
pub use pipeline::{Deal, Stage, TimelineEntry};
pub use ledger::{Expense, Frequency};
pub use projection::{Month, MonthlyProjection, ProjectionConfig, ProjectionEngine, ScenarioProjection};
pub use scenario::{CashflowProjections, ScenarioRunner};
pub use timeline::TimelineData;

/// Project cash balance for every scenario over `horizon_months` starting at `anchor`
pub fn calculate_cashflow_projections(
    deals: &[Deal],
    expenses: &[Expense],
    starting_balance: f64,
    horizon_months: usize,
    anchor: Month,
) -> CashflowProjections {
    let config = ProjectionConfig {
        starting_balance,
        horizon_months,
        ..ProjectionConfig::anchored_at(anchor)
    };
    ScenarioRunner::new(config).run(deals, expenses)
}

/// Unweighted scheduled revenue by stage for `horizon_months` starting at `anchor`
pub fn calculate_timeline_data(deals: &[Deal], horizon_months: usize, anchor: Month) -> Vec<TimelineData> {
    timeline::aggregate(deals, anchor, horizon_months)
}
