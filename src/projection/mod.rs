//! Projection engine for monthly cash balance under a single scenario

mod month;
mod engine;
mod cashflows;

pub use month::Month;
pub use engine::{find_runway, identify_critical_months, ProjectionConfig, ProjectionEngine};
pub use cashflows::{CriticalMonth, DealContribution, Impact, MonthlyProjection, ScenarioProjection};

// ============================================================================
// Defaults
// ============================================================================
// Amounts are in whole currency units (the pipeline is kept in ISK).

/// Cash on hand assumed when the caller does not supply a starting balance
pub const DEFAULT_STARTING_BALANCE: f64 = 1_000_000.0;

/// Months projected when the caller does not supply a horizon
pub const DEFAULT_HORIZON_MONTHS: usize = 12;

/// Monthly revenue at or above which a month is flagged as critical
pub const CRITICAL_REVENUE_THRESHOLD: f64 = 500_000.0;

/// Revenue at or above which a critical month has high impact
pub const HIGH_IMPACT_REVENUE: f64 = 1_000_000.0;

/// Revenue at or above which a critical month has medium impact; below is low
pub const MEDIUM_IMPACT_REVENUE: f64 = 500_000.0;
