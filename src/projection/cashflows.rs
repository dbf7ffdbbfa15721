//! Projection output structures

use super::Month;
use crate::assumptions::Scenario;
use serde::{Deserialize, Serialize};

/// Revenue a single deal contributed to a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealContribution {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

/// One projected month within a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: Month,
    pub revenue: f64,
    pub expenses: f64,
    /// revenue - expenses
    pub net: f64,
    /// Running balance after this month's net
    pub balance: f64,
    pub deals: Vec<DealContribution>,
}

/// How much attention a critical month deserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn for_revenue(revenue: f64) -> Self {
        if revenue >= super::HIGH_IMPACT_REVENUE {
            Impact::High
        } else if revenue >= super::MEDIUM_IMPACT_REVENUE {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

/// A month flagged for unusually high expected revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalMonth {
    pub month: Month,
    pub reason: String,
    pub impact: Impact,
}

/// Full month-by-month run of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub scenario: Scenario,
    pub monthly: Vec<MonthlyProjection>,
    pub total_revenue: f64,
    pub total_expenses: f64,
    /// Index of the first month with balance <= 0; `None` means the cash
    /// never runs out within the horizon
    pub runway_months: Option<usize>,
    pub critical_months: Vec<CriticalMonth>,
}

impl ScenarioProjection {
    /// Balance after the last projected month, or `starting_balance` for an empty horizon
    pub fn ending_balance(&self, starting_balance: f64) -> f64 {
        self.monthly.last().map_or(starting_balance, |m| m.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_tiers() {
        assert_eq!(Impact::for_revenue(1_000_000.0), Impact::High);
        assert_eq!(Impact::for_revenue(999_999.0), Impact::Medium);
        assert_eq!(Impact::for_revenue(500_000.0), Impact::Medium);
        assert_eq!(Impact::for_revenue(499_999.0), Impact::Low);
    }

    #[test]
    fn test_runway_serializes_as_null() {
        let projection = ScenarioProjection {
            scenario: Scenario::Best,
            monthly: Vec::new(),
            total_revenue: 0.0,
            total_expenses: 0.0,
            runway_months: None,
            critical_months: Vec::new(),
        };
        let json = serde_json::to_value(&projection).unwrap();
        assert!(json["runway_months"].is_null());
        assert_eq!(json["scenario"], "best");
        assert_eq!(projection.ending_balance(42.0), 42.0);
    }
}
