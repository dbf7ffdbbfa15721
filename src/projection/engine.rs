//! Scenario projector: month-by-month running balance simulation

use super::{
    CriticalMonth, DealContribution, Impact, Month, MonthlyProjection, ScenarioProjection,
    CRITICAL_REVENUE_THRESHOLD, DEFAULT_HORIZON_MONTHS, DEFAULT_STARTING_BALANCE,
};
use crate::assumptions::Scenario;
use crate::ledger::{self, Expense};
use crate::pipeline::{Deal, ScheduledDeal};
use log::debug;
use serde::{Deserialize, Serialize};

/// Parameters for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Cash on hand before the first projected month
    #[serde(default = "default_starting_balance")]
    pub starting_balance: f64,

    /// Number of months to project, starting with `anchor`
    #[serde(default = "default_horizon_months")]
    pub horizon_months: usize,

    /// First projected month; defaults to the current month
    #[serde(default = "Month::current")]
    pub anchor: Month,

    /// Months with at least this much revenue are flagged as critical
    #[serde(default = "default_critical_threshold")]
    pub critical_threshold: f64,
}

fn default_starting_balance() -> f64 { DEFAULT_STARTING_BALANCE }
fn default_horizon_months() -> usize { DEFAULT_HORIZON_MONTHS }
fn default_critical_threshold() -> f64 { CRITICAL_REVENUE_THRESHOLD }

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            anchor: Month::current(),
            critical_threshold: CRITICAL_REVENUE_THRESHOLD,
        }
    }
}

impl ProjectionConfig {
    /// Default config pinned to a fixed first month
    pub fn anchored_at(anchor: Month) -> Self {
        Self {
            anchor,
            ..Default::default()
        }
    }

    /// The projected months, in order
    pub fn months(&self) -> impl Iterator<Item = Month> {
        Month::horizon(self.anchor, self.horizon_months)
    }
}

/// Runs a single scenario over a horizon
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `scenario` from raw deals
    pub fn project(&self, deals: &[Deal], expenses: &[Expense], scenario: Scenario) -> ScenarioProjection {
        let scheduled = ScheduledDeal::resolve_all(deals);
        self.project_scheduled(&scheduled, expenses, scenario)
    }

    /// Project `scenario` from deals whose schedules are already resolved
    pub fn project_scheduled(
        &self,
        deals: &[ScheduledDeal<'_>],
        expenses: &[Expense],
        scenario: Scenario,
    ) -> ScenarioProjection {
        let mut balance = self.config.starting_balance;
        let mut monthly = Vec::with_capacity(self.config.horizon_months);

        for month in self.config.months() {
            let mut revenue = 0.0;
            let mut contributing = Vec::new();
            for scheduled in deals {
                let recognition = scheduled.contribution(month, scenario);
                if recognition.attributed() {
                    revenue += recognition.amount;
                    contributing.push(DealContribution {
                        id: scheduled.deal.id.clone(),
                        name: scheduled.deal.name.clone(),
                        amount: recognition.amount,
                    });
                }
            }

            let expense_amount = ledger::total_for_month(expenses, month) as f64;
            let net = revenue - expense_amount;
            balance += net;

            monthly.push(MonthlyProjection {
                month,
                revenue,
                expenses: expense_amount,
                net,
                balance,
                deals: contributing,
            });
        }

        let total_revenue: f64 = monthly.iter().map(|m| m.revenue).sum();
        let total_expenses: f64 = monthly.iter().map(|m| m.expenses).sum();
        let runway_months = find_runway(self.config.starting_balance, &monthly);
        let critical_months = identify_critical_months(&monthly, self.config.critical_threshold);

        debug!(
            "{} scenario: revenue={:.0} expenses={:.0} runway={:?} critical={}",
            scenario,
            total_revenue,
            total_expenses,
            runway_months,
            critical_months.len()
        );

        ScenarioProjection {
            scenario,
            monthly,
            total_revenue,
            total_expenses,
            runway_months,
            critical_months,
        }
    }
}

/// Index of the first month whose closing balance is zero or below
///
/// A run that starts with no cash has no runway at all, whatever month 0 brings in.
pub fn find_runway(starting_balance: f64, monthly: &[MonthlyProjection]) -> Option<usize> {
    if starting_balance <= 0.0 && !monthly.is_empty() {
        return Some(0);
    }
    monthly.iter().position(|m| m.balance <= 0.0)
}

/// Flag months whose revenue reaches `threshold`
pub fn identify_critical_months(monthly: &[MonthlyProjection], threshold: f64) -> Vec<CriticalMonth> {
    monthly
        .iter()
        .filter(|m| m.revenue >= threshold)
        .map(|m| {
            let count = m.deals.len();
            let names: Vec<&str> = m.deals.iter().map(|d| d.name.as_str()).collect();
            CriticalMonth {
                month: m.month,
                reason: format!(
                    "{} deal{}: {}",
                    count,
                    if count > 1 { "s" } else { "" },
                    names.join(", ")
                ),
                impact: Impact::for_revenue(m.revenue),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Frequency;
    use crate::pipeline::Stage;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn anchor() -> Month {
        Month::new(2026, 10).unwrap()
    }

    fn engine(starting_balance: f64, horizon_months: usize) -> ProjectionEngine {
        ProjectionEngine::new(ProjectionConfig {
            starting_balance,
            horizon_months,
            ..ProjectionConfig::anchored_at(anchor())
        })
    }

    fn in_month(offset: u32, day: u32) -> NaiveDate {
        let m = anchor().checked_add(offset).unwrap();
        NaiveDate::from_ymd_opt(m.year(), m.month(), day).unwrap()
    }

    fn payroll() -> Expense {
        Expense::new("e1", "Payroll", 100_000, Frequency::Monthly, in_month(0, 1))
    }

    #[test]
    fn test_worked_example() {
        let deals = vec![Deal::new("d1", "Platform deal", Stage::VeryLikely, 500_000)
            .with_probability(80)
            .closing_on(in_month(2, 14))];
        let expenses = vec![payroll()];
        let engine = engine(1_000_000.0, 12);

        let realistic = engine.project(&deals, &expenses, Scenario::Realistic);
        for m in &realistic.monthly[..2] {
            assert_eq!(m.revenue, 0.0);
            assert_eq!(m.expenses, 100_000.0);
            assert_eq!(m.net, -100_000.0);
        }
        assert_relative_eq!(realistic.monthly[2].revenue, 400_000.0);
        assert_relative_eq!(realistic.monthly[2].balance, 1_100_000.0);

        let best = engine.project(&deals, &expenses, Scenario::Best);
        assert_relative_eq!(best.monthly[2].revenue, 500_000.0);

        let worst = engine.project(&deals, &expenses, Scenario::Worst);
        assert_relative_eq!(worst.monthly[2].revenue, 500_000.0);
        assert_eq!(worst.monthly[2].deals[0].id, "d1");
    }

    #[test]
    fn test_balance_accumulates_net() {
        let deals = vec![
            Deal::new("d1", "A", Stage::Hot, 250_000).closing_on(in_month(1, 3)),
            Deal::new("d2", "B", Stage::Medium, 90_000)
                .with_entry(anchor().checked_add(4).unwrap(), 45_000)
                .with_entry(anchor().checked_add(5).unwrap(), 45_000),
        ];
        let expenses = vec![
            payroll(),
            Expense::new("e2", "Insurance", 30_000, Frequency::Quarterly, in_month(0, 1)),
        ];
        let starting = 350_000.0;

        for scenario in Scenario::ALL {
            let projection = engine(starting, 9).project(&deals, &expenses, scenario);
            let mut previous = starting;
            for m in &projection.monthly {
                assert_relative_eq!(m.net, m.revenue - m.expenses);
                assert_relative_eq!(m.balance, previous + m.net);
                previous = m.balance;
            }
            let revenue: f64 = projection.monthly.iter().map(|m| m.revenue).sum();
            let spent: f64 = projection.monthly.iter().map(|m| m.expenses).sum();
            assert_relative_eq!(projection.total_revenue, revenue);
            assert_relative_eq!(projection.total_expenses, spent);
        }
    }

    #[test]
    fn test_runway_detection() {
        let expenses = vec![payroll()];

        // 250k covers two months; the third lands below zero
        let projection = engine(250_000.0, 12).project(&[], &expenses, Scenario::Realistic);
        assert_eq!(projection.runway_months, Some(2));

        // Exactly zero counts as out of cash
        let projection = engine(300_000.0, 12).project(&[], &expenses, Scenario::Realistic);
        assert_eq!(projection.runway_months, Some(2));

        let projection = engine(5_000_000.0, 12).project(&[], &expenses, Scenario::Realistic);
        assert_eq!(projection.runway_months, None);
    }

    #[test]
    fn test_non_negative_net_means_infinite_runway() {
        let deals = vec![Deal::new("d1", "A", Stage::Confirmed, 100_000).closing_on(in_month(3, 1))];
        for scenario in Scenario::ALL {
            let projection = engine(0.5, 12).project(&deals, &[], scenario);
            assert!(projection.monthly.iter().all(|m| m.net >= 0.0));
            assert_eq!(projection.runway_months, None);
        }
    }

    #[test]
    fn test_zero_start_has_no_runway() {
        let projection = engine(0.0, 6).project(&[], &[], Scenario::Best);
        assert_eq!(projection.runway_months, Some(0));
    }

    #[test]
    fn test_non_positive_start_ignores_month_zero_revenue() {
        let deals = vec![Deal::new("d1", "Rescue", Stage::Confirmed, 500_000).closing_on(in_month(0, 5))];
        for scenario in Scenario::ALL {
            let projection = engine(-100.0, 3).project(&deals, &[], scenario);
            assert!(projection.monthly[0].balance > 0.0);
            assert_eq!(projection.runway_months, Some(0));
        }
    }

    #[test]
    fn test_empty_horizon() {
        let deals = vec![Deal::new("d1", "A", Stage::Confirmed, 100_000).closing_on(in_month(0, 1))];
        let projection = engine(1_000.0, 0).project(&deals, &[payroll()], Scenario::Best);
        assert!(projection.monthly.is_empty());
        assert_eq!(projection.total_revenue, 0.0);
        assert_eq!(projection.runway_months, None);
        assert!(projection.critical_months.is_empty());
    }

    #[test]
    fn test_critical_months() {
        let deals = vec![
            Deal::new("d1", "Big", Stage::Confirmed, 1_200_000).closing_on(in_month(1, 10)),
            Deal::new("d2", "Mid", Stage::Confirmed, 300_000).closing_on(in_month(3, 10)),
            Deal::new("d3", "Mid too", Stage::Confirmed, 250_000).closing_on(in_month(3, 20)),
            Deal::new("d4", "Small", Stage::Confirmed, 100_000).closing_on(in_month(5, 20)),
        ];
        let projection = engine(1_000_000.0, 12).project(&deals, &[], Scenario::Best);

        assert_eq!(projection.critical_months.len(), 2);
        let first = &projection.critical_months[0];
        assert_eq!(first.month, anchor().checked_add(1).unwrap());
        assert_eq!(first.impact, Impact::High);
        assert_eq!(first.reason, "1 deal: Big");

        let second = &projection.critical_months[1];
        assert_eq!(second.impact, Impact::Medium);
        assert_eq!(second.reason, "2 deals: Mid, Mid too");
    }

    #[test]
    fn test_lower_threshold_reaches_low_impact() {
        let deals = vec![Deal::new("d1", "Small", Stage::Confirmed, 100_000).closing_on(in_month(0, 2))];
        let engine = ProjectionEngine::new(ProjectionConfig {
            critical_threshold: 50_000.0,
            ..ProjectionConfig::anchored_at(anchor())
        });
        let projection = engine.project(&deals, &[], Scenario::Best);
        assert_eq!(projection.critical_months[0].impact, Impact::Low);
    }

    #[test]
    fn test_worst_scenario_omits_discarded_deals() {
        let deals = vec![
            Deal::new("d1", "Likely", Stage::VeryLikely, 200_000).closing_on(in_month(0, 5)),
            Deal::new("d2", "Unlikely", Stage::Hot, 200_000).closing_on(in_month(0, 5)),
        ];
        let projection = engine(0.0, 1).project(&deals, &[], Scenario::Worst);
        let month = &projection.monthly[0];
        assert_eq!(month.deals.len(), 1);
        assert_eq!(month.deals[0].name, "Likely");
        assert_relative_eq!(month.revenue, 200_000.0);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ProjectionConfig = serde_json::from_str(r#"{"anchor": "2026-10"}"#).unwrap();
        assert_eq!(config.starting_balance, 1_000_000.0);
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.critical_threshold, 500_000.0);
        assert_eq!(config.anchor, anchor());
    }
}
