//! Runs every conversion scenario over the same pipeline snapshot
//!
//! Deal schedules are resolved once and shared; each scenario then projects
//! independently, so the three run in parallel.

use crate::assumptions::Scenario;
use crate::ledger::Expense;
use crate::pipeline::{Deal, ScheduledDeal};
use crate::projection::{ProjectionConfig, ProjectionEngine, ScenarioProjection};
use log::info;
use serde::{Deserialize, Serialize};

/// One projection per scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub best: ScenarioProjection,
    pub realistic: ScenarioProjection,
    pub worst: ScenarioProjection,
}

impl Scenarios {
    pub fn get(&self, scenario: Scenario) -> &ScenarioProjection {
        match scenario {
            Scenario::Best => &self.best,
            Scenario::Realistic => &self.realistic,
            Scenario::Worst => &self.worst,
        }
    }

    /// Projections in best, realistic, worst order
    pub fn iter(&self) -> impl Iterator<Item = &ScenarioProjection> {
        [&self.best, &self.realistic, &self.worst].into_iter()
    }
}

/// Everything the scenario projector hands back to its caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashflowProjections {
    pub scenarios: Scenarios,
    pub starting_balance: f64,
}

pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        self.engine.config()
    }

    pub fn run(&self, deals: &[Deal], expenses: &[Expense]) -> CashflowProjections {
        let config = self.engine.config();
        info!(
            "Projecting {} deals and {} expenses over {} months from {}",
            deals.len(),
            expenses.len(),
            config.horizon_months,
            config.anchor
        );

        let scheduled = ScheduledDeal::resolve_all(deals);
        let project = |scenario| self.engine.project_scheduled(&scheduled, expenses, scenario);

        let (best, (realistic, worst)) = rayon::join(
            || project(Scenario::Best),
            || rayon::join(|| project(Scenario::Realistic), || project(Scenario::Worst)),
        );

        CashflowProjections {
            scenarios: Scenarios {
                best,
                realistic,
                worst,
            },
            starting_balance: config.starting_balance,
        }
    }
}
