use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::evaluation::{DecisionContext, InductionDecision, InductionEngine, InductionThresholds};
use super::orchestrator::{FleetPlanner, InductionError};
use super::report::{DecisionSummary, FleetMetrics};
use super::simulation::{ScenarioModification, ScenarioReport, ScenarioSimulator};
use super::snapshot::FleetSnapshot;

/// Induction plan for a snapshot plus its aggregate counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionPlan {
    pub date: NaiveDate,
    pub avg_mileage: f64,
    pub decisions: Vec<InductionDecision>,
    pub summary: DecisionSummary,
}

/// Facade composing the planner, simulator, and fleet metrics over raw snapshots.
#[derive(Debug, Clone, Default)]
pub struct InductionService {
    planner: FleetPlanner,
    simulator: ScenarioSimulator,
}

impl InductionService {
    pub fn new(thresholds: InductionThresholds) -> Self {
        let planner = FleetPlanner::new(InductionEngine::new(thresholds));
        let simulator = ScenarioSimulator::new(planner.clone());
        Self { planner, simulator }
    }

    pub fn plan(
        &self,
        snapshot: FleetSnapshot,
        date: NaiveDate,
        evaluated_at: DateTime<Utc>,
    ) -> Result<InductionPlan, InductionError> {
        let fleet = snapshot.assemble();
        let context = DecisionContext::for_fleet(&fleet, date, evaluated_at)?;
        let decisions = self.planner.evaluate_fleet(&fleet, &context);
        let summary = DecisionSummary::from_decisions(&decisions);

        Ok(InductionPlan {
            date,
            avg_mileage: context.avg_mileage,
            decisions,
            summary,
        })
    }

    pub fn simulate(
        &self,
        snapshot: FleetSnapshot,
        modifications: &[ScenarioModification],
        date: NaiveDate,
        evaluated_at: DateTime<Utc>,
    ) -> Result<ScenarioReport, InductionError> {
        let fleet = snapshot.assemble();
        self.simulator
            .simulate_with_report(&fleet, modifications, date, evaluated_at)
    }

    pub fn metrics(&self, snapshot: FleetSnapshot) -> Result<FleetMetrics, InductionError> {
        FleetMetrics::from_fleet(&snapshot.assemble())
    }
}
