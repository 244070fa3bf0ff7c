use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use super::domain::{OperationalStatus, VehicleRecords};
use super::evaluation::{DecisionContext, InductionDecision, InductionEngine};

/// Input validity failures surfaced to the orchestration caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InductionError {
    #[error("fleet is empty; average mileage is undefined")]
    EmptyFleet,
}

/// Runs the induction engine across a fleet with one shared context.
#[derive(Debug, Clone, Default)]
pub struct FleetPlanner {
    engine: InductionEngine,
}

impl FleetPlanner {
    pub fn new(engine: InductionEngine) -> Self {
        Self { engine }
    }

    /// Evaluate every vehicle, deriving the fleet average from the same vehicle set.
    pub fn plan(
        &self,
        fleet: &[VehicleRecords],
        date: NaiveDate,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Vec<InductionDecision>, InductionError> {
        let context = DecisionContext::for_fleet(fleet, date, evaluated_at)?;
        Ok(self.evaluate_fleet(fleet, &context))
    }

    /// Evaluate every vehicle against an already computed context.
    ///
    /// Output order matches `fleet`.
    pub fn evaluate_fleet(
        &self,
        fleet: &[VehicleRecords],
        context: &DecisionContext,
    ) -> Vec<InductionDecision> {
        if context.avg_mileage == 0.0 {
            warn!(
                date = %context.date,
                "fleet average mileage is zero; skipping usage variance"
            );
        }

        let decisions = self.fan_out(fleet, context);

        info!(
            date = %context.date,
            vehicles = decisions.len(),
            avg_mileage = context.avg_mileage,
            service = count(&decisions, OperationalStatus::Service),
            standby = count(&decisions, OperationalStatus::Standby),
            maintenance = count(&decisions, OperationalStatus::Maintenance),
            "induction plan generated"
        );

        decisions
    }

    #[cfg(not(feature = "parallel"))]
    fn fan_out(
        &self,
        fleet: &[VehicleRecords],
        context: &DecisionContext,
    ) -> Vec<InductionDecision> {
        fleet
            .iter()
            .map(|vehicle| self.engine.evaluate(vehicle, context))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn fan_out(
        &self,
        fleet: &[VehicleRecords],
        context: &DecisionContext,
    ) -> Vec<InductionDecision> {
        use rayon::prelude::*;

        // Indexed collect keeps input order.
        fleet
            .par_iter()
            .map(|vehicle| self.engine.evaluate(vehicle, context))
            .collect()
    }
}

fn count(decisions: &[InductionDecision], status: OperationalStatus) -> usize {
    decisions
        .iter()
        .filter(|decision| decision.decision == status)
        .count()
}
