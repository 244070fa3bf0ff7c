use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{OperationalStatus, TrainId, VehicleRecords};
use super::evaluation::{DecisionContext, InductionDecision};
use super::orchestrator::{FleetPlanner, InductionError};
use super::report::{DecisionSummary, ImpactLevel};

/// Hypothetical change applied to one vehicle before re-evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioModification {
    pub train_id: TrainId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_status: Option<OperationalStatus>,
    #[serde(default)]
    pub remove: bool,
}

impl ScenarioModification {
    pub fn force(train_id: impl Into<String>, status: OperationalStatus) -> Self {
        Self {
            train_id: TrainId::new(train_id),
            forced_status: Some(status),
            remove: false,
        }
    }

    pub fn remove(train_id: impl Into<String>) -> Self {
        Self {
            train_id: TrainId::new(train_id),
            forced_status: None,
            remove: true,
        }
    }
}

/// Decisions for a hypothetical fleet plus the aggregate impact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub date: NaiveDate,
    pub baseline_avg_mileage: f64,
    pub decisions: Vec<InductionDecision>,
    pub summary: DecisionSummary,
    pub impact: ImpactLevel,
    pub modified_vehicles: usize,
    pub availability_reduction_pct: f64,
}

/// Re-runs the planner over a perturbed copy of the fleet.
///
/// The fleet-average baseline is never recomputed for the altered fleet, so
/// usage variance is always measured against the unmodified fleet.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    planner: FleetPlanner,
}

impl ScenarioSimulator {
    pub fn new(planner: FleetPlanner) -> Self {
        Self { planner }
    }

    /// Apply `modifications` and evaluate against the caller's baseline `context`.
    pub fn simulate(
        &self,
        fleet: &[VehicleRecords],
        context: &DecisionContext,
        modifications: &[ScenarioModification],
    ) -> Vec<InductionDecision> {
        let working = apply_modifications(fleet, modifications);
        self.planner.evaluate_fleet(&working, context)
    }

    /// Compute the baseline from the unmodified fleet, simulate, and summarize.
    pub fn simulate_with_report(
        &self,
        fleet: &[VehicleRecords],
        modifications: &[ScenarioModification],
        date: NaiveDate,
        evaluated_at: DateTime<Utc>,
    ) -> Result<ScenarioReport, InductionError> {
        let context = DecisionContext::for_fleet(fleet, date, evaluated_at)?;
        let decisions = self.simulate(fleet, &context, modifications);
        let summary = DecisionSummary::from_decisions(&decisions);

        let availability_reduction_pct =
            modifications.len() as f64 / fleet.len() as f64 * 100.0;

        info!(
            %date,
            modifications = modifications.len(),
            evaluated = decisions.len(),
            availability = summary.availability_rate,
            "scenario simulated"
        );

        Ok(ScenarioReport {
            date,
            baseline_avg_mileage: context.avg_mileage,
            impact: summary.impact(),
            summary,
            decisions,
            modified_vehicles: modifications.len(),
            availability_reduction_pct,
        })
    }
}

/// Build the working vehicle set: status forcing first, then removals.
pub fn apply_modifications(
    fleet: &[VehicleRecords],
    modifications: &[ScenarioModification],
) -> Vec<VehicleRecords> {
    let removed: HashSet<&TrainId> = modifications
        .iter()
        .filter(|modification| modification.remove)
        .map(|modification| &modification.train_id)
        .collect();

    fleet
        .iter()
        .filter(|vehicle| !removed.contains(vehicle.id()))
        .map(|vehicle| {
            let forced = modifications.iter().find_map(|modification| {
                (modification.train_id == vehicle.train.id)
                    .then_some(modification.forced_status)
                    .flatten()
            });

            let mut working = vehicle.clone();
            if let Some(status) = forced {
                working.train.current_status = status;
            }
            working
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::induction::domain::Train;

    fn vehicle(id: &str, status: OperationalStatus) -> VehicleRecords {
        VehicleRecords::bare(Train {
            id: TrainId::new(id),
            train_number: format!("KMRL-{id}"),
            depot_location: "Muttom".to_string(),
            total_mileage: 40_000,
            current_status: status,
            stabling_position: None,
        })
    }

    #[test]
    fn forcing_status_only_touches_the_status_field() {
        let fleet = vec![vehicle("T1", OperationalStatus::Service)];
        let working = apply_modifications(
            &fleet,
            &[ScenarioModification::force("T1", OperationalStatus::Maintenance)],
        );

        assert_eq!(working.len(), 1);
        assert_eq!(working[0].train.current_status, OperationalStatus::Maintenance);
        assert_eq!(working[0].train.total_mileage, fleet[0].train.total_mileage);
        assert_eq!(fleet[0].train.current_status, OperationalStatus::Service);
    }

    #[test]
    fn forced_only_vehicles_are_kept_when_others_are_removed() {
        let fleet = vec![
            vehicle("T1", OperationalStatus::Service),
            vehicle("T2", OperationalStatus::Service),
            vehicle("T3", OperationalStatus::Standby),
        ];
        let working = apply_modifications(
            &fleet,
            &[
                ScenarioModification::force("T1", OperationalStatus::Standby),
                ScenarioModification::remove("T2"),
            ],
        );

        let ids: Vec<_> = working.iter().map(|v| v.id().as_str()).collect();
        assert_eq!(ids, vec!["T1", "T3"]);
        assert_eq!(working[0].train.current_status, OperationalStatus::Standby);
    }

    #[test]
    fn first_status_carrying_modification_wins() {
        let fleet = vec![vehicle("T1", OperationalStatus::Service)];
        let working = apply_modifications(
            &fleet,
            &[
                ScenarioModification {
                    train_id: TrainId::new("T1"),
                    forced_status: None,
                    remove: false,
                },
                ScenarioModification::force("T1", OperationalStatus::Standby),
                ScenarioModification::force("T1", OperationalStatus::Maintenance),
            ],
        );

        assert_eq!(working[0].train.current_status, OperationalStatus::Standby);
    }

    #[test]
    fn unknown_ids_match_nothing() {
        let fleet = vec![vehicle("T1", OperationalStatus::Service)];
        let working = apply_modifications(&fleet, &[ScenarioModification::remove("T404")]);

        assert_eq!(working, fleet);
    }
}
