use super::common::*;
use crate::workflows::induction::domain::{OperationalStatus, VehicleRecords};
use crate::workflows::induction::evaluation::DecisionContext;
use crate::workflows::induction::orchestrator::{FleetPlanner, InductionError};
use crate::workflows::induction::report::ImpactLevel;
use crate::workflows::induction::simulation::{ScenarioModification, ScenarioSimulator};

fn baseline(fleet: &[VehicleRecords]) -> DecisionContext {
    DecisionContext::for_fleet(fleet, planning_date(), now()).expect("non-empty fleet")
}

#[test]
fn empty_modifications_match_direct_planning() {
    let fleet = scenario_fleet();
    let context = baseline(&fleet);
    let simulator = ScenarioSimulator::default();

    let simulated = simulator.simulate(&fleet, &context, &[]);
    let direct = FleetPlanner::default().evaluate_fleet(&fleet, &context);

    assert_eq!(simulated, direct);
}

#[test]
fn removed_vehicle_has_no_decision() {
    let fleet = scenario_fleet();
    let context = baseline(&fleet);

    let decisions = ScenarioSimulator::default().simulate(
        &fleet,
        &context,
        &[ScenarioModification::remove("B")],
    );

    assert_eq!(decisions.len(), 2);
    assert!(decisions.iter().all(|decision| decision.train_id.as_str() != "B"));
}

#[test]
fn forced_status_is_reported_without_altering_records() {
    let fleet = scenario_fleet();
    let context = baseline(&fleet);

    let decisions = ScenarioSimulator::default().simulate(
        &fleet,
        &context,
        &[ScenarioModification::force("B", OperationalStatus::Maintenance)],
    );

    let b = decisions
        .iter()
        .find(|decision| decision.train_id.as_str() == "B")
        .expect("B still evaluated");
    assert_eq!(b.current_status, OperationalStatus::Maintenance);
    assert_eq!(b.decision, OperationalStatus::Service);
    assert_eq!(b.confidence_score, 95);
    assert_eq!(fleet[1].train.current_status, OperationalStatus::Service);
}

#[test]
fn baseline_average_is_held_fixed_after_removal() {
    let mut heavy = VehicleRecords::bare(train("H", 80_000));
    heavy.mileage_logs.push(mileage_log("H", 2, 48_000));
    let fleet = vec![heavy, VehicleRecords::bare(train("L", 0))];
    let context = baseline(&fleet);
    assert_eq!(context.avg_mileage, 40_000.0);

    let decisions = ScenarioSimulator::default().simulate(
        &fleet,
        &context,
        &[ScenarioModification::remove("L")],
    );

    // Against a recomputed 80,000 km baseline this vehicle would look underused.
    assert_eq!(decisions.len(), 1);
    assert!(decisions[0].justification.mileage_check);
    assert!(decisions[0].conflicts.is_empty());
    assert_eq!(decisions[0].decision, OperationalStatus::Service);
}

#[test]
fn removing_every_vehicle_yields_empty_plan() {
    let fleet = scenario_fleet();
    let context = baseline(&fleet);
    let removals: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(ScenarioModification::remove)
        .collect();

    let decisions = ScenarioSimulator::default().simulate(&fleet, &context, &removals);

    assert!(decisions.is_empty());
}

#[test]
fn report_summarizes_availability() {
    let fleet = scenario_fleet();

    let report = ScenarioSimulator::default()
        .simulate_with_report(
            &fleet,
            &[ScenarioModification::remove("A")],
            planning_date(),
            now(),
        )
        .expect("report builds");

    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.service, 2);
    assert_eq!(report.summary.availability_rate, 100.0);
    assert_eq!(report.impact, ImpactLevel::Healthy);
    assert_eq!(report.modified_vehicles, 1);
    assert!((report.availability_reduction_pct - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.baseline_avg_mileage, 40_000.0);
}

#[test]
fn report_flags_critical_availability() {
    let report = ScenarioSimulator::default()
        .simulate_with_report(&scenario_fleet(), &[], planning_date(), now())
        .expect("report builds");

    assert_eq!(report.summary.maintenance, 1);
    assert!((report.summary.availability_rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(report.impact, ImpactLevel::Critical);
}

#[test]
fn report_requires_non_empty_baseline() {
    let result = ScenarioSimulator::default().simulate_with_report(
        &[],
        &[],
        planning_date(),
        now(),
    );

    assert_eq!(result, Err(InductionError::EmptyFleet));
}
