use crate::infra::{load_snapshot, parse_date, parse_forced_status};
use chrono::{NaiveDate, Utc};
use clap::Args;
use rail_induction::config::AppConfig;
use rail_induction::error::AppError;
use rail_induction::telemetry::{self, LogSink};
use rail_induction::workflows::induction::{
    DecisionSummary, InductionDecision, InductionPlan, InductionService,
    OperationalStatus, ScenarioModification, ScenarioReport,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Fleet snapshot JSON (trains plus compliance records)
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Planning date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Emit the plan as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Fleet snapshot JSON (trains plus compliance records)
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Force a train's current status, e.g. `--force KMRL-004=maintenance`
    #[arg(long = "force", value_name = "TRAIN_ID=STATUS", value_parser = parse_forced_status)]
    pub(crate) forced: Vec<ScenarioModification>,
    /// Remove a train from the scenario
    #[arg(long = "remove", value_name = "TRAIN_ID")]
    pub(crate) removed: Vec<String>,
    /// Planning date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Emit the scenario report as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

impl SimulateArgs {
    fn modifications(&self) -> Vec<ScenarioModification> {
        self.forced
            .iter()
            .cloned()
            .chain(self.removed.iter().map(ScenarioModification::remove))
            .collect()
    }
}

/// Logs go to stderr so stdout carries only the rendered plan.
fn prepare() -> Result<InductionService, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(InductionService::new(config.induction))
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let snapshot = load_snapshot(&args.fleet)?;
    let evaluated_at = Utc::now();
    let date = args.date.unwrap_or_else(|| evaluated_at.date_naive());

    let plan = service.plan(snapshot, date, evaluated_at)?;
    if args.json {
        return print_json(&plan);
    }

    render_plan(&plan);
    Ok(())
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let service = prepare()?;
    let snapshot = load_snapshot(&args.fleet)?;
    let modifications = args.modifications();
    let evaluated_at = Utc::now();
    let date = args.date.unwrap_or_else(|| evaluated_at.date_naive());

    let report = service.simulate(snapshot, &modifications, date, evaluated_at)?;
    if args.json {
        return print_json(&report);
    }

    render_scenario(&report, &modifications);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_plan(plan: &InductionPlan) {
    println!("Induction plan for {}", plan.date);
    println!("Fleet average mileage: {:.0} km", plan.avg_mileage);
    render_summary(&plan.summary);
    render_decisions(&plan.decisions);
}

pub(crate) fn render_scenario(report: &ScenarioReport, modifications: &[ScenarioModification]) {
    println!("What-if scenario for {}", report.date);
    println!(
        "Baseline average mileage: {:.0} km (held from unmodified fleet)",
        report.baseline_avg_mileage
    );

    if modifications.is_empty() {
        println!("Modifications: none");
    } else {
        println!("Modifications:");
        for modification in modifications {
            match (modification.remove, modification.forced_status) {
                (true, _) => println!("  - {} removed", modification.train_id),
                (false, Some(status)) => {
                    println!("  - {} forced to {}", modification.train_id, status.label())
                }
                (false, None) => println!("  - {} unchanged", modification.train_id),
            }
        }
    }

    render_summary(&report.summary);
    println!(
        "Impact: {} ({:.1}% of fleet modified)",
        report.impact.label(),
        report.availability_reduction_pct
    );
    render_decisions(&report.decisions);
}

fn render_summary(summary: &DecisionSummary) {
    println!(
        "Decisions: {} total | {} service | {} standby | {} maintenance",
        summary.total, summary.service, summary.standby, summary.maintenance
    );
    println!("Service availability: {:.1}%", summary.availability_rate);
}

fn render_decisions(decisions: &[InductionDecision]) {
    if decisions.is_empty() {
        println!("\nNo trains evaluated");
        return;
    }

    for status in OperationalStatus::ordered() {
        let group: Vec<_> = decisions
            .iter()
            .filter(|decision| decision.decision == status)
            .collect();
        if group.is_empty() {
            continue;
        }

        println!("\n{} ({})", status.label().to_ascii_uppercase(), group.len());
        for decision in group {
            println!("  - {}", decision.summary());
            for conflict in &decision.conflicts {
                println!("      [{}] {}", conflict.severity.label(), conflict.message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removals_follow_forced_statuses() {
        let args = SimulateArgs {
            fleet: PathBuf::from("fleet.json"),
            forced: vec![ScenarioModification::force(
                "KMRL-002",
                OperationalStatus::Standby,
            )],
            removed: vec!["KMRL-005".to_string()],
            date: None,
            json: false,
        };

        let modifications = args.modifications();

        assert_eq!(modifications.len(), 2);
        assert_eq!(
            modifications[0].forced_status,
            Some(OperationalStatus::Standby)
        );
        assert!(modifications[1].remove);
        assert_eq!(modifications[1].train_id.as_str(), "KMRL-005");
    }
}
