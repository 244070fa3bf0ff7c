mod config;
mod policy;
mod rules;

pub use config::InductionThresholds;
pub use policy::{PolicyRule, POLICY_TABLE};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{OperationalStatus, TrainId, VehicleRecords};
use super::orchestrator::InductionError;
use policy::decide;

const NO_CONFLICTS_REASON: &str = "No conflicts detected, optimal operational status";

/// Shared, read-only inputs for one orchestration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub date: NaiveDate,
    pub avg_mileage: f64,
    /// Instant the recency windows (mileage, cleaning) are measured from.
    pub evaluated_at: DateTime<Utc>,
}

impl DecisionContext {
    pub fn new(date: NaiveDate, avg_mileage: f64, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            date,
            avg_mileage,
            evaluated_at,
        }
    }

    /// Build the context for a fleet, averaging total mileage across every vehicle.
    pub fn for_fleet(
        fleet: &[VehicleRecords],
        date: NaiveDate,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Self, InductionError> {
        if fleet.is_empty() {
            return Err(InductionError::EmptyFleet);
        }

        let total: u64 = fleet
            .iter()
            .map(|vehicle| u64::from(vehicle.train.total_mileage))
            .sum();
        let avg_mileage = total as f64 / fleet.len() as f64;

        Ok(Self::new(date, avg_mileage, evaluated_at))
    }
}

/// Compliance domain a conflict was raised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    FitnessCertificate,
    JobCard,
    Branding,
    Mileage,
    Cleaning,
}

impl ConflictKind {
    pub const fn label(self) -> &'static str {
        match self {
            ConflictKind::FitnessCertificate => "fitness_certificate",
            ConflictKind::JobCard => "job_card",
            ConflictKind::Branding => "branding",
            ConflictKind::Mileage => "mileage",
            ConflictKind::Cleaning => "cleaning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Critical,
    Warning,
    Info,
}

impl ConflictSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            ConflictSeverity::Critical => "critical",
            ConflictSeverity::Warning => "warning",
            ConflictSeverity::Info => "info",
        }
    }
}

/// Structured finding that justifies or caveats a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub message: String,
}

impl Conflict {
    pub fn new(kind: ConflictKind, severity: ConflictSeverity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }
}

/// Reasons plus the per-domain pass/fail flags behind a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    pub reasons: Vec<String>,
    pub fitness_check: bool,
    pub job_card_check: bool,
    pub branding_check: bool,
    pub mileage_check: bool,
    pub cleaning_check: bool,
}

impl Default for Justification {
    fn default() -> Self {
        Self {
            reasons: Vec::new(),
            fitness_check: true,
            job_card_check: true,
            branding_check: true,
            mileage_check: true,
            cleaning_check: true,
        }
    }
}

/// Induction outcome for one vehicle on one planning date.
///
/// Identity and creation timestamps are assigned by whoever persists the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionDecision {
    pub train_id: TrainId,
    pub decision_date: NaiveDate,
    pub current_status: OperationalStatus,
    pub decision: OperationalStatus,
    pub confidence_score: u8,
    pub justification: Justification,
    pub conflicts: Vec<Conflict>,
    pub overridden: bool,
}

impl InductionDecision {
    pub fn count_severity(&self, severity: ConflictSeverity) -> usize {
        self.conflicts
            .iter()
            .filter(|conflict| conflict.severity == severity)
            .count()
    }

    pub fn summary(&self) -> String {
        match self.justification.reasons.first() {
            Some(reason) => format!(
                "{} -> {} ({}%): {}",
                self.train_id,
                self.decision.label(),
                self.confidence_score,
                reason
            ),
            None => format!(
                "{} -> {} ({}%)",
                self.train_id,
                self.decision.label(),
                self.confidence_score
            ),
        }
    }
}

/// Stateless evaluator applying the induction policy to one vehicle at a time.
#[derive(Debug, Clone, Default)]
pub struct InductionEngine {
    thresholds: InductionThresholds,
}

impl InductionEngine {
    pub fn new(thresholds: InductionThresholds) -> Self {
        Self { thresholds }
    }

    /// Run the five domain checks and the priority table for a single vehicle.
    pub fn evaluate(
        &self,
        vehicle: &VehicleRecords,
        context: &DecisionContext,
    ) -> InductionDecision {
        let ledger = rules::check_vehicle(vehicle, context, &self.thresholds);
        let verdict = decide(&ledger, &self.thresholds);

        let rules::ComplianceLedger {
            mut justification,
            conflicts,
            ..
        } = ledger;

        justification.reasons.push(verdict.reason.to_string());
        if conflicts.is_empty() {
            justification.reasons.push(NO_CONFLICTS_REASON.to_string());
        }

        debug!(
            train_id = %vehicle.train.id,
            decision = verdict.decision.label(),
            confidence = verdict.confidence,
            rule = verdict.rule,
            conflicts = conflicts.len(),
            "vehicle evaluated"
        );

        InductionDecision {
            train_id: vehicle.train.id.clone(),
            decision_date: context.date,
            current_status: vehicle.train.current_status,
            decision: verdict.decision,
            confidence_score: verdict.confidence,
            justification,
            conflicts,
            overridden: false,
        }
    }
}
