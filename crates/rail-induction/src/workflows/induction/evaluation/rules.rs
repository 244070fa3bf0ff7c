use chrono::TimeDelta;

use super::super::domain::{
    BrandingCommitment, CertificateStatus, CleaningSchedule, CleaningStatus, FitnessCertificate,
    JobCard, JobPriority, MileageLog, VehicleRecords,
};
use super::config::InductionThresholds;
use super::{Conflict, ConflictKind, ConflictSeverity, DecisionContext, Justification};

/// Accumulator threaded through the domain checks.
///
/// Each check consumes the ledger and hands back an extended one, so the
/// conflict order always follows the check order.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComplianceLedger {
    pub justification: Justification,
    pub conflicts: Vec<Conflict>,
    pub open_high_jobs: usize,
    pub outstanding_branding: usize,
    /// `None` when the fleet baseline is zero and variance is undefined.
    pub mileage_variance: Option<f64>,
}

impl ComplianceLedger {
    fn push(mut self, kind: ConflictKind, severity: ConflictSeverity, message: String) -> Self {
        self.conflicts.push(Conflict::new(kind, severity, message));
        self
    }

    pub fn warning_count(&self) -> usize {
        self.conflicts
            .iter()
            .filter(|conflict| conflict.severity == ConflictSeverity::Warning)
            .count()
    }
}

pub(crate) fn check_vehicle(
    vehicle: &VehicleRecords,
    context: &DecisionContext,
    thresholds: &InductionThresholds,
) -> ComplianceLedger {
    let ledger = ComplianceLedger::default();
    let ledger = check_fitness(ledger, &vehicle.certificates);
    let ledger = check_job_cards(ledger, &vehicle.job_cards);
    let ledger = check_branding(ledger, &vehicle.branding, thresholds);
    let ledger = check_mileage(ledger, &vehicle.mileage_logs, context, thresholds);
    check_cleaning(ledger, &vehicle.cleaning, context, thresholds)
}

pub(crate) fn check_fitness(
    ledger: ComplianceLedger,
    certificates: &[FitnessCertificate],
) -> ComplianceLedger {
    let mut ledger = ledger;

    let expired = departments(certificates, CertificateStatus::Expired);
    if !expired.is_empty() {
        ledger.justification.fitness_check = false;
        ledger = ledger.push(
            ConflictKind::FitnessCertificate,
            ConflictSeverity::Critical,
            format!(
                "{} expired certificate(s): {}",
                expired.len(),
                expired.join(", ")
            ),
        );
    }

    let pending = departments(certificates, CertificateStatus::Pending);
    if !pending.is_empty() {
        ledger = ledger.push(
            ConflictKind::FitnessCertificate,
            ConflictSeverity::Warning,
            format!(
                "{} certificate(s) expiring soon: {}",
                pending.len(),
                pending.join(", ")
            ),
        );
    }

    ledger
}

fn departments(certificates: &[FitnessCertificate], status: CertificateStatus) -> Vec<&str> {
    certificates
        .iter()
        .filter(|certificate| certificate.status == status)
        .map(|certificate| certificate.department.as_str())
        .collect()
}

pub(crate) fn check_job_cards(ledger: ComplianceLedger, job_cards: &[JobCard]) -> ComplianceLedger {
    let critical: Vec<&str> = job_cards
        .iter()
        .filter(|card| card.is_open_with(JobPriority::Critical))
        .map(|card| card.job_number.as_str())
        .collect();
    let open_high_jobs = job_cards
        .iter()
        .filter(|card| card.is_open_with(JobPriority::High))
        .count();

    let mut ledger = ledger;
    ledger.open_high_jobs = open_high_jobs;

    if !critical.is_empty() {
        ledger.justification.job_card_check = false;
        ledger = ledger.push(
            ConflictKind::JobCard,
            ConflictSeverity::Critical,
            format!(
                "{} critical job(s) pending: {}",
                critical.len(),
                critical.join(", ")
            ),
        );
    }

    if open_high_jobs > 0 {
        ledger = ledger.push(
            ConflictKind::JobCard,
            ConflictSeverity::Warning,
            format!("{open_high_jobs} high priority job(s) pending"),
        );
    }

    ledger
}

pub(crate) fn check_branding(
    ledger: ComplianceLedger,
    commitments: &[BrandingCommitment],
    thresholds: &InductionThresholds,
) -> ComplianceLedger {
    let mut ledger = ledger;

    for commitment in commitments.iter().filter(|c| c.is_outstanding()) {
        ledger.outstanding_branding += 1;

        // A zero-hour requirement is already satisfied.
        let Some(completion) = commitment.completion_pct() else {
            continue;
        };

        if completion < thresholds.branding_critical_pct {
            ledger.justification.branding_check = false;
            ledger = ledger.push(
                ConflictKind::Branding,
                ConflictSeverity::Critical,
                format!(
                    "{} campaign only {:.0}% complete ({}/{} hours)",
                    commitment.advertiser,
                    completion,
                    commitment.hours_completed,
                    commitment.minimum_hours_required
                ),
            );
        } else if completion < thresholds.branding_warning_pct {
            ledger = ledger.push(
                ConflictKind::Branding,
                ConflictSeverity::Warning,
                format!(
                    "{} campaign {:.0}% complete, needs more service hours",
                    commitment.advertiser, completion
                ),
            );
        }
    }

    ledger
}

pub(crate) fn check_mileage(
    ledger: ComplianceLedger,
    logs: &[MileageLog],
    context: &DecisionContext,
    thresholds: &InductionThresholds,
) -> ComplianceLedger {
    if context.avg_mileage == 0.0 || !context.avg_mileage.is_finite() {
        return ledger;
    }

    // A window reaching past the representable range has no lower bound.
    let window_start = TimeDelta::try_days(thresholds.mileage_window_days)
        .and_then(|window| context.evaluated_at.checked_sub_signed(window));
    let recent_usage: u64 = logs
        .iter()
        .filter(|log| window_start.map_or(true, |start| log.log_date >= start))
        .map(|log| u64::from(log.kilometers))
        .sum();

    let variance = (recent_usage as f64 - context.avg_mileage) / context.avg_mileage * 100.0;

    let mut ledger = ledger;
    ledger.mileage_variance = Some(variance);

    if variance > thresholds.mileage_variance_pct {
        ledger = ledger.push(
            ConflictKind::Mileage,
            ConflictSeverity::Warning,
            format!("Train usage {variance:.0}% above average, consider rest"),
        );
    } else if variance < -thresholds.mileage_variance_pct {
        ledger.justification.mileage_check = false;
        ledger = ledger.push(
            ConflictKind::Mileage,
            ConflictSeverity::Info,
            format!(
                "Train usage {:.0}% below average, prioritize for service",
                variance.abs()
            ),
        );
    }

    ledger
}

pub(crate) fn check_cleaning(
    ledger: ComplianceLedger,
    schedules: &[CleaningSchedule],
    context: &DecisionContext,
    thresholds: &InductionThresholds,
) -> ComplianceLedger {
    let horizon = TimeDelta::try_hours(thresholds.cleaning_lookahead_hours)
        .and_then(|lookahead| context.evaluated_at.checked_add_signed(lookahead));

    // Only the first upcoming slot is reported.
    let upcoming = schedules.iter().find(|schedule| {
        schedule.status == CleaningStatus::Scheduled
            && schedule.scheduled_date >= context.evaluated_at
            && horizon.map_or(true, |horizon| schedule.scheduled_date <= horizon)
    });

    match upcoming {
        Some(schedule) => ledger.push(
            ConflictKind::Cleaning,
            ConflictSeverity::Info,
            format!(
                "Cleaning scheduled for {} ({})",
                schedule.scheduled_date.format("%Y-%m-%d %H:%M UTC"),
                schedule.slot_time.label()
            ),
        ),
        None => ledger,
    }
}
