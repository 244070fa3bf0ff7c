use serde::{Deserialize, Serialize};

use super::domain::{
    CertificateStatus, CleaningStatus, JobStatus, OperationalStatus, VehicleRecords,
};
use super::evaluation::InductionDecision;
use super::orchestrator::InductionError;

/// Cleaning slots available per train per day.
const DAILY_CLEANING_SLOTS: usize = 3;

/// Decision counts for a plan or scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub total: usize,
    pub service: usize,
    pub standby: usize,
    pub maintenance: usize,
    pub availability_rate: f64,
}

impl DecisionSummary {
    pub fn from_decisions(decisions: &[InductionDecision]) -> Self {
        let tally = |status: OperationalStatus| {
            decisions
                .iter()
                .filter(|decision| decision.decision == status)
                .count()
        };

        let total = decisions.len();
        let service = tally(OperationalStatus::Service);
        let availability_rate = if total == 0 {
            0.0
        } else {
            service as f64 / total as f64 * 100.0
        };

        Self {
            total,
            service,
            standby: tally(OperationalStatus::Standby),
            maintenance: tally(OperationalStatus::Maintenance),
            availability_rate,
        }
    }

    pub fn impact(&self) -> ImpactLevel {
        ImpactLevel::from_availability(self.availability_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    Healthy,
    Monitor,
    Critical,
}

impl ImpactLevel {
    pub fn from_availability(rate: f64) -> Self {
        if rate < 70.0 {
            ImpactLevel::Critical
        } else if rate >= 80.0 {
            ImpactLevel::Healthy
        } else {
            ImpactLevel::Monitor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ImpactLevel::Healthy => "Sufficient train availability for normal operations",
            ImpactLevel::Monitor => "Availability reduced, monitor service levels",
            ImpactLevel::Critical => "Train availability below 70%, service disruption likely",
        }
    }
}

/// Fleet-wide readiness indicators computed from raw compliance records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetMetrics {
    pub total_trains: usize,
    pub service_ready: usize,
    pub maintenance_required: usize,
    pub standby: usize,
    pub branding_compliance: f64,
    pub open_job_cards: usize,
    pub expired_certificates: usize,
    pub cleaning_slots_used: f64,
    pub avg_mileage: f64,
}

impl FleetMetrics {
    pub fn from_fleet(fleet: &[VehicleRecords]) -> Result<Self, InductionError> {
        if fleet.is_empty() {
            return Err(InductionError::EmptyFleet);
        }

        let total_trains = fleet.len();
        let with_status = |status: OperationalStatus| {
            fleet
                .iter()
                .filter(|vehicle| vehicle.train.current_status == status)
                .count()
        };

        let commitments = fleet.iter().flat_map(|vehicle| vehicle.branding.iter());
        let (total_branding, fulfilled_branding) =
            commitments.fold((0usize, 0usize), |(total, fulfilled), commitment| {
                (total + 1, fulfilled + usize::from(commitment.is_fulfilled()))
            });
        let branding_compliance = if total_branding == 0 {
            100.0
        } else {
            fulfilled_branding as f64 / total_branding as f64 * 100.0
        };

        let open_job_cards = fleet
            .iter()
            .flat_map(|vehicle| vehicle.job_cards.iter())
            .filter(|card| card.status == JobStatus::Open)
            .count();
        let expired_certificates = fleet
            .iter()
            .flat_map(|vehicle| vehicle.certificates.iter())
            .filter(|certificate| certificate.status == CertificateStatus::Expired)
            .count();
        let scheduled_cleaning = fleet
            .iter()
            .flat_map(|vehicle| vehicle.cleaning.iter())
            .filter(|schedule| schedule.status == CleaningStatus::Scheduled)
            .count();

        let total_mileage: u64 = fleet
            .iter()
            .map(|vehicle| u64::from(vehicle.train.total_mileage))
            .sum();

        Ok(Self {
            total_trains,
            service_ready: with_status(OperationalStatus::Service),
            maintenance_required: with_status(OperationalStatus::Maintenance),
            standby: with_status(OperationalStatus::Standby),
            branding_compliance,
            open_job_cards,
            expired_certificates,
            cleaning_slots_used: scheduled_cleaning as f64
                / (total_trains * DAILY_CLEANING_SLOTS) as f64
                * 100.0,
            avg_mileage: total_mileage as f64 / total_trains as f64,
        })
    }
}
