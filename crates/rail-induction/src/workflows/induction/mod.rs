//! Induction planning: per-vehicle rule evaluation, fleet orchestration, and
//! what-if scenario simulation.

pub mod domain;
pub mod evaluation;
pub mod orchestrator;
pub mod report;
pub mod router;
pub mod service;
pub mod simulation;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use domain::{
    BrandingCommitment, BrandingStatus, CertificateStatus, CleaningSchedule, CleaningStatus,
    CleaningType, FitnessCertificate, JobCard, JobPriority, JobStatus, JobType, MileageLog,
    OperationalStatus, SlotTime, Train, TrainId, VehicleRecords,
};
pub use evaluation::{
    Conflict, ConflictKind, ConflictSeverity, DecisionContext, InductionDecision,
    InductionEngine, InductionThresholds, Justification, PolicyRule, POLICY_TABLE,
};
pub use orchestrator::{FleetPlanner, InductionError};
pub use report::{DecisionSummary, FleetMetrics, ImpactLevel};
pub use router::induction_router;
pub use service::{InductionPlan, InductionService};
pub use simulation::{apply_modifications, ScenarioModification, ScenarioReport, ScenarioSimulator};
pub use snapshot::FleetSnapshot;
