use axum::response::Response;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::induction::domain::{
    BrandingCommitment, BrandingStatus, CertificateStatus, CleaningSchedule, CleaningStatus,
    CleaningType, FitnessCertificate, JobCard, JobPriority, JobStatus, JobType, MileageLog,
    OperationalStatus, SlotTime, Train, TrainId, VehicleRecords,
};
use crate::workflows::induction::evaluation::{DecisionContext, InductionEngine};
use crate::workflows::induction::snapshot::FleetSnapshot;

pub(super) const FLEET_AVERAGE_KM: u32 = 40_000;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn planning_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(super) fn context(avg_mileage: f64) -> DecisionContext {
    DecisionContext::new(planning_date(), avg_mileage, now())
}

pub(super) fn engine() -> InductionEngine {
    InductionEngine::default()
}

pub(super) fn train(id: &str, total_mileage: u32) -> Train {
    Train {
        id: TrainId::new(id),
        train_number: format!("KMRL-{id}"),
        depot_location: "Muttom Depot".to_string(),
        total_mileage,
        current_status: OperationalStatus::Service,
        stabling_position: Some(format!("SB-{id}")),
    }
}

/// Vehicle whose trailing usage sits exactly on the fleet average.
pub(super) fn nominal_vehicle(id: &str) -> VehicleRecords {
    let mut vehicle = VehicleRecords::bare(train(id, FLEET_AVERAGE_KM));
    vehicle
        .mileage_logs
        .push(mileage_log(id, 3, FLEET_AVERAGE_KM));
    vehicle
}

pub(super) fn certificate(
    train_id: &str,
    department: &str,
    status: CertificateStatus,
) -> FitnessCertificate {
    FitnessCertificate {
        id: format!("cert-{train_id}-{department}"),
        train_id: TrainId::new(train_id),
        department: department.to_string(),
        certificate_number: format!("FC-{train_id}-{}", department.to_ascii_uppercase()),
        issue_date: NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid"),
        expiry_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid"),
        status,
    }
}

pub(super) fn job_card(
    train_id: &str,
    job_number: &str,
    priority: JobPriority,
    status: JobStatus,
) -> JobCard {
    JobCard {
        id: format!("job-{job_number}"),
        train_id: TrainId::new(train_id),
        job_number: job_number.to_string(),
        job_type: JobType::Corrective,
        description: "Bogie inspection follow-up".to_string(),
        priority,
        status,
        assigned_to: Some("Rolling Stock Team".to_string()),
        due_date: None,
    }
}

pub(super) fn branding(
    train_id: &str,
    advertiser: &str,
    hours_completed: f64,
    minimum_hours_required: f64,
    status: BrandingStatus,
) -> BrandingCommitment {
    BrandingCommitment {
        id: format!("brand-{train_id}-{advertiser}"),
        train_id: TrainId::new(train_id),
        advertiser: advertiser.to_string(),
        campaign_name: format!("{advertiser} Q1"),
        contract_start: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid"),
        contract_end: NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid"),
        minimum_hours_required,
        hours_completed,
        status,
    }
}

pub(super) fn cleaning_in(
    train_id: &str,
    hours_from_now: i64,
    slot_time: SlotTime,
    status: CleaningStatus,
) -> CleaningSchedule {
    CleaningSchedule {
        id: format!("clean-{train_id}-{hours_from_now}"),
        train_id: TrainId::new(train_id),
        scheduled_date: now() + Duration::hours(hours_from_now),
        slot_time,
        cleaning_type: CleaningType::Light,
        duration_minutes: 45,
        manpower_required: 2,
        status,
    }
}

pub(super) fn mileage_log(train_id: &str, days_ago: i64, kilometers: u32) -> MileageLog {
    MileageLog {
        id: format!("km-{train_id}-{days_ago}"),
        train_id: TrainId::new(train_id),
        log_date: now() - Duration::days(days_ago),
        kilometers,
        route: Some("Aluva - Thrippunithura".to_string()),
    }
}

/// Three vehicles averaging 40,000 km, each with one distinct issue profile.
pub(super) fn scenario_fleet() -> Vec<VehicleRecords> {
    let mut expired = nominal_vehicle("A");
    expired
        .certificates
        .push(certificate("A", "signaling", CertificateStatus::Expired));
    expired
        .certificates
        .push(certificate("A", "electrical", CertificateStatus::Valid));

    let clean = nominal_vehicle("B");

    let mut branded = nominal_vehicle("C");
    branded.branding.push(branding(
        "C",
        "Lulu Mall",
        80.0,
        200.0,
        BrandingStatus::Active,
    ));

    vec![expired, clean, branded]
}

pub(super) fn snapshot_from(fleet: Vec<VehicleRecords>) -> FleetSnapshot {
    let mut snapshot = FleetSnapshot::default();
    for vehicle in fleet {
        snapshot.trains.push(vehicle.train);
        snapshot.certificates.extend(vehicle.certificates);
        snapshot.job_cards.extend(vehicle.job_cards);
        snapshot.branding.extend(vehicle.branding);
        snapshot.cleaning.extend(vehicle.cleaning);
        snapshot.mileage_logs.extend(vehicle.mileage_logs);
    }
    snapshot
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
