use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for rolling stock units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainId(pub String);

impl TrainId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operational state a vehicle can be inducted into for a planning date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalStatus {
    Service,
    Standby,
    Maintenance,
}

impl OperationalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            OperationalStatus::Service => "service",
            OperationalStatus::Standby => "standby",
            OperationalStatus::Maintenance => "maintenance",
        }
    }

    pub const fn ordered() -> [OperationalStatus; 3] {
        [
            OperationalStatus::Service,
            OperationalStatus::Standby,
            OperationalStatus::Maintenance,
        ]
    }
}

impl std::str::FromStr for OperationalStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "service" => Ok(OperationalStatus::Service),
            "standby" => Ok(OperationalStatus::Standby),
            "maintenance" => Ok(OperationalStatus::Maintenance),
            other => Err(format!(
                "unknown status '{other}' (expected service, standby, or maintenance)"
            )),
        }
    }
}

/// Rolling stock unit as supplied by the fleet data provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    pub id: TrainId,
    pub train_number: String,
    pub depot_location: String,
    pub total_mileage: u32,
    pub current_status: OperationalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stabling_position: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    Valid,
    Expired,
    Pending,
}

/// Safety sign-off scoped to one inspection department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessCertificate {
    pub id: String,
    pub train_id: TrainId,
    pub department: String,
    pub certificate_number: String,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
    pub status: CertificateStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Preventive,
    Corrective,
    Inspection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    InProgress,
    Closed,
}

/// Maintenance work order raised against a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCard {
    pub id: String,
    pub train_id: TrainId,
    pub job_number: String,
    pub job_type: JobType,
    pub description: String,
    pub priority: JobPriority,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl JobCard {
    pub fn is_open_with(&self, priority: JobPriority) -> bool {
        self.status == JobStatus::Open && self.priority == priority
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandingStatus {
    Active,
    Completed,
    Overdue,
}

/// Advertiser contract obliging a vehicle to run a minimum number of revenue hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandingCommitment {
    pub id: String,
    pub train_id: TrainId,
    pub advertiser: String,
    pub campaign_name: String,
    pub contract_start: NaiveDate,
    pub contract_end: NaiveDate,
    pub minimum_hours_required: f64,
    pub hours_completed: f64,
    pub status: BrandingStatus,
}

impl BrandingCommitment {
    /// Active and overdue contracts still accrue required hours.
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, BrandingStatus::Active | BrandingStatus::Overdue)
    }

    /// Percentage of contracted hours delivered; `None` when no hours are required.
    pub fn completion_pct(&self) -> Option<f64> {
        if self.minimum_hours_required <= 0.0 {
            return None;
        }
        Some(self.hours_completed / self.minimum_hours_required * 100.0)
    }

    pub fn is_fulfilled(&self) -> bool {
        self.hours_completed >= self.minimum_hours_required
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTime {
    Morning,
    Afternoon,
    Evening,
}

impl SlotTime {
    pub const fn label(self) -> &'static str {
        match self {
            SlotTime::Morning => "morning",
            SlotTime::Afternoon => "afternoon",
            SlotTime::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningType {
    Light,
    Deep,
    Exterior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Depot cleaning slot booked for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSchedule {
    pub id: String,
    pub train_id: TrainId,
    pub scheduled_date: DateTime<Utc>,
    pub slot_time: SlotTime,
    pub cleaning_type: CleaningType,
    pub duration_minutes: u32,
    pub manpower_required: u32,
    pub status: CleaningStatus,
}

/// Dated kilometer entry used to derive recent usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageLog {
    pub id: String,
    pub train_id: TrainId,
    pub log_date: DateTime<Utc>,
    pub kilometers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

/// A vehicle bundled with every compliance record the evaluator consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecords {
    pub train: Train,
    #[serde(default)]
    pub certificates: Vec<FitnessCertificate>,
    #[serde(default)]
    pub job_cards: Vec<JobCard>,
    #[serde(default)]
    pub branding: Vec<BrandingCommitment>,
    #[serde(default)]
    pub cleaning: Vec<CleaningSchedule>,
    #[serde(default)]
    pub mileage_logs: Vec<MileageLog>,
}

impl VehicleRecords {
    /// Vehicle with no compliance records in any domain.
    pub fn bare(train: Train) -> Self {
        Self {
            train,
            certificates: Vec::new(),
            job_cards: Vec::new(),
            branding: Vec::new(),
            cleaning: Vec::new(),
            mileage_logs: Vec::new(),
        }
    }

    pub fn id(&self) -> &TrainId {
        &self.train.id
    }
}
