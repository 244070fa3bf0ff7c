use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{
    BrandingCommitment, CleaningSchedule, FitnessCertificate, JobCard, MileageLog, Train,
    TrainId, VehicleRecords,
};

/// Flat record lists as exported by the fleet data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub trains: Vec<Train>,
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

impl FleetSnapshot {
    pub fn from_json_slice(raw: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(raw)
    }

    /// Group the flat record lists per vehicle, keeping the train order of the snapshot.
    ///
    /// Records pointing at a train that is not part of the snapshot are dropped.
    pub fn assemble(self) -> Vec<VehicleRecords> {
        let FleetSnapshot {
            trains,
            certificates,
            job_cards,
            branding,
            cleaning,
            mileage_logs,
        } = self;

        let mut fleet: Vec<VehicleRecords> = Vec::with_capacity(trains.len());
        let mut index: HashMap<TrainId, usize> = HashMap::with_capacity(trains.len());
        for train in trains {
            index.entry(train.id.clone()).or_insert(fleet.len());
            fleet.push(VehicleRecords::bare(train));
        }

        attach(
            &mut fleet,
            &index,
            certificates,
            "certificate",
            |record| &record.train_id,
            |vehicle, record| vehicle.certificates.push(record),
        );
        attach(
            &mut fleet,
            &index,
            job_cards,
            "job card",
            |record| &record.train_id,
            |vehicle, record| vehicle.job_cards.push(record),
        );
        attach(
            &mut fleet,
            &index,
            branding,
            "branding commitment",
            |record| &record.train_id,
            |vehicle, record| vehicle.branding.push(record),
        );
        attach(
            &mut fleet,
            &index,
            cleaning,
            "cleaning schedule",
            |record| &record.train_id,
            |vehicle, record| vehicle.cleaning.push(record),
        );
        attach(
            &mut fleet,
            &index,
            mileage_logs,
            "mileage log",
            |record| &record.train_id,
            |vehicle, record| vehicle.mileage_logs.push(record),
        );

        fleet
    }
}

fn attach<T>(
    fleet: &mut [VehicleRecords],
    index: &HashMap<TrainId, usize>,
    records: Vec<T>,
    kind: &'static str,
    owner: impl Fn(&T) -> &TrainId,
    push: impl Fn(&mut VehicleRecords, T),
) {
    let mut orphaned = 0usize;
    for record in records {
        match index.get(owner(&record)) {
            Some(&position) => push(&mut fleet[position], record),
            None => orphaned += 1,
        }
    }

    if orphaned > 0 {
        warn!(kind, orphaned, "dropping records for trains missing from snapshot");
    }
}
