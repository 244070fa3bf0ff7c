use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use rail_induction::error::AppError;
use rail_induction::workflows::induction::{FleetSnapshot, OperationalStatus, ScenarioModification};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Parses `TRAIN_ID=STATUS` into a forced-status modification.
pub(crate) fn parse_forced_status(raw: &str) -> Result<ScenarioModification, String> {
    let (train_id, status) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TRAIN_ID=STATUS, got '{raw}'"))?;

    let train_id = train_id.trim();
    if train_id.is_empty() {
        return Err(format!("missing train id in '{raw}'"));
    }

    let status = status.parse::<OperationalStatus>()?;
    Ok(ScenarioModification::force(train_id, status))
}

pub(crate) fn load_snapshot(path: &Path) -> Result<FleetSnapshot, AppError> {
    let raw = std::fs::read(path)?;
    Ok(FleetSnapshot::from_json_slice(&raw)?)
}
