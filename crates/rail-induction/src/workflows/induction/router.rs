use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::report::FleetMetrics;
use super::service::{InductionPlan, InductionService};
use super::simulation::{ScenarioModification, ScenarioReport};
use super::snapshot::FleetSnapshot;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub snapshot: FleetSnapshot,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub snapshot: FleetSnapshot,
    #[serde(default)]
    pub modifications: Vec<ScenarioModification>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    pub snapshot: FleetSnapshot,
}

/// Router builder exposing the induction planner, simulator, and fleet metrics.
pub fn induction_router(service: Arc<InductionService>) -> Router {
    Router::new()
        .route("/api/v1/induction/plan", post(plan_handler))
        .route("/api/v1/induction/simulate", post(simulate_handler))
        .route("/api/v1/induction/metrics", post(metrics_handler))
        .with_state(service)
}

/// Requests without an explicit instant are evaluated at the time they arrive.
fn resolve_clock(
    date: Option<NaiveDate>,
    evaluated_at: Option<DateTime<Utc>>,
) -> (NaiveDate, DateTime<Utc>) {
    let evaluated_at = evaluated_at.unwrap_or_else(Utc::now);
    let date = date.unwrap_or_else(|| evaluated_at.date_naive());
    (date, evaluated_at)
}

pub(crate) async fn plan_handler(
    State(service): State<Arc<InductionService>>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<InductionPlan>, AppError> {
    let Json(request) = payload?;
    let (date, evaluated_at) = resolve_clock(request.date, request.evaluated_at);
    let plan = service.plan(request.snapshot, date, evaluated_at)?;
    Ok(Json(plan))
}

pub(crate) async fn simulate_handler(
    State(service): State<Arc<InductionService>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<ScenarioReport>, AppError> {
    let Json(request) = payload?;
    let (date, evaluated_at) = resolve_clock(request.date, request.evaluated_at);
    let report = service.simulate(request.snapshot, &request.modifications, date, evaluated_at)?;
    Ok(Json(report))
}

pub(crate) async fn metrics_handler(
    State(service): State<Arc<InductionService>>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<FleetMetrics>, AppError> {
    let Json(request) = payload?;
    let metrics = service.metrics(request.snapshot)?;
    Ok(Json(metrics))
}
