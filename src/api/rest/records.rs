//! Maintenance, insurance and fuel records. These only carry a plain
//! `vehicleId` reference, so their routes are straight CRUD plus the
//! date-window queries.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use uuid::Uuid;

use super::{WindowQuery, not_found};
use crate::error::AppError;
use crate::models::fuel::{FuelPatch, FuelRecord, NewFuelRecord};
use crate::models::insurance::{InsurancePatch, InsurancePolicy, NewInsurancePolicy};
use crate::models::maintenance::{MaintenancePatch, MaintenanceRecord, NewMaintenanceRecord};
use crate::state::AppState;
use crate::store::FuelSummary;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/maintenance", post(create_maintenance).get(list_maintenance))
        .route("/maintenance/upcoming", get(upcoming_maintenance))
        .route(
            "/maintenance/:id",
            get(get_maintenance)
                .patch(update_maintenance)
                .delete(delete_maintenance),
        )
        .route("/insurance", post(create_insurance).get(list_insurance))
        .route("/insurance/expiring", get(expiring_insurance))
        .route(
            "/insurance/:id",
            get(get_insurance)
                .patch(update_insurance)
                .delete(delete_insurance),
        )
        .route("/fuel", post(create_fuel).get(list_fuel))
        .route("/fuel/summary", get(fuel_summary))
        .route(
            "/fuel/:id",
            get(get_fuel).patch(update_fuel).delete(delete_fuel),
        )
}

async fn create_maintenance(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMaintenanceRecord>,
) -> Result<Json<MaintenanceRecord>, AppError> {
    if payload.kind.trim().is_empty() {
        return Err(AppError::BadRequest("type cannot be empty".to_string()));
    }

    let record = state
        .mutate("add_maintenance", |fleet, _| fleet.add_maintenance(payload))
        .await?;
    Ok(Json(record))
}

async fn list_maintenance(State(state): State<Arc<AppState>>) -> Json<Vec<MaintenanceRecord>> {
    Json(state.read(|fleet| fleet.maintenance.clone()).await)
}

async fn upcoming_maintenance(
    State(state): State<Arc<AppState>>,
    Query(window): Query<WindowQuery>,
) -> Json<Vec<MaintenanceRecord>> {
    Json(
        state
            .read(|fleet| {
                fleet
                    .upcoming_maintenance(window.days())
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await,
    )
}

async fn get_maintenance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceRecord>, AppError> {
    state
        .read(|fleet| fleet.maintenance_record(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("maintenance record", id))
}

async fn update_maintenance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<MaintenancePatch>,
) -> Result<Json<MaintenanceRecord>, AppError> {
    state
        .mutate("update_maintenance", |fleet, _| {
            fleet.update_maintenance(id, patch)
        })
        .await?
        .map(Json)
        .ok_or_else(|| not_found("maintenance record", id))
}

async fn delete_maintenance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_maintenance", |fleet, _| fleet.delete_maintenance(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_insurance(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewInsurancePolicy>,
) -> Result<Json<InsurancePolicy>, AppError> {
    if payload.policy_number.trim().is_empty() {
        return Err(AppError::BadRequest("policyNumber cannot be empty".to_string()));
    }

    let policy = state
        .mutate("add_insurance", |fleet, _| fleet.add_insurance(payload))
        .await?;
    Ok(Json(policy))
}

async fn list_insurance(State(state): State<Arc<AppState>>) -> Json<Vec<InsurancePolicy>> {
    Json(state.read(|fleet| fleet.insurance.clone()).await)
}

async fn expiring_insurance(
    State(state): State<Arc<AppState>>,
    Query(window): Query<WindowQuery>,
) -> Json<Vec<InsurancePolicy>> {
    Json(
        state
            .read(|fleet| {
                fleet
                    .expiring_insurance(window.days())
                    .into_iter()
                    .cloned()
                    .collect()
            })
            .await,
    )
}

async fn get_insurance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<InsurancePolicy>, AppError> {
    state
        .read(|fleet| fleet.insurance_policy(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("insurance policy", id))
}

async fn update_insurance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<InsurancePatch>,
) -> Result<Json<InsurancePolicy>, AppError> {
    state
        .mutate("update_insurance", |fleet, _| fleet.update_insurance(id, patch))
        .await?
        .map(Json)
        .ok_or_else(|| not_found("insurance policy", id))
}

async fn delete_insurance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_insurance", |fleet, _| fleet.delete_insurance(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_fuel(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewFuelRecord>,
) -> Result<Json<FuelRecord>, AppError> {
    let record = state
        .mutate("add_fuel_record", |fleet, _| fleet.add_fuel_record(payload))
        .await?;
    Ok(Json(record))
}

async fn list_fuel(State(state): State<Arc<AppState>>) -> Json<Vec<FuelRecord>> {
    Json(state.read(|fleet| fleet.fuel_records.clone()).await)
}

async fn fuel_summary(State(state): State<Arc<AppState>>) -> Json<FuelSummary> {
    Json(state.read(|fleet| fleet.fuel_summary()).await)
}

async fn get_fuel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuelRecord>, AppError> {
    state
        .read(|fleet| fleet.fuel_record(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("fuel record", id))
}

async fn update_fuel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FuelPatch>,
) -> Result<Json<FuelRecord>, AppError> {
    state
        .mutate("update_fuel_record", |fleet, _| fleet.update_fuel_record(id, patch))
        .await?
        .map(Json)
        .ok_or_else(|| not_found("fuel record", id))
}

async fn delete_fuel(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_fuel_record", |fleet, _| fleet.delete_fuel_record(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
