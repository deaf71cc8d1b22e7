use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::not_found;
use crate::error::AppError;
use crate::models::fuel::FuelRecord;
use crate::models::gps::{LocationEvent, TrackingEntry, TrackingReport};
use crate::models::insurance::InsurancePolicy;
use crate::models::maintenance::MaintenanceRecord;
use crate::models::vehicle::{NewVehicle, Vehicle, VehiclePatch};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/vehicles", post(create_vehicle).get(list_vehicles))
        .route("/vehicles/active", get(active_vehicles))
        .route("/vehicles/sold", get(sold_vehicles))
        .route("/vehicles/lost", get(lost_vehicles))
        .route("/vehicles/in-maintenance", get(vehicles_in_maintenance))
        .route(
            "/vehicles/:id",
            get(get_vehicle).patch(update_vehicle).delete(delete_vehicle),
        )
        .route("/vehicles/:id/sold", post(mark_sold))
        .route("/vehicles/:id/lost", post(mark_lost))
        .route("/vehicles/:id/restore", post(restore))
        .route(
            "/vehicles/:id/project",
            put(assign_project).delete(unassign_project),
        )
        .route("/vehicles/:id/records", get(vehicle_records))
        .route("/vehicles/:id/tracking", get(vehicle_tracking))
        .route("/vehicles/:id/tracking/refresh", post(refresh_tracking))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSoldRequest {
    pub sold_date: NaiveDate,
    pub sold_price: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkLostRequest {
    pub lost_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignProjectRequest {
    pub project_id: Uuid,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecords {
    pub maintenance: Vec<MaintenanceRecord>,
    pub insurance: Vec<InsurancePolicy>,
    pub fuel_records: Vec<FuelRecord>,
    pub tracking: Option<TrackingEntry>,
}

async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewVehicle>,
) -> Result<Json<Vehicle>, AppError> {
    if payload.plate_number.trim().is_empty() {
        return Err(AppError::BadRequest("plateNumber cannot be empty".to_string()));
    }

    let vehicle = state
        .mutate("add_vehicle", |fleet, _| fleet.add_vehicle(payload))
        .await?;
    Ok(Json(vehicle))
}

async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(state.read(|fleet| fleet.vehicles.clone()).await)
}

async fn active_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(
        state
            .read(|fleet| fleet.active_vehicles().into_iter().cloned().collect())
            .await,
    )
}

async fn sold_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(
        state
            .read(|fleet| fleet.sold_vehicles().into_iter().cloned().collect())
            .await,
    )
}

async fn lost_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(
        state
            .read(|fleet| fleet.lost_vehicles().into_iter().cloned().collect())
            .await,
    )
}

async fn vehicles_in_maintenance(State(state): State<Arc<AppState>>) -> Json<Vec<Vehicle>> {
    Json(
        state
            .read(|fleet| fleet.vehicles_in_maintenance().into_iter().cloned().collect())
            .await,
    )
}

async fn get_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    state
        .read(|fleet| fleet.vehicle(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("vehicle", id))
}

async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<VehiclePatch>,
) -> Result<Json<Vehicle>, AppError> {
    state
        .mutate("update_vehicle", |fleet, _| fleet.update_vehicle(id, patch))
        .await?
        .map(Json)
        .ok_or_else(|| not_found("vehicle", id))
}

async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_vehicle", |fleet, _| fleet.delete_vehicle(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_sold(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkSoldRequest>,
) -> Result<Json<Vehicle>, AppError> {
    state
        .mutate("mark_vehicle_sold", |fleet, _| {
            if fleet.mark_vehicle_sold(id, payload.sold_date, payload.sold_price) {
                fleet.vehicle(id).cloned()
            } else {
                None
            }
        })
        .await?
        .map(Json)
        .ok_or_else(|| not_found("vehicle", id))
}

async fn mark_lost(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<MarkLostRequest>,
) -> Result<Json<Vehicle>, AppError> {
    state
        .mutate("mark_vehicle_lost", |fleet, _| {
            if fleet.mark_vehicle_lost(id, payload.lost_date, payload.notes) {
                fleet.vehicle(id).cloned()
            } else {
                None
            }
        })
        .await?
        .map(Json)
        .ok_or_else(|| not_found("vehicle", id))
}

async fn restore(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    state
        .mutate("restore_vehicle", |fleet, _| {
            if fleet.restore_vehicle(id) {
                fleet.vehicle(id).cloned()
            } else {
                None
            }
        })
        .await?
        .map(Json)
        .ok_or_else(|| not_found("vehicle", id))
}

async fn assign_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignProjectRequest>,
) -> Result<Json<TrackingEntry>, AppError> {
    let entry = state
        .mutate("assign_vehicle_to_project", |fleet, sampler| {
            fleet.assign_vehicle_to_project(id, payload.project_id, sampler)
        })
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "vehicle {id} or project {} not found",
                payload.project_id
            ))
        })?;

    if let Some(location) = entry.latest_location() {
        state.publish_location(LocationEvent {
            vehicle_id: entry.vehicle_id,
            project_id: entry.project_id,
            location: location.clone(),
        });
    }

    Ok(Json(entry))
}

async fn unassign_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let applied = state
        .mutate("unassign_vehicle_from_project", |fleet, _| {
            fleet.unassign_vehicle_from_project(id)
        })
        .await?;

    if applied {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("vehicle", id))
    }
}

async fn vehicle_records(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Json<VehicleRecords> {
    state
        .read(|fleet| {
            Json(VehicleRecords {
                maintenance: fleet.maintenance_for_vehicle(id).into_iter().cloned().collect(),
                insurance: fleet.insurance_for_vehicle(id).into_iter().cloned().collect(),
                fuel_records: fleet.fuel_records_for_vehicle(id).into_iter().cloned().collect(),
                tracking: fleet.tracking_for_vehicle(id).cloned(),
            })
        })
        .await
}

async fn vehicle_tracking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TrackingReport>, AppError> {
    state
        .read(|fleet| fleet.tracking_for_vehicle(id).map(TrackingReport::from))
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no tracking entry for vehicle {id}")))
}

async fn refresh_tracking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationEvent>, AppError> {
    let event = state
        .mutate("update_gps_location", |fleet, sampler| {
            fleet.update_gps_location(id, sampler)
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("vehicle {id} is not being tracked")))?;

    state.publish_location(event.clone());
    Ok(Json(event))
}
