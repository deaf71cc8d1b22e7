use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use serde::Deserialize;
use uuid::Uuid;

use super::not_found;
use crate::error::AppError;
use crate::models::driver::{Driver, DriverPatch, NewDriver};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(create_driver).get(list_drivers))
        .route("/drivers/available", get(available_drivers))
        .route(
            "/drivers/:id",
            get(get_driver).patch(update_driver).delete(delete_driver),
        )
        .route(
            "/drivers/:id/vehicle",
            put(assign_vehicle).delete(unassign_vehicle),
        )
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignVehicleRequest {
    pub vehicle_id: Uuid,
}

async fn create_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewDriver>,
) -> Result<Json<Driver>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let driver = state
        .mutate("add_driver", |fleet, _| fleet.add_driver(payload))
        .await?;
    Ok(Json(driver))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    Json(state.read(|fleet| fleet.drivers.clone()).await)
}

async fn available_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    Json(
        state
            .read(|fleet| fleet.available_drivers().into_iter().cloned().collect())
            .await,
    )
}

async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    state
        .read(|fleet| fleet.driver(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("driver", id))
}

async fn update_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DriverPatch>,
) -> Result<Json<Driver>, AppError> {
    state
        .mutate("update_driver", |fleet, _| fleet.update_driver(id, patch))
        .await?
        .map(Json)
        .ok_or_else(|| not_found("driver", id))
}

async fn delete_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_driver", |fleet, _| fleet.delete_driver(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn assign_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignVehicleRequest>,
) -> Result<Json<Driver>, AppError> {
    state
        .mutate("assign_driver_to_vehicle", |fleet, _| {
            if fleet.assign_driver_to_vehicle(id, payload.vehicle_id) {
                fleet.driver(id).cloned()
            } else {
                None
            }
        })
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "driver {id} or vehicle {} not found",
                payload.vehicle_id
            ))
        })
}

async fn unassign_vehicle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    state
        .mutate("unassign_driver", |fleet, _| {
            if fleet.unassign_driver(id) {
                fleet.driver(id).cloned()
            } else {
                None
            }
        })
        .await?
        .map(Json)
        .ok_or_else(|| not_found("driver", id))
}
