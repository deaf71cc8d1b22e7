pub mod auth;
pub mod drivers;
pub mod gps;
pub mod projects;
pub mod records;
pub mod vehicles;
pub mod ws;

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{DEFAULT_WINDOW_DAYS, FleetSummary};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(vehicles::router())
        .merge(drivers::router())
        .merge(projects::router())
        .merge(records::router())
        .merge(gps::router())
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub(crate) fn not_found(kind: &str, id: Uuid) -> AppError {
    AppError::NotFound(format!("{kind} {id} not found"))
}

/// Look-ahead window for the expiring/upcoming queries.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

impl WindowQuery {
    pub fn days(&self) -> u32 {
        self.days.unwrap_or(DEFAULT_WINDOW_DAYS)
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    vehicles: usize,
    drivers: usize,
    projects: usize,
    tracked_vehicles: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    state
        .read(|fleet| {
            Json(HealthResponse {
                status: "ok",
                vehicles: fleet.vehicles.len(),
                drivers: fleet.drivers.len(),
                projects: fleet.projects.len(),
                tracked_vehicles: fleet.tracked_vehicle_ids().len(),
            })
        })
        .await
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Json<FleetSummary> {
    Json(state.read(|fleet| fleet.fleet_summary()).await)
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}
