use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};

use crate::engine::gps_refresh::refresh_tracked_vehicles;
use crate::error::AppError;
use crate::models::gps::{LocationEvent, TrackingEntry, TrackingReport};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gps", get(list_tracking))
        .route("/gps/active", get(active_tracking))
        .route("/gps/refresh", post(refresh_all))
}

async fn list_tracking(State(state): State<Arc<AppState>>) -> Json<Vec<TrackingEntry>> {
    Json(state.read(|fleet| fleet.gps_data.clone()).await)
}

async fn active_tracking(State(state): State<Arc<AppState>>) -> Json<Vec<TrackingReport>> {
    Json(
        state
            .read(|fleet| {
                fleet
                    .tracked_vehicle_ids()
                    .into_iter()
                    .filter_map(|vehicle_id| fleet.tracking_for_vehicle(vehicle_id))
                    .map(TrackingReport::from)
                    .collect()
            })
            .await,
    )
}

/// Manual counterpart of the periodic refresh.
async fn refresh_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationEvent>>, AppError> {
    let events = refresh_tracked_vehicles(&state).await?;
    Ok(Json(events))
}
