use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use uuid::Uuid;

use super::not_found;
use crate::error::AppError;
use crate::models::project::{NewProject, Project, ProjectPatch};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/projects", post(create_project).get(list_projects))
        .route("/projects/active", get(active_projects))
        .route(
            "/projects/:id",
            get(get_project).patch(update_project).delete(delete_project),
        )
        .route("/projects/:id/vehicles", get(project_vehicles))
}

async fn create_project(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewProject>,
) -> Result<Json<Project>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("name cannot be empty".to_string()));
    }

    let project = state
        .mutate("add_project", |fleet, _| fleet.add_project(payload))
        .await?;
    Ok(Json(project))
}

async fn list_projects(State(state): State<Arc<AppState>>) -> Json<Vec<Project>> {
    Json(state.read(|fleet| fleet.projects.clone()).await)
}

async fn active_projects(State(state): State<Arc<AppState>>) -> Json<Vec<Project>> {
    Json(
        state
            .read(|fleet| fleet.active_projects().into_iter().cloned().collect())
            .await,
    )
}

async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Project>, AppError> {
    state
        .read(|fleet| fleet.project(id).cloned())
        .await
        .map(Json)
        .ok_or_else(|| not_found("project", id))
}

async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> Result<Json<Project>, AppError> {
    state
        .mutate("update_project", |fleet, _| fleet.update_project(id, patch))
        .await?
        .map(Json)
        .ok_or_else(|| not_found("project", id))
}

async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .mutate("delete_project", |fleet, _| fleet.delete_project(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn project_vehicles(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    state
        .read(|fleet| {
            fleet.project(id).map(|_| {
                fleet
                    .project_vehicles(id)
                    .into_iter()
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
        .await
        .map(Json)
        .ok_or_else(|| not_found("project", id))
}
