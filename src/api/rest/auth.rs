use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde::Serialize;

use crate::error::AppError;
use crate::models::auth::{Credentials, User};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(session))
        .route("/preferences/dark-mode/toggle", post(toggle_dark_mode))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    pub dark_mode: bool,
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<SessionResponse>, AppError> {
    let accepted = state
        .mutate("login", |fleet, _| fleet.login(&credentials))
        .await?;
    if !accepted {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(SessionResponse {
        is_authenticated: true,
        user: Some(User::administrator()),
    }))
}

async fn logout(State(state): State<Arc<AppState>>) -> Result<StatusCode, AppError> {
    state.mutate("logout", |fleet, _| fleet.logout()).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    state
        .read(|fleet| {
            Json(SessionResponse {
                is_authenticated: fleet.is_authenticated,
                user: fleet.user.clone(),
            })
        })
        .await
}

async fn toggle_dark_mode(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PreferencesResponse>, AppError> {
    let dark_mode = state
        .mutate("toggle_dark_mode", |fleet, _| fleet.toggle_dark_mode())
        .await?;
    Ok(Json(PreferencesResponse { dark_mode }))
}
