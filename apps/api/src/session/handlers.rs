use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::CareerApp;
use crate::errors::AppError;
use crate::models::user::AuthUser;
use crate::session::store::{MemorySessionStore, SessionStore};
use crate::session::{AuthMode, SESSION_KEY};

#[derive(Deserialize)]
pub struct SessionRequest {
    #[serde(default)]
    pub mode: AuthMode,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: AuthUser,
    pub initial: Option<char>,
    pub storage_key: &'static str,
    /// Exactly what the browser should write under `storage_key`.
    pub stored_value: String,
}

#[derive(Deserialize)]
pub struct RestoreRequest {
    pub stored_value: String,
}

#[derive(Serialize)]
pub struct RestoreResponse {
    pub user: Option<AuthUser>,
    /// The record was unreadable and should be removed.
    pub discard: bool,
}

/// POST /api/v1/auth/session
/// Simulated sign-in. Nothing is kept server side.
pub async fn handle_sign_in(
    Json(req): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be blank".to_string()));
    }
    let mut app = CareerApp::start(MemorySessionStore::default()).map_err(anyhow::Error::from)?;
    let user = app
        .login(req.mode, req.name.as_deref(), &req.email)
        .map_err(anyhow::Error::from)?
        .clone();

    // Same encoding `CareerApp::start` reads back.
    let stored_value = app
        .store()
        .get(SESSION_KEY)
        .map_err(anyhow::Error::from)?
        .unwrap_or_default();

    Ok(Json(SessionResponse {
        initial: user.initial(),
        user,
        storage_key: SESSION_KEY,
        stored_value,
    }))
}

/// POST /api/v1/auth/restore
pub async fn handle_restore(
    Json(req): Json<RestoreRequest>,
) -> Result<Json<RestoreResponse>, AppError> {
    let app = restored_app(&req.stored_value)?;
    let user = app.user().cloned();
    let discard = user.is_none();
    Ok(Json(RestoreResponse { user, discard }))
}

/// A per-request app over a store holding `stored_value`, as the browser
/// would hand it back.
pub fn restored_app(stored_value: &str) -> Result<CareerApp<MemorySessionStore>, AppError> {
    let mut store = MemorySessionStore::default();
    store
        .set(SESSION_KEY, stored_value)
        .map_err(anyhow::Error::from)?;
    let app = CareerApp::start(store).map_err(anyhow::Error::from)?;
    Ok(app)
}
