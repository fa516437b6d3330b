use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::schema::SCHEMA_VERSION;
use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Service status plus whether model-backed routes can work at all.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "campus-api",
        "model": MODEL,
        "schema_version": SCHEMA_VERSION,
        "model_configured": state.config.gemini_api_key.is_some()
    }))
}
