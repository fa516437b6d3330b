pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::guidance::handlers as guidance;
use crate::onboarding::handlers as onboarding;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;

/// Upper bound for uploaded resume PDFs.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Onboarding
        .route("/api/v1/onboarding/tags", get(onboarding::handle_tags))
        .route("/api/v1/onboarding/start", post(onboarding::handle_start))
        .route("/api/v1/onboarding/next", post(onboarding::handle_next))
        .route("/api/v1/onboarding/back", post(onboarding::handle_back))
        .route("/api/v1/onboarding/toggle", post(onboarding::handle_toggle))
        .route("/api/v1/onboarding/submit", post(onboarding::handle_submit))
        // Guidance
        .route("/api/v1/careers", post(guidance::handle_career_paths))
        .route("/api/v1/dashboard", post(dashboard::handle_dashboard))
        .route("/api/v1/resume/draft", post(guidance::handle_resume_draft))
        .route("/api/v1/resume/pdf", post(render::handle_resume_pdf))
        .route("/api/v1/resume/ats", post(guidance::handle_ats_check))
        .route(
            "/api/v1/resume/ats/upload",
            post(guidance::handle_ats_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Auth stub
        .route("/api/v1/auth/session", post(session::handle_sign_in))
        .route("/api/v1/auth/restore", post(session::handle_restore))
        .with_state(state)
}
