use axum::{
    extract::{Multipart, State},
    Json,
};
use anyhow::anyhow;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::task::JoinError;
use tracing::{error, info};
use uuid::Uuid;

use crate::app::{CareerApp, Submission};
use crate::dashboard::resume_tools::{ResumeTools, ScoreBand, ToolOutcome};
use crate::dashboard::selection::DashboardView;
use crate::errors::AppError;
use crate::guidance::ats::normalize_country;
use crate::models::ats::AtsAnalysis;
use crate::models::career::RecommendationResponse;
use crate::models::profile::UserProfile;
use crate::session::store::MemorySessionStore;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub profile: UserProfile,
}

#[derive(Serialize)]
pub struct CareersResponse {
    pub recommendations: RecommendationResponse,
    pub dashboard: DashboardView,
}

#[derive(Serialize)]
pub struct ResumeDraftResponse {
    pub markdown: String,
}

#[derive(Deserialize)]
pub struct AtsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Serialize)]
pub struct AtsResponse {
    #[serde(flatten)]
    pub analysis: AtsAnalysis,
    pub band: ScoreBand,
}

/// POST /api/v1/careers
pub async fn handle_career_paths(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<CareersResponse>, AppError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, stage = req.profile.stage.as_str(), "Career paths requested");

    let mut app = CareerApp::start(MemorySessionStore::default()).map_err(anyhow::Error::from)?;
    if app.complete_profile(req.profile, &state.advisor).await? == Submission::Busy {
        return Err(anyhow!("fresh session reported a submission in flight").into());
    }
    let (Some(recommendations), Some(dashboard)) = (app.recommendations(), app.dashboard()) else {
        return Err(anyhow!("completed submission left no recommendations").into());
    };

    info!(%request_id, careers = recommendations.careers.len(), "Career paths ready");
    Ok(Json(CareersResponse {
        dashboard: dashboard.view(recommendations),
        recommendations: recommendations.clone(),
    }))
}

/// POST /api/v1/resume/draft
pub async fn handle_resume_draft(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ResumeDraftResponse>, AppError> {
    let request_id = Uuid::new_v4();
    info!(%request_id, "Resume draft requested");

    let mut tools = ResumeTools::default();
    tools.generate(&state.advisor, &req.profile).await?;

    info!(%request_id, chars = tools.generated_resume.len(), "Resume draft ready");
    Ok(Json(ResumeDraftResponse {
        markdown: tools.generated_resume,
    }))
}

/// POST /api/v1/resume/ats
pub async fn handle_ats_check(
    State(state): State<AppState>,
    Json(req): Json<AtsRequest>,
) -> Result<Json<AtsResponse>, AppError> {
    run_ats_check(&state, &req.resume_text, req.country.as_deref()).await
}

/// POST /api/v1/resume/ats/upload
/// Multipart with a `file` part (PDF) and an optional `country` part.
pub async fn handle_ats_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AtsResponse>, AppError> {
    let mut pdf: Option<Bytes> = None;
    let mut country: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| AppError::Validation("Invalid file".to_string()))?;
                pdf = Some(data);
            }
            Some("country") => {
                let value = field
                    .text()
                    .await
                    .map_err(|_| AppError::Validation("Invalid country field".to_string()))?;
                country = Some(value);
            }
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation("Missing 'file' part".to_string()))?;
    let resume_text = extract_pdf_text(pdf).await?;
    run_ats_check(&state, &resume_text, country.as_deref()).await
}

async fn run_ats_check(
    state: &AppState,
    resume_text: &str,
    country: Option<&str>,
) -> Result<Json<AtsResponse>, AppError> {
    let mut tools = ResumeTools {
        ats_input: resume_text.to_string(),
        target_country: normalize_country(country),
        ..ResumeTools::default()
    };

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        country = %tools.target_country,
        chars = resume_text.chars().count(),
        "ATS check requested"
    );

    if tools.check_ats(&state.advisor).await? == ToolOutcome::Skipped {
        return Err(AppError::Validation("resume_text must not be blank".to_string()));
    }
    let (Some(band), Some(analysis)) = (tools.score_band(), tools.ats_result.take()) else {
        return Err(anyhow!("ATS check finished without a result").into());
    };

    info!(%request_id, score = analysis.score, ?band, "ATS check complete");
    Ok(Json(AtsResponse { analysis, band }))
}

/// Text layer of an uploaded PDF. Unreadable files are the caller's fault.
async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(extraction_failed)?;

    let text = extracted
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF has no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// The extractor panics on some malformed files; that is still a bad upload.
fn extraction_failed(e: JoinError) -> AppError {
    if e.is_panic() {
        error!("PDF extraction panicked: {e}");
        AppError::UnprocessableEntity("Could not read PDF".to_string())
    } else {
        AppError::Internal(e.into())
    }
}
