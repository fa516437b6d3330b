use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::guidance::ats::SUPPORTED_COUNTRIES;
use crate::models::profile::{UserProfile, WorkEnvironment};
use crate::onboarding::form::ProfileForm;
use crate::onboarding::tags::{INTEREST_TAGS, SKILL_TAGS};
use crate::session::handlers::restored_app;

#[derive(Deserialize)]
pub struct StartRequest {
    /// The browser's stored session record, if any.
    #[serde(default)]
    pub stored_value: Option<String>,
}

#[derive(Deserialize)]
pub struct FormRequest {
    pub form: ProfileForm,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagList {
    Interests,
    Skills,
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub form: ProfileForm,
    pub list: TagList,
    pub value: String,
    /// Typed into the free-text box rather than picked from the chips.
    #[serde(default)]
    pub custom: bool,
}

#[derive(Serialize)]
pub struct FormResponse {
    pub form: ProfileForm,
    /// 1-based position for the progress indicator.
    pub step_number: u8,
    pub can_advance: bool,
    pub can_submit: bool,
}

impl From<ProfileForm> for FormResponse {
    fn from(form: ProfileForm) -> Self {
        Self {
            step_number: form.step.number(),
            can_advance: form.can_advance(),
            can_submit: form.can_submit(),
            form,
        }
    }
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub form: ProfileForm,
    pub profile: UserProfile,
}

#[derive(Serialize)]
pub struct TagsResponse {
    pub interests: &'static [&'static str],
    pub skills: &'static [&'static str],
    pub work_environments: Vec<&'static str>,
    pub countries: &'static [&'static str],
}

/// POST /api/v1/onboarding/start
/// A fresh form, pre-seeded with the name from a stored session.
pub async fn handle_start(Json(req): Json<StartRequest>) -> Result<Json<FormResponse>, AppError> {
    let form = match req.stored_value.as_deref() {
        Some(stored_value) => restored_app(stored_value)?.form(),
        None => ProfileForm::new(None),
    };
    Ok(Json(form.into()))
}

/// POST /api/v1/onboarding/next
pub async fn handle_next(Json(req): Json<FormRequest>) -> Result<Json<FormResponse>, AppError> {
    let mut form = req.form;
    form.next()?;
    Ok(Json(form.into()))
}

/// POST /api/v1/onboarding/back
pub async fn handle_back(Json(req): Json<FormRequest>) -> Result<Json<FormResponse>, AppError> {
    let mut form = req.form;
    form.back()?;
    Ok(Json(form.into()))
}

/// POST /api/v1/onboarding/toggle
pub async fn handle_toggle(
    Json(req): Json<ToggleRequest>,
) -> Result<Json<FormResponse>, AppError> {
    let mut form = req.form;
    match (req.list, req.custom) {
        (TagList::Interests, false) => form.toggle_interest(&req.value),
        (TagList::Skills, false) => form.toggle_skill(&req.value),
        (list, true) => {
            let added = match list {
                TagList::Interests => form.add_custom_interest(&req.value),
                TagList::Skills => form.add_custom_skill(&req.value),
            };
            if !added {
                return Err(AppError::Validation("value must not be blank".to_string()));
            }
        }
    }
    Ok(Json(form.into()))
}

/// POST /api/v1/onboarding/submit
pub async fn handle_submit(
    Json(req): Json<FormRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let mut form = req.form;
    let profile = form.submit()?;
    Ok(Json(SubmitResponse { form, profile }))
}

/// GET /api/v1/onboarding/tags
pub async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        interests: &INTEREST_TAGS,
        skills: &SKILL_TAGS,
        work_environments: WorkEnvironment::ALL.iter().map(|w| w.as_str()).collect(),
        countries: &SUPPORTED_COUNTRIES,
    })
}
