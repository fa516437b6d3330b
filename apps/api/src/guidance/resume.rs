//! Resume drafting: free-form Markdown, no output schema.

use tracing::{info, warn};

use crate::guidance::prompts::{RESUME_FALLBACK, RESUME_PROMPT_TEMPLATE};
use crate::guidance::{Operation, ServiceError};
use crate::llm_client::prompts::MARKET_CONTEXT;
use crate::llm_client::{GenerationRequest, LanguageModel};
use crate::models::profile::UserProfile;

pub fn build_resume_prompt(profile: &UserProfile) -> String {
    RESUME_PROMPT_TEMPLATE
        .replace("{market}", MARKET_CONTEXT)
        .replace("{stage}", profile.stage.as_str())
        .replace("{academic_background}", &profile.academic_background)
        .replace("{grades}", &profile.grades)
        .replace("{skills}", &profile.skills_joined())
        .replace("{interests}", &profile.interests_joined())
        .replace("{name}", &profile.name)
}

/// An empty model answer degrades to `RESUME_FALLBACK`; every other
/// failure is returned.
pub async fn request_resume_draft(
    model: &dyn LanguageModel,
    profile: &UserProfile,
) -> Result<String, ServiceError> {
    info!("Requesting resume draft (stage={})", profile.stage.as_str());

    let prompt = build_resume_prompt(profile);
    let text = model
        .generate(&GenerationRequest::new(&prompt))
        .await
        .map_err(|e| ServiceError::new(Operation::ResumeDraft, e))?;

    match text {
        Some(markdown) if !markdown.trim().is_empty() => {
            info!("Resume draft generated ({} chars)", markdown.len());
            Ok(markdown)
        }
        _ => {
            warn!("Resume draft came back empty, using fallback text");
            Ok(RESUME_FALLBACK.to_string())
        }
    }
}
