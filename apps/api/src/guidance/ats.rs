//! ATS audit of pasted resume text for a target country.

use tracing::info;

use crate::guidance::prompts::ATS_PROMPT_TEMPLATE;
use crate::guidance::{Operation, ServiceError};
use crate::llm_client::schema::Schema;
use crate::llm_client::{parse_json, GenerationRequest, LanguageModel, LlmError};
use crate::models::ats::AtsAnalysis;

/// Resume text beyond this many characters is not sent to the model.
pub const MAX_RESUME_CHARS: usize = 5000;

/// Target countries offered by the client. Any other string is passed through.
pub const SUPPORTED_COUNTRIES: [&str; 5] = [
    "India",
    "USA",
    "New Zealand",
    "Russia",
    "European Countries",
];

pub const DEFAULT_COUNTRY: &str = "India";

pub fn ats_schema() -> Schema {
    Schema::object(vec![
        ("score", Schema::integer().describe("ATS Score 0-100")),
        (
            "summary",
            Schema::string().describe("Short summary of the audit"),
        ),
        ("missingKeywords", Schema::string_array()),
        ("formattingIssues", Schema::string_array()),
        ("suggestions", Schema::string_array()),
        (
            "countrySpecificAdvice",
            Schema::string().describe("Advice specific to the selected country's norms"),
        ),
    ])
    .all_required()
}

/// First `MAX_RESUME_CHARS` characters of `text`, never splitting a character.
pub fn truncate_resume(text: &str) -> &str {
    match text.char_indices().nth(MAX_RESUME_CHARS) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Blank or missing country falls back to `DEFAULT_COUNTRY`.
pub fn normalize_country(country: Option<&str>) -> String {
    match country.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_COUNTRY.to_string(),
    }
}

pub fn build_ats_prompt(resume_text: &str, country: &str) -> String {
    ATS_PROMPT_TEMPLATE
        .replace("{country}", country)
        .replace("{resume_text}", truncate_resume(resume_text))
}

pub fn parse_ats_analysis(text: &str) -> Result<AtsAnalysis, LlmError> {
    let analysis: AtsAnalysis = parse_json(text)?;
    analysis.validate().map_err(LlmError::Schema)?;
    Ok(analysis)
}

pub async fn request_ats_analysis(
    model: &dyn LanguageModel,
    resume_text: &str,
    country: &str,
) -> Result<AtsAnalysis, ServiceError> {
    let fail = |e| ServiceError::new(Operation::AtsAnalysis, e);

    info!(
        "Requesting ATS analysis for {country} ({} chars)",
        resume_text.chars().count()
    );

    let prompt = build_ats_prompt(resume_text, country);
    let schema = ats_schema();
    let request = GenerationRequest::new(&prompt).json(&schema);

    let text = model
        .generate(&request)
        .await
        .map_err(fail)?
        .ok_or(LlmError::EmptyContent)
        .map_err(fail)?;

    let analysis = parse_ats_analysis(&text).map_err(fail)?;
    info!("ATS score for {country}: {}", analysis.score);
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::testing::{advisor, ScriptedModel};
    use crate::guidance::ErrorKind;

    const ANALYSIS_JSON: &str = r#"{
        "score": 72,
        "summary": "Clear layout",
        "missingKeywords": ["Kubernetes"],
        "formattingIssues": ["Tables"],
        "suggestions": ["Add metrics"],
        "countrySpecificAdvice": "One page is standard"
    }"#;

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_resume("short resume"), "short resume");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "₹".repeat(MAX_RESUME_CHARS + 10);
        let truncated = truncate_resume(&text);
        assert_eq!(truncated.chars().count(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_truncate_exact_length_is_untouched() {
        let text = "a".repeat(MAX_RESUME_CHARS);
        assert_eq!(truncate_resume(&text).len(), MAX_RESUME_CHARS);
    }

    #[test]
    fn test_normalize_country() {
        assert_eq!(normalize_country(None), "India");
        assert_eq!(normalize_country(Some("  ")), "India");
        assert_eq!(normalize_country(Some(" USA ")), "USA");
        assert_eq!(normalize_country(Some("Japan")), "Japan");
    }

    #[test]
    fn test_schema_fields() {
        let value = serde_json::to_value(ats_schema()).unwrap();
        assert_eq!(value["properties"]["score"]["type"], "INTEGER");
        assert_eq!(value["required"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_long_resume_is_truncated_before_sending() {
        let resume = format!("{}{}", "x".repeat(MAX_RESUME_CHARS), "TAIL_MARKER");
        let model = ScriptedModel::text(ANALYSIS_JSON);

        let analysis = advisor(&model)
            .ats_analysis(&resume, "New Zealand")
            .await
            .unwrap();
        assert_eq!(analysis.score, 72);

        let prompt = &model.requests()[0].prompt;
        assert!(!prompt.contains("TAIL_MARKER"));
        assert!(prompt.contains("Recruiter for New Zealand"));
        assert!(prompt.contains("Specific norms for New Zealand"));
    }

    #[tokio::test]
    async fn test_score_above_100_is_rejected() {
        let model = ScriptedModel::text(&ANALYSIS_JSON.replace("72", "180"));
        let err = advisor(&model)
            .ats_analysis("resume", "India")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_empty_response_fails() {
        let model = ScriptedModel::replying(vec![Ok(None)]);
        let err = advisor(&model)
            .ats_analysis("resume", "India")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
        assert_eq!(err.to_string(), "Failed to analyze resume.");
    }
}
