//! Career recommendations: profile in, four scored career paths out.

use tracing::info;

use crate::guidance::prompts::{
    CAREER_PROMPT_TEMPLATE, CAREER_SYSTEM_TEMPLATE, USER_CONTEXT_TEMPLATE,
};
use crate::guidance::{Operation, ServiceError};
use crate::llm_client::prompts::{CURRENCY_INSTRUCTION, MARKET_CONTEXT};
use crate::llm_client::schema::Schema;
use crate::llm_client::{parse_json, GenerationRequest, LanguageModel, LlmError};
use crate::models::career::{MarketDemand, RecommendationResponse};
use crate::models::profile::UserProfile;

const CAREER_TEMPERATURE: f32 = 0.7;

/// Output contract for `RecommendationResponse`. Field names, types and the
/// `marketDemand` enum must match the record definitions exactly.
pub fn recommendation_schema() -> Schema {
    let salary_range = Schema::object(vec![
        ("min", Schema::string()),
        ("max", Schema::string()),
        (
            "currency",
            Schema::string().describe("Currency symbol, MUST be '₹'"),
        ),
    ])
    .all_required();

    let roadmap_step = Schema::object(vec![
        ("title", Schema::string()),
        ("description", Schema::string()),
        ("duration", Schema::string()),
    ]);

    let career = Schema::object(vec![
        ("id", Schema::string()),
        (
            "title",
            Schema::string().describe("Job Title or Career Path Name"),
        ),
        (
            "matchScore",
            Schema::integer().describe("Match percentage 0-100"),
        ),
        ("description", Schema::string().describe("Why this fits the user")),
        ("salaryRange", salary_range),
        ("marketDemand", Schema::string_enum(&MarketDemand::ALL)),
        (
            "growthTrend",
            Schema::string().describe("e.g., '+22% growth expected'"),
        ),
        ("requiredSkills", Schema::string_array()),
        (
            "roadmap",
            Schema::array(roadmap_step).describe("3-5 step execution plan"),
        ),
        ("pros", Schema::string_array()),
        ("cons", Schema::string_array()),
    ])
    .all_required();

    Schema::object(vec![
        (
            "analysis",
            Schema::string().describe(
                "A brief, encouraging analysis of the user's profile and why these paths \
                 were chosen.",
            ),
        ),
        ("careers", Schema::array(career)),
    ])
    .all_required()
}

pub fn build_system_instruction() -> String {
    CAREER_SYSTEM_TEMPLATE
        .replace("{market}", MARKET_CONTEXT)
        .replace("{currency_instruction}", CURRENCY_INSTRUCTION)
}

/// Renders the profile block embedded in the career prompt.
pub fn render_user_context(profile: &UserProfile) -> String {
    USER_CONTEXT_TEMPLATE
        .replace("{stage}", profile.stage.describe())
        .replace("{academic_background}", &profile.academic_background)
        .replace("{grades}", &profile.grades)
        .replace("{interests}", &profile.interests_joined())
        .replace("{skills}", &profile.skills_joined())
        .replace("{work_environment}", profile.work_environment_label())
        .replace("{name}", &profile.name)
}

pub fn build_career_prompt(profile: &UserProfile) -> String {
    CAREER_PROMPT_TEMPLATE.replace("{user_context}", &render_user_context(profile))
}

/// Parses and validates the model's JSON answer.
pub fn parse_recommendations(text: &str) -> Result<RecommendationResponse, LlmError> {
    let response: RecommendationResponse = parse_json(text)?;
    response.validate().map_err(LlmError::Schema)?;
    Ok(response)
}

pub async fn request_career_paths(
    model: &dyn LanguageModel,
    profile: &UserProfile,
) -> Result<RecommendationResponse, ServiceError> {
    let fail = |e| ServiceError::new(Operation::CareerPaths, e);

    info!("Requesting career paths (stage={})", profile.stage.as_str());

    let system = build_system_instruction();
    let prompt = build_career_prompt(profile);
    let schema = recommendation_schema();
    let request = GenerationRequest::new(&prompt)
        .system(&system)
        .json(&schema)
        .temperature(CAREER_TEMPERATURE);

    let text = model
        .generate(&request)
        .await
        .map_err(fail)?
        .ok_or(LlmError::EmptyContent)
        .map_err(fail)?;

    let response = parse_recommendations(&text).map_err(fail)?;
    info!("Received {} career paths", response.careers.len());
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::testing::{advisor, transport_error, ScriptedModel};
    use crate::guidance::ErrorKind;
    use crate::models::career::{fixtures, RoadmapStep};
    use crate::models::profile::{UserStage, WorkEnvironment};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Kavya".to_string(),
            stage: UserStage::PostSecondary,
            academic_background: "PCM".to_string(),
            grades: "88%".to_string(),
            interests: vec!["Technology".to_string(), "Gaming".to_string()],
            skills: vec!["Coding".to_string()],
            preferred_work_environment: Some(WorkEnvironment::Remote),
        }
    }

    #[test]
    fn test_user_context_renders_every_field() {
        let context = render_user_context(&profile());
        assert!(context.contains("- Name: Kavya"));
        assert!(context.contains("Finished 12th Grade (High School)"));
        assert!(context.contains("- Academic Background: PCM"));
        assert!(context.contains("- Grades/Performance: 88%"));
        assert!(context.contains("- Interests: Technology, Gaming"));
        assert!(context.contains("- Skills: Coding"));
        assert!(context.contains("- Work Environment Preference: Remote"));
    }

    #[test]
    fn test_user_context_defaults_work_environment_to_any() {
        let mut p = profile();
        p.preferred_work_environment = None;
        assert!(render_user_context(&p).contains("Work Environment Preference: Any"));
    }

    #[test]
    fn test_system_instruction_pins_rupees() {
        let system = build_system_instruction();
        assert!(system.contains("INR (₹)"));
        assert!(system.contains("Primary Market: India and Global."));
        assert!(!system.contains('{'));
    }

    #[test]
    fn test_schema_requires_every_career_field() {
        let value = serde_json::to_value(recommendation_schema()).unwrap();
        let required = &value["properties"]["careers"]["items"]["required"];
        for field in [
            "id",
            "title",
            "matchScore",
            "description",
            "salaryRange",
            "marketDemand",
            "growthTrend",
            "requiredSkills",
            "roadmap",
            "pros",
            "cons",
        ] {
            assert!(
                required.as_array().unwrap().iter().any(|f| f == field),
                "{field} must be required"
            );
        }
        assert_eq!(
            value["properties"]["careers"]["items"]["properties"]["marketDemand"]["enum"],
            serde_json::json!(["High", "Medium", "Low"])
        );
        assert_eq!(
            value["properties"]["careers"]["items"]["properties"]["matchScore"]["type"],
            "INTEGER"
        );
    }

    #[tokio::test]
    async fn test_four_careers_parse_in_order() {
        let expected = fixtures::recommendations();
        let model = ScriptedModel::text(&serde_json::to_string(&expected).unwrap());

        let response = advisor(&model).career_paths(&profile()).await.unwrap();
        assert_eq!(response, expected);

        let ids: Vec<_> = response.careers.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4"]);

        let requests = model.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains("suggest 4 distinct career paths"));
        assert!(requests[0].schema.is_some());
        assert_eq!(requests[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn test_fenced_json_is_accepted() {
        let body = serde_json::to_string(&fixtures::recommendations()).unwrap();
        let model = ScriptedModel::text(&format!("```json\n{body}\n```"));
        assert!(advisor(&model).career_paths(&profile()).await.is_ok());
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let model = ScriptedModel::replying(vec![
            Err(transport_error()),
            Ok(Some(
                serde_json::to_string(&fixtures::recommendations()).unwrap(),
            )),
        ]);
        let err = advisor(&model).career_paths(&profile()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(model.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_response_fails() {
        let model = ScriptedModel::replying(vec![Ok(None)]);
        let err = advisor(&model).career_paths(&profile()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResponse);
    }

    #[tokio::test]
    async fn test_malformed_json_fails_as_parse() {
        let model = ScriptedModel::text("{\"analysis\": \"ok\", \"careers\": [");
        let err = advisor(&model).career_paths(&profile()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_roadmap_step_fields_are_optional() {
        let schema = serde_json::to_value(recommendation_schema()).unwrap();
        let step = &schema["properties"]["careers"]["items"]["properties"]["roadmap"]["items"];
        assert!(step.get("required").is_none());

        let mut payload = serde_json::to_value(fixtures::recommendations()).unwrap();
        payload["careers"][0]["roadmap"] =
            serde_json::json!([{"title": "Step 1", "description": "learn"}, {}]);

        let response = parse_recommendations(&payload.to_string()).unwrap();
        let roadmap = &response.careers[0].roadmap;
        assert_eq!(roadmap[0].title, "Step 1");
        assert_eq!(roadmap[0].duration, "");
        assert_eq!(roadmap[1], RoadmapStep::default());
    }

    #[tokio::test]
    async fn test_out_of_range_score_fails_as_parse() {
        let mut response = fixtures::recommendations();
        response.careers[0].match_score = 120;
        let model = ScriptedModel::text(&serde_json::to_string(&response).unwrap());
        let err = advisor(&model).career_paths(&profile()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
