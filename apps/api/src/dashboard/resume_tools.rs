//! Resume tools tab: draft builder and ATS checker.
//!
//! Each control has its own in-flight flag. A control refuses to start while
//! its own call is outstanding; the two controls do not block each other.

use serde::{Deserialize, Serialize};

use crate::guidance::ats::DEFAULT_COUNTRY;
use crate::guidance::{CareerAdvisor, InFlight, ServiceError};
use crate::models::ats::AtsAnalysis;
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Builder,
    Ats,
}

/// Colour band of the ATS gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            ScoreBand::Strong
        } else if score > 40 {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }
}

/// Outcome of pressing a resume-tools button.
#[derive(Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    Done,
    /// The same control already has a call in flight.
    Busy,
    /// Nothing to do (blank ATS input).
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeTools {
    pub mode: ToolMode,
    pub generated_resume: String,
    pub generating: bool,
    pub ats_input: String,
    pub target_country: String,
    pub ats_result: Option<AtsAnalysis>,
    pub checking: bool,
    pub last_error: Option<String>,
}

impl Default for ResumeTools {
    fn default() -> Self {
        Self {
            mode: ToolMode::Builder,
            generated_resume: String::new(),
            generating: false,
            ats_input: String::new(),
            target_country: DEFAULT_COUNTRY.to_string(),
            ats_result: None,
            checking: false,
            last_error: None,
        }
    }
}

// Tab and button state only the browser client reads.
#[cfg_attr(not(test), allow(dead_code))]
impl ResumeTools {
    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    /// Label of the builder button.
    pub fn generate_label(&self) -> &'static str {
        if self.generated_resume.is_empty() {
            "Generate Resume Draft"
        } else {
            "Regenerate Draft"
        }
    }
}

impl ResumeTools {
    /// Generates (or regenerates) the resume draft.
    pub async fn generate(
        &mut self,
        advisor: &CareerAdvisor,
        profile: &UserProfile,
    ) -> Result<ToolOutcome, ServiceError> {
        let Some(in_flight) = InFlight::start(&mut self.generating) else {
            return Ok(ToolOutcome::Busy);
        };
        let result = advisor.resume_draft(profile).await;
        drop(in_flight);

        match result {
            Ok(draft) => {
                self.generated_resume = draft;
                self.last_error = None;
                Ok(ToolOutcome::Done)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Runs the ATS audit on `ats_input`. Blank input is a no-op; the
    /// previous result is cleared before the call starts.
    pub async fn check_ats(
        &mut self,
        advisor: &CareerAdvisor,
    ) -> Result<ToolOutcome, ServiceError> {
        if self.ats_input.trim().is_empty() {
            return Ok(ToolOutcome::Skipped);
        }
        let Some(in_flight) = InFlight::start(&mut self.checking) else {
            return Ok(ToolOutcome::Busy);
        };
        self.ats_result = None;
        let result = advisor
            .ats_analysis(&self.ats_input, &self.target_country)
            .await;
        drop(in_flight);

        match result {
            Ok(analysis) => {
                self.ats_result = Some(analysis);
                self.last_error = None;
                Ok(ToolOutcome::Done)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn score_band(&self) -> Option<ScoreBand> {
        self.ats_result.as_ref().map(|a| ScoreBand::from_score(a.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::guidance::testing::{advisor, stalled_advisor, transport_error, ScriptedModel};
    use crate::models::profile::UserStage;

    const ANALYSIS_JSON: &str = r#"{
        "score": 55,
        "summary": "ok",
        "missingKeywords": [],
        "formattingIssues": [],
        "suggestions": [],
        "countrySpecificAdvice": "none"
    }"#;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Tara".to_string(),
            stage: UserStage::Graduate,
            academic_background: "BA English".to_string(),
            grades: "First class".to_string(),
            interests: vec!["Writing".to_string()],
            skills: vec![],
            preferred_work_environment: None,
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(71), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(70), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(41), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Weak);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Weak);
    }

    #[test]
    fn test_defaults() {
        let tools = ResumeTools::default();
        assert_eq!(tools.mode, ToolMode::Builder);
        assert_eq!(tools.target_country, "India");
        assert_eq!(tools.generate_label(), "Generate Resume Draft");
    }

    #[tokio::test]
    async fn test_generate_stores_draft_and_clears_flag() {
        let model = ScriptedModel::text("# Tara");
        let mut tools = ResumeTools::default();

        let outcome = tools.generate(&advisor(&model), &profile()).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Done);
        assert_eq!(tools.generated_resume, "# Tara");
        assert!(!tools.generating);
        assert_eq!(tools.generate_label(), "Regenerate Draft");
    }

    #[tokio::test]
    async fn test_generate_failure_clears_flag() {
        let model = ScriptedModel::failing(transport_error());
        let mut tools = ResumeTools::default();

        assert!(tools.generate(&advisor(&model), &profile()).await.is_err());
        assert!(!tools.generating);
        assert_eq!(tools.last_error.as_deref(), Some("Failed to generate resume."));
    }

    #[tokio::test]
    async fn test_generate_refuses_while_in_flight() {
        let model = ScriptedModel::text("unused");
        let mut tools = ResumeTools {
            generating: true,
            ..ResumeTools::default()
        };
        let outcome = tools.generate(&advisor(&model), &profile()).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Busy);
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_check_ats_skips_blank_input() {
        let model = ScriptedModel::text(ANALYSIS_JSON);
        let mut tools = ResumeTools {
            ats_input: "   ".to_string(),
            ..ResumeTools::default()
        };
        let outcome = tools.check_ats(&advisor(&model)).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Skipped);
        assert!(model.requests().is_empty());
    }

    #[tokio::test]
    async fn test_check_ats_replaces_previous_result() {
        let model = ScriptedModel::replying(vec![
            Ok(Some(ANALYSIS_JSON.to_string())),
            Err(transport_error()),
        ]);
        let advisor = advisor(&model);
        let mut tools = ResumeTools {
            ats_input: "Experienced editor".to_string(),
            target_country: "USA".to_string(),
            ..ResumeTools::default()
        };

        tools.check_ats(&advisor).await.unwrap();
        assert_eq!(tools.score_band(), Some(ScoreBand::Fair));
        assert!(model.requests()[0].prompt.contains("Recruiter for USA"));

        // A failed re-check leaves no stale result behind.
        assert!(tools.check_ats(&advisor).await.is_err());
        assert!(tools.ats_result.is_none());
        assert!(!tools.checking);
    }

    #[tokio::test]
    async fn test_builder_and_checker_do_not_block_each_other() {
        let model = ScriptedModel::text(ANALYSIS_JSON);
        let mut tools = ResumeTools {
            generating: true,
            ats_input: "resume".to_string(),
            ..ResumeTools::default()
        };
        let outcome = tools.check_ats(&advisor(&model)).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Done);
    }

    #[tokio::test]
    async fn test_timed_out_calls_release_their_flags() {
        let stalled = stalled_advisor();
        let profile = profile();
        let mut tools = ResumeTools {
            ats_input: "resume".to_string(),
            ..ResumeTools::default()
        };

        let draft = tools.generate(&stalled, &profile);
        assert!(tokio::time::timeout(Duration::from_millis(10), draft).await.is_err());
        assert!(!tools.generating);
        let check = tools.check_ats(&stalled);
        assert!(tokio::time::timeout(Duration::from_millis(10), check).await.is_err());
        assert!(!tools.checking);

        let model = ScriptedModel::text("# Tara");
        let outcome = tools.generate(&advisor(&model), &profile).await.unwrap();
        assert_eq!(outcome, ToolOutcome::Done);
        assert_eq!(tools.generated_resume, "# Tara");
    }
}
