use serde::{Deserialize, Serialize};

/// Where the user is in their education.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStage {
    /// Just finished 12th grade.
    #[default]
    #[serde(rename = "POST_12TH")]
    PostSecondary,
    #[serde(rename = "GRADUATE")]
    Graduate,
}

impl UserStage {
    /// Human-readable stage used inside prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            UserStage::PostSecondary => "Finished 12th Grade (High School)",
            UserStage::Graduate => "Graduate / Job Seeker",
        }
    }

    /// Wire label, e.g. `POST_12TH`.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStage::PostSecondary => "POST_12TH",
            UserStage::Graduate => "GRADUATE",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkEnvironment {
    #[serde(rename = "On-site")]
    OnSite,
    #[default]
    Hybrid,
    Remote,
}

impl WorkEnvironment {
    pub const ALL: [WorkEnvironment; 3] = [
        WorkEnvironment::OnSite,
        WorkEnvironment::Hybrid,
        WorkEnvironment::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkEnvironment::OnSite => "On-site",
            WorkEnvironment::Hybrid => "Hybrid",
            WorkEnvironment::Remote => "Remote",
        }
    }
}

/// Profile collected by the onboarding form. Built once on submission and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub stage: UserStage,
    /// e.g. "PCM", "Commerce", "B.Tech in CS"
    pub academic_background: String,
    /// e.g. "85%", "3.5 GPA"
    pub grades: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_work_environment: Option<WorkEnvironment>,
}

impl UserProfile {
    pub fn interests_joined(&self) -> String {
        self.interests.join(", ")
    }

    pub fn skills_joined(&self) -> String {
        self.skills.join(", ")
    }

    pub fn work_environment_label(&self) -> &'static str {
        self.preferred_work_environment
            .as_ref()
            .map(WorkEnvironment::as_str)
            .unwrap_or("Any")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_from_client_payload() {
        let json = r#"{
            "name": "Asha",
            "stage": "GRADUATE",
            "academicBackground": "B.Com",
            "grades": "78%",
            "interests": ["Finance"],
            "skills": ["Analysis", "Teamwork"],
            "preferredWorkEnvironment": "On-site"
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.stage, UserStage::Graduate);
        assert_eq!(profile.academic_background, "B.Com");
        assert_eq!(
            profile.preferred_work_environment,
            Some(WorkEnvironment::OnSite)
        );
        assert_eq!(profile.skills_joined(), "Analysis, Teamwork");
    }

    #[test]
    fn test_missing_work_environment_reads_as_any() {
        let json = r#"{
            "name": "Ravi",
            "stage": "POST_12TH",
            "academicBackground": "PCM",
            "grades": "91%",
            "interests": [],
            "skills": ["Coding"]
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert!(profile.preferred_work_environment.is_none());
        assert_eq!(profile.work_environment_label(), "Any");
    }

    #[test]
    fn test_stage_descriptions() {
        assert_eq!(
            UserStage::PostSecondary.describe(),
            "Finished 12th Grade (High School)"
        );
        assert_eq!(UserStage::Graduate.as_str(), "GRADUATE");
    }
}
