//! Profile form state machine.
//!
//! Basics → Academics → InterestsSkills → Submitted. Moving forward requires
//! the current step to validate; moving back is allowed from Academics and
//! InterestsSkills only. Submission re-checks the required text fields and
//! produces the immutable `UserProfile`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::profile::{UserProfile, UserStage, WorkEnvironment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStep {
    #[default]
    Basics,
    Academics,
    InterestsSkills,
    Submitted,
}

impl FormStep {
    /// 1-based position shown in the progress indicator.
    pub fn number(&self) -> u8 {
        match self {
            FormStep::Basics => 1,
            FormStep::Academics => 2,
            FormStep::InterestsSkills => 3,
            FormStep::Submitted => 4,
        }
    }

    /// Step reached by "Next". Submission is not a "Next" transition.
    pub fn next(&self) -> Option<FormStep> {
        match self {
            FormStep::Basics => Some(FormStep::Academics),
            FormStep::Academics => Some(FormStep::InterestsSkills),
            FormStep::InterestsSkills | FormStep::Submitted => None,
        }
    }

    pub fn previous(&self) -> Option<FormStep> {
        match self {
            FormStep::Academics => Some(FormStep::Basics),
            FormStep::InterestsSkills => Some(FormStep::Academics),
            FormStep::Basics | FormStep::Submitted => None,
        }
    }
}

impl std::fmt::Display for FormStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FormStep::Basics => "basics",
            FormStep::Academics => "academics",
            FormStep::InterestsSkills => "interests_skills",
            FormStep::Submitted => "submitted",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("The {step} step is incomplete: {missing} required")]
    Incomplete { step: FormStep, missing: String },

    #[error("Cannot go forward from the {0} step")]
    NoNextStep(FormStep),

    #[error("Cannot go back from the {0} step")]
    NoPreviousStep(FormStep),

    #[error("The form can only be submitted from the interests_skills step, not {0}")]
    NotSubmittable(FormStep),
}

/// Values entered so far. Every field may still be blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub stage: Option<UserStage>,
    pub academic_background: String,
    pub grades: String,
    pub interests: Vec<String>,
    pub skills: Vec<String>,
    pub preferred_work_environment: Option<WorkEnvironment>,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            stage: Some(UserStage::default()),
            academic_background: String::new(),
            grades: String::new(),
            interests: Vec::new(),
            skills: Vec::new(),
            preferred_work_environment: Some(WorkEnvironment::default()),
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ProfileDraft {
    /// Fields still missing before `step` may be left. Empty means valid.
    pub fn missing_for(&self, step: FormStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            FormStep::Basics => {
                if is_blank(&self.name) {
                    missing.push("name");
                }
                if self.stage.is_none() {
                    missing.push("stage");
                }
            }
            FormStep::Academics => {
                if is_blank(&self.academic_background) {
                    missing.push("academic background");
                }
                if is_blank(&self.grades) {
                    missing.push("grades");
                }
            }
            FormStep::InterestsSkills => {
                let has_tag = self
                    .interests
                    .iter()
                    .chain(&self.skills)
                    .any(|tag| !is_blank(tag));
                if !has_tag {
                    missing.push("at least one interest or skill");
                }
            }
            FormStep::Submitted => {}
        }
        missing
    }

    pub fn is_step_valid(&self, step: FormStep) -> bool {
        self.missing_for(step).is_empty()
    }

    fn check(&self, step: FormStep) -> Result<(), FormError> {
        let missing = self.missing_for(step);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::Incomplete {
                step,
                missing: missing.join(", "),
            })
        }
    }
}

fn non_blank(tags: &[String]) -> Vec<String> {
    tags.iter().filter(|tag| !is_blank(tag)).cloned().collect()
}

/// Set-like toggle on the trimmed `value`: removes it when present, appends
/// it otherwise. Blank input leaves the list alone and returns false.
fn toggle(list: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    if let Some(pos) = list.iter().position(|item| item == value) {
        list.remove(pos);
    } else {
        list.push(value.to_string());
    }
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub step: FormStep,
    pub draft: ProfileDraft,
}

impl ProfileForm {
    /// Fresh form at the first step, pre-seeded with a signed-in user's name.
    pub fn new(initial_name: Option<&str>) -> Self {
        Self {
            step: FormStep::Basics,
            draft: ProfileDraft {
                name: initial_name.unwrap_or_default().to_string(),
                ..ProfileDraft::default()
            },
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step.next().is_some() && self.draft.is_step_valid(self.step)
    }

    pub fn can_submit(&self) -> bool {
        self.step == FormStep::InterestsSkills && self.draft.is_step_valid(self.step)
    }

    /// "Next Step".
    pub fn next(&mut self) -> Result<FormStep, FormError> {
        let next = self.step.next().ok_or(FormError::NoNextStep(self.step))?;
        self.draft.check(self.step)?;
        self.step = next;
        Ok(next)
    }

    /// "Back".
    pub fn back(&mut self) -> Result<FormStep, FormError> {
        let previous = self
            .step
            .previous()
            .ok_or(FormError::NoPreviousStep(self.step))?;
        self.step = previous;
        Ok(previous)
    }

    /// Blank input is ignored.
    pub fn toggle_interest(&mut self, value: &str) {
        toggle(&mut self.draft.interests, value);
    }

    pub fn toggle_skill(&mut self, value: &str) {
        toggle(&mut self.draft.skills, value);
    }

    /// Free-text interest. Returns false for blank input.
    pub fn add_custom_interest(&mut self, value: &str) -> bool {
        toggle(&mut self.draft.interests, value)
    }

    pub fn add_custom_skill(&mut self, value: &str) -> bool {
        toggle(&mut self.draft.skills, value)
    }

    /// "Generate Paths". Builds the profile and moves to `Submitted`.
    pub fn submit(&mut self) -> Result<UserProfile, FormError> {
        if self.step != FormStep::InterestsSkills {
            return Err(FormError::NotSubmittable(self.step));
        }
        self.draft.check(FormStep::InterestsSkills)?;

        // Earlier steps may have been edited through the draft directly.
        for step in [FormStep::Basics, FormStep::Academics] {
            self.draft.check(step)?;
        }

        let draft = &self.draft;
        let profile = UserProfile {
            name: draft.name.clone(),
            stage: draft.stage.unwrap_or_default(),
            academic_background: draft.academic_background.clone(),
            grades: draft.grades.clone(),
            interests: non_blank(&draft.interests),
            skills: non_blank(&draft.skills),
            preferred_work_environment: draft.preferred_work_environment,
        };
        self.step = FormStep::Submitted;
        Ok(profile)
    }
}
