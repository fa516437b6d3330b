// Career guidance: the API orchestration layer.
// Builds prompts and output schemas, issues one model call per operation and
// parses the answer into typed records. All model calls go through
// llm_client::LanguageModel; nothing here talks HTTP to the model directly.

pub mod ats;
pub mod careers;
pub mod handlers;
pub mod prompts;
pub mod resume;

use std::sync::Arc;

use thiserror::Error;
use tracing::error;

use crate::llm_client::{LanguageModel, LlmError};
use crate::models::ats::AtsAnalysis;
use crate::models::career::RecommendationResponse;
use crate::models::profile::UserProfile;

/// The three model-backed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CareerPaths,
    ResumeDraft,
    AtsAnalysis,
}

impl Operation {
    /// The only text an end user ever sees for a failed operation.
    pub fn user_message(&self) -> &'static str {
        match self {
            Operation::CareerPaths => {
                "Failed to generate recommendations. Please check your API key and try again."
            }
            Operation::ResumeDraft => "Failed to generate resume.",
            Operation::AtsAnalysis => "Failed to analyze resume.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CareerPaths => "career_paths",
            Operation::ResumeDraft => "resume_draft",
            Operation::AtsAnalysis => "ats_analysis",
        }
    }
}

/// Failure class, kept for logs. Users see `Operation::user_message` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    EmptyResponse,
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::Parse => "parse",
        }
    }
}

/// A failed guidance operation.
#[derive(Debug, Error)]
#[error("{}", .operation.user_message())]
pub struct ServiceError {
    pub operation: Operation,
    #[source]
    pub source: LlmError,
}

impl ServiceError {
    pub fn new(operation: Operation, source: LlmError) -> Self {
        let err = Self { operation, source };
        error!(
            operation = err.operation.as_str(),
            kind = err.kind().as_str(),
            "Guidance call failed: {}",
            err.source
        );
        err
    }

    pub fn kind(&self) -> ErrorKind {
        match self.source {
            LlmError::MissingApiKey => ErrorKind::Configuration,
            LlmError::Http(_) | LlmError::Api { .. } => ErrorKind::Transport,
            LlmError::EmptyContent => ErrorKind::EmptyResponse,
            LlmError::Parse(_) | LlmError::Schema(_) => ErrorKind::Parse,
        }
    }
}

/// Raised in-flight flag that is lowered again on drop, so a cancelled
/// call (timeout, client disconnect) cannot leave it stuck.
pub struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    /// `None` when the flag is already raised.
    pub fn start(flag: &'a mut bool) -> Option<Self> {
        if *flag {
            return None;
        }
        *flag = true;
        Some(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Entry point for every model-backed operation. Cheap to clone.
#[derive(Clone)]
pub struct CareerAdvisor {
    model: Arc<dyn LanguageModel>,
}

impl CareerAdvisor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Four career paths with roadmaps for the profile.
    pub async fn career_paths(
        &self,
        profile: &UserProfile,
    ) -> Result<RecommendationResponse, ServiceError> {
        careers::request_career_paths(self.model.as_ref(), profile).await
    }

    /// Markdown resume draft for the profile.
    pub async fn resume_draft(&self, profile: &UserProfile) -> Result<String, ServiceError> {
        resume::request_resume_draft(self.model.as_ref(), profile).await
    }

    /// ATS audit of `resume_text` against the norms of `country`.
    pub async fn ats_analysis(
        &self,
        resume_text: &str,
        country: &str,
    ) -> Result<AtsAnalysis, ServiceError> {
        ats::request_ats_analysis(self.model.as_ref(), resume_text, country).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted `LanguageModel` for orchestration tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::CareerAdvisor;
    use crate::llm_client::{GenerationRequest, LanguageModel, LlmError};

    /// What the scripted model saw.
    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub system: Option<String>,
        pub prompt: String,
        pub schema: Option<serde_json::Value>,
        pub temperature: Option<f32>,
    }

    #[derive(Default)]
    pub struct ScriptedModel {
        replies: Mutex<VecDeque<Result<Option<String>, LlmError>>>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl ScriptedModel {
        pub fn replying(replies: Vec<Result<Option<String>, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        pub fn text(reply: &str) -> Arc<Self> {
            Self::replying(vec![Ok(Some(reply.to_string()))])
        }

        pub fn failing(err: LlmError) -> Arc<Self> {
            Self::replying(vec![Err(err)])
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        async fn generate(
            &self,
            request: &GenerationRequest<'_>,
        ) -> Result<Option<String>, LlmError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                system: request.system.map(str::to_string),
                prompt: request.prompt.to_string(),
                schema: request
                    .response_schema
                    .map(|s| serde_json::to_value(s).unwrap()),
                temperature: request.temperature,
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    /// A model whose answer never arrives.
    pub struct StalledModel;

    #[async_trait]
    impl LanguageModel for StalledModel {
        async fn generate(
            &self,
            _request: &GenerationRequest<'_>,
        ) -> Result<Option<String>, LlmError> {
            std::future::pending().await
        }
    }

    pub fn stalled_advisor() -> CareerAdvisor {
        CareerAdvisor::new(Arc::new(StalledModel))
    }

    pub fn advisor(model: &Arc<ScriptedModel>) -> CareerAdvisor {
        CareerAdvisor::new(model.clone())
    }

    pub fn transport_error() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        }
    }
}
