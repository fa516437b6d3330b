/// LLM Client: the single point of entry for all generative-model calls.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// All model interactions MUST go through the `LanguageModel` trait.
///
/// Model: gemini-2.5-flash (hardcoded)
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
pub mod schema;

use schema::Schema;

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for every call. Intentionally hardcoded.
pub const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key is missing. Set GEMINI_API_KEY in the environment.")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response violates schema: {0}")]
    Schema(String),
}

/// A single generation call: prompt, optional system instruction and, for
/// structured output, the schema the JSON answer must follow.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system: Option<&'a str>,
    pub prompt: &'a str,
    pub response_schema: Option<&'a Schema>,
    pub temperature: Option<f32>,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            system: None,
            prompt,
            response_schema: None,
            temperature: None,
        }
    }

    pub fn system(mut self, system: &'a str) -> Self {
        self.system = Some(system);
        self
    }

    pub fn json(mut self, schema: &'a Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Anything that turns a prompt into text. `LlmClient` is the production
/// backend; tests substitute scripted models.
///
/// Returns `Ok(None)` when the call succeeded but the model produced no text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Option<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; `None` when empty.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn build_request_body<'a>(request: &GenerationRequest<'a>) -> GenerateContentRequest<'a> {
    let generation_config = if request.response_schema.is_some() || request.temperature.is_some()
    {
        Some(GenerationConfig {
            response_mime_type: request.response_schema.map(|_| "application/json"),
            response_schema: request.response_schema,
            temperature: request.temperature,
        })
    } else {
        None
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: request.prompt,
            }],
        }],
        system_instruction: request.system.map(|text| SystemInstruction {
            parts: vec![Part { text }],
        }),
        generation_config,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// HTTP client for the generative-language API.
///
/// Makes exactly one request per call. Failures are returned to the caller
/// as-is; nothing is retried.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    /// `api_key` may be absent; every call then fails with `MissingApiKey`.
    pub fn new(api_key: Option<String>) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, API_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a raw call to the API, returning the full response object.
    pub async fn call(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = format!("{}/models/{MODEL}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&build_request_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<Option<String>, LlmError> {
        Ok(self.call(request).await?.text())
    }
}

/// Deserializes model text as JSON, tolerating Markdown code fences.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
