//! LLM Client: the single point of entry for all generative-text calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Everything else depends on the `TextGenerator` trait, never on `GeminiClient`.
//!
//! Calls are single-attempt: no retry, no backoff. Callers own the degraded path.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT_SECS: u64 = 120;
const PROBE_PROMPT: &str = "Hello";

/// Candidate models, most likely to work first.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "models/gemini-1.5-flash",
    "models/gemini-1.5-pro",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No working model among {0:?}")]
    NoWorkingModel(Vec<String>),
}

/// Text in, text out. The generation backend seen by the rest of the service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Absent when the candidate was blocked by safety filters.
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty if there is none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client bound to one model.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            model: model.into(),
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Points the client at a different API root (local proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn with_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..self.clone()
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        let model = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:generateContent", self.base_url, model)
    }

    /// Probes `candidates` in order with a trivial prompt and keeps the first that answers.
    pub async fn select_model(&self, candidates: &[String]) -> Result<Self, LlmError> {
        for candidate in candidates {
            let probe = self.with_model(candidate);
            match probe.generate(PROBE_PROMPT).await {
                Ok(_) => {
                    info!("Using model: {candidate}");
                    return Ok(probe);
                }
                Err(e) => warn!("Model {candidate} failed: {e}"),
            }
        }
        Err(LlmError::NoWorkingModel(candidates.to_vec()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                self.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}
