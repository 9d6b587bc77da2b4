//! LLM backend abstraction and implementations.
//!
//! Enum dispatch over the supported backends, since async methods are not
//! dyn-compatible. Both backends speak HTTP via `reqwest`, send one system
//! and one user message, and return the raw response text. Nothing here
//! retries: any failure surfaces as [`RunnerError::LlmBackend`].

use serde::Serialize;
use serde_json::Value;

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::RunnerError;
use crate::prompt::RenderedPrompt;

/// Upper bound on generated tokens; ten one-line headlines fit comfortably.
const MAX_TOKENS: u32 = 1024;

/// An LLM backend that turns a rendered prompt into response text.
pub enum LlmBackend {
    /// OpenAI-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl LlmBackend {
    /// Send a prompt to the LLM and return the response text.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::LlmBackend`] if the HTTP call fails, the
    /// service answers with a non-success status, or the response has no
    /// text content.
    pub async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        match self {
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }

    /// The model identifier requests are sent with.
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAi(backend) => &backend.http.model,
            Self::Anthropic(backend) => &backend.http.model,
        }
    }
}

/// Connection settings shared by both backends.
struct HttpSettings {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f64,
}

impl HttpSettings {
    fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RunnerError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

/// One role-tagged message in a request body.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Check the status and decode the JSON body of a backend response.
async fn read_json(response: reqwest::Response, provider: &str) -> Result<Value, RunnerError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(RunnerError::LlmBackend(format!(
            "{provider} returned {status}: {error_body}"
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RunnerError::LlmBackend(format!("{provider} response parse failed: {e}")))
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(http: &'a HttpSettings, prompt: &'a RenderedPrompt) -> Self {
        Self {
            model: &http.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: http.temperature,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Backend for OpenAI-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
pub struct OpenAiBackend {
    http: HttpSettings,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    pub fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            http: HttpSettings::new(config)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/chat/completions", self.http.api_url);

        let body = ChatCompletionRequest::new(&self.http, prompt);

        let response = self
            .http
            .client
            .post(&url)
            .bearer_auth(&self.http.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("OpenAI request failed: {e}")))?;

        let json = read_json(response, "OpenAI").await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &Value) -> Result<String, RunnerError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::LlmBackend(
                "OpenAI response missing choices[0].message.content".to_owned(),
            )
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Request body for `POST /messages`. The system prompt is not a message.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

impl<'a> MessagesRequest<'a> {
    fn new(http: &'a HttpSettings, prompt: &'a RenderedPrompt) -> Self {
        Self {
            model: &http.model,
            max_tokens: MAX_TOKENS,
            temperature: http.temperature,
            system: &prompt.system,
            messages: [ChatMessage {
                role: "user",
                content: &prompt.user,
            }],
        }
    }
}

/// Backend for the Anthropic Messages API.
///
/// The system prompt is a top-level field, authentication uses the
/// `x-api-key` header, and the text lives in `content[*].text`.
pub struct AnthropicBackend {
    http: HttpSettings,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    pub fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            http: HttpSettings::new(config)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let url = format!("{}/messages", self.http.api_url);

        let body = MessagesRequest::new(&self.http, prompt);

        let response = self
            .http
            .client
            .post(&url)
            .header("x-api-key", &self.http.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("Anthropic request failed: {e}")))?;

        let json = read_json(response, "Anthropic").await?;
        extract_anthropic_content(&json)
    }
}

/// Concatenate the text blocks of an Anthropic Messages API response.
fn extract_anthropic_content(json: &Value) -> Result<String, RunnerError> {
    let texts: Vec<&str> = json
        .get("content")
        .and_then(Value::as_array)
        .map(|blocks| {
            blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        return Err(RunnerError::LlmBackend(
            "Anthropic response missing content[].text".to_owned(),
        ));
    }
    Ok(texts.concat())
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create an LLM backend from configuration.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if the HTTP client cannot be built.
pub fn create_backend(config: &LlmBackendConfig) -> Result<LlmBackend, RunnerError> {
    Ok(match config.backend_type {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config)?),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config)?),
    })
}
