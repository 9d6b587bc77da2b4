//! Configuration types for the newswire runner.
//!
//! All configuration is loaded from environment variables. Everything except
//! the API credential has a default, so a bare `OPENAI_API_KEY` is enough to
//! run against the stock setup.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::RunnerError;

/// Default world-state file.
pub const DEFAULT_STATE_PATH: &str = "world_state.json";
/// Default RSS output file.
pub const DEFAULT_FEED_PATH: &str = "future-news.xml";
/// Default number of headlines requested per run.
pub const DEFAULT_HEADLINES_PER_RUN: usize = 10;
/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default HTTP timeout for the LLM call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const DEFAULT_CHANNEL_TITLE: &str = "Interstellar Systems Newswire";
const DEFAULT_CHANNEL_DESCRIPTION: &str = "Official reports from human-colonized space, Year 2479";
const DEFAULT_CHANNEL_LINK: &str = "https://example.github.io/future-news";

/// Complete runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path of the persisted world state.
    pub state_path: PathBuf,
    /// Path the RSS document is written to.
    pub feed_path: PathBuf,
    /// Number of headlines requested from the model.
    pub headlines_per_run: usize,
    /// Directory with `system.j2` / `user.j2` overriding the built-in prompts.
    pub templates_dir: Option<PathBuf>,
    /// Static RSS channel envelope.
    pub channel: ChannelConfig,
    /// LLM backend used for generation.
    pub backend: LlmBackendConfig,
}

/// The fixed `<channel>` fields of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Channel title.
    pub title: String,
    /// Channel description.
    pub description: String,
    /// Channel link.
    pub link: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHANNEL_TITLE.to_owned(),
            description: DEFAULT_CHANNEL_DESCRIPTION.to_owned(),
            link: DEFAULT_CHANNEL_LINK.to_owned(),
        }
    }
}

/// Configuration for the LLM backend.
#[derive(Clone)]
pub struct LlmBackendConfig {
    /// The backend type.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Whole-request HTTP timeout.
    pub timeout: Duration,
}

impl fmt::Debug for LlmBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmBackendConfig")
            .field("backend_type", &self.backend_type)
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Supported LLM backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible API (works with `OpenAI`, `DeepSeek`, Ollama).
    OpenAi,
    /// Anthropic Messages API (different request format).
    Anthropic,
}

impl BackendType {
    /// Parse a backend name as accepted in `LLM_BACKEND`.
    pub fn parse(name: &str) -> Result<Self, RunnerError> {
        match name.trim().to_lowercase().as_str() {
            "openai" | "deepseek" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(RunnerError::Config(format!("unknown backend type: {other}"))),
        }
    }

    const fn default_api_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Anthropic => "https://api.anthropic.com/v1",
        }
    }

    const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4.1-mini",
            Self::Anthropic => "claude-haiku-4-5",
        }
    }

    const fn key_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `LLM_API_KEY`, or the provider's own variable (`OPENAI_API_KEY` /
    ///   `ANTHROPIC_API_KEY`)
    ///
    /// Optional:
    /// - `NEWSWIRE_STATE_PATH` -- world-state file (default `world_state.json`)
    /// - `NEWSWIRE_FEED_PATH` -- RSS output file (default `future-news.xml`)
    /// - `NEWSWIRE_HEADLINES_PER_RUN` -- headlines per run (default 10)
    /// - `NEWSWIRE_TEMPLATES_DIR` -- prompt template override directory
    /// - `NEWSWIRE_CHANNEL_TITLE`, `NEWSWIRE_CHANNEL_DESCRIPTION`,
    ///   `NEWSWIRE_CHANNEL_LINK` -- channel envelope
    /// - `LLM_BACKEND` -- `openai` (default) or `anthropic`
    /// - `LLM_API_URL` -- base API URL (provider default)
    /// - `LLM_MODEL` -- model name (provider default)
    /// - `LLM_TEMPERATURE` -- sampling temperature (default 0.7)
    /// - `LLM_TIMEOUT_SECS` -- HTTP timeout in seconds (default 60)
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let state_path = var("NEWSWIRE_STATE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_PATH), PathBuf::from);
        let feed_path = var("NEWSWIRE_FEED_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_FEED_PATH), PathBuf::from);

        let headlines_per_run: usize = parse_or(
            var("NEWSWIRE_HEADLINES_PER_RUN"),
            "NEWSWIRE_HEADLINES_PER_RUN",
            DEFAULT_HEADLINES_PER_RUN,
        )?;
        if headlines_per_run == 0 {
            return Err(RunnerError::Config(
                "NEWSWIRE_HEADLINES_PER_RUN must be at least 1".to_owned(),
            ));
        }

        let templates_dir = var("NEWSWIRE_TEMPLATES_DIR").map(PathBuf::from);

        let defaults = ChannelConfig::default();
        let channel = ChannelConfig {
            title: var("NEWSWIRE_CHANNEL_TITLE").unwrap_or(defaults.title),
            description: var("NEWSWIRE_CHANNEL_DESCRIPTION").unwrap_or(defaults.description),
            link: var("NEWSWIRE_CHANNEL_LINK").unwrap_or(defaults.link),
        };

        let backend = load_backend_config(&var)?;

        Ok(Self {
            state_path,
            feed_path,
            headlines_per_run,
            templates_dir,
            channel,
            backend,
        })
    }
}

/// Load the LLM backend settings.
fn load_backend_config<F>(var: &F) -> Result<LlmBackendConfig, RunnerError>
where
    F: Fn(&str) -> Option<String>,
{
    let backend_type = var("LLM_BACKEND")
        .map_or(Ok(BackendType::OpenAi), |name| BackendType::parse(&name))?;

    let api_url = var("LLM_API_URL")
        .unwrap_or_else(|| backend_type.default_api_url().to_owned())
        .trim_end_matches('/')
        .to_owned();

    let api_key = var("LLM_API_KEY")
        .or_else(|| var(backend_type.key_var()))
        .ok_or_else(|| {
            RunnerError::Config(format!(
                "missing API key: set LLM_API_KEY or {}",
                backend_type.key_var()
            ))
        })?;

    let model = var("LLM_MODEL").unwrap_or_else(|| backend_type.default_model().to_owned());

    let temperature: f64 = parse_or(var("LLM_TEMPERATURE"), "LLM_TEMPERATURE", DEFAULT_TEMPERATURE)?;
    if !(0.0..=2.0).contains(&temperature) {
        return Err(RunnerError::Config(format!(
            "LLM_TEMPERATURE must be between 0 and 2, got {temperature}"
        )));
    }

    let timeout_secs: u64 = parse_or(var("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;

    Ok(LlmBackendConfig {
        backend_type,
        api_url,
        api_key,
        model,
        temperature,
        timeout: Duration::from_secs(timeout_secs),
    })
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T, RunnerError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid {name}: {e}")))
    })
}
