//! Narrative client trait, configuration and common types.

use async_trait::async_trait;
use sassmeter_core::{NarrativeRequest, ReactionRequest, ReportRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for narrative operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Narrative client error types
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("No API key configured")]
    MissingCredential,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request was blocked for safety reasons: {0}")]
    ContentBlocked(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upstream returned no text")]
    EmptyResponse,

    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

/// Source of reaction and report text.
///
/// Implementations may fail for any reason; the session controller swaps in
/// fallback text rather than surfacing the error.
#[async_trait]
pub trait NarrativeClient: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Short reaction to a single answer
    async fn request_reaction(&self, request: &ReactionRequest) -> AgentResult<String>;

    /// Longer write-up for the final report
    async fn request_final_report(&self, request: &ReportRequest) -> AgentResult<String>;
}

/// Dispatch a pending request to the matching client operation
pub async fn narrate(client: &dyn NarrativeClient, request: &NarrativeRequest) -> AgentResult<String> {
    match request {
        NarrativeRequest::Reaction(req) => client.request_reaction(req).await,
        NarrativeRequest::FinalReport(req) => client.request_final_report(req).await,
    }
}

/// Remote LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenAi,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        })
    }
}

/// Narrative client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// Which backend to call
    #[serde(default)]
    pub provider: Provider,
    /// Credential; absent or blank selects the placeholder backend
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model override (provider default when unset)
    #[serde(default)]
    pub model: Option<String>,
    /// Endpoint override (provider default when unset)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Sampling temperature (0.0-2.0)
    pub temperature: f32,
    /// Token cap for a single-answer reaction
    pub reaction_max_tokens: u32,
    /// Token cap for the final report
    pub report_max_tokens: u32,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl NarratorConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }

    /// The API key, if one is set and not blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            api_key: None,
            model: None,
            base_url: None,
            temperature: 0.9,
            reaction_max_tokens: 100,
            report_max_tokens: 400,
            timeout_ms: 30_000,
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for NarratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarratorConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("model", &self.model())
            .field("base_url", &self.base_url())
            .field("temperature", &self.temperature)
            .field("reaction_max_tokens", &self.reaction_max_tokens)
            .field("report_max_tokens", &self.report_max_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Map a reqwest failure onto the agent error taxonomy
pub(crate) fn transport_error(err: reqwest::Error, timeout_ms: u64) -> AgentError {
    if err.is_timeout() {
        AgentError::Timeout(timeout_ms)
    } else if err.is_decode() {
        AgentError::MalformedResponse(err.to_string())
    } else {
        AgentError::Transport(err.to_string())
    }
}

/// Turn a non-success response into an [`AgentError::Http`]
pub(crate) async fn http_error(response: reqwest::Response) -> AgentError {
    let status = response.status().as_u16();
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > 200 {
        let mut cut = 200;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    AgentError::Http { status, body }
}
