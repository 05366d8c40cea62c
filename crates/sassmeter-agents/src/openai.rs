//! OpenAI chat-completions backend.

use async_trait::async_trait;
use sassmeter_core::{ReactionRequest, ReportRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::agent::{http_error, transport_error, AgentError, AgentResult, NarrativeClient, NarratorConfig};
use crate::prompts::{reaction_prompt, report_prompt, Prompt};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Narrative client backed by an OpenAI-compatible chat endpoint
pub struct OpenAiNarrator {
    http: reqwest::Client,
    config: NarratorConfig,
    api_key: String,
}

impl OpenAiNarrator {
    pub fn new(config: NarratorConfig) -> AgentResult<Self> {
        let api_key = config
            .credential()
            .ok_or(AgentError::MissingCredential)?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AgentError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    async fn complete(&self, prompt: &Prompt, max_tokens: u32) -> AgentResult<String> {
        let body = ChatRequest {
            model: self.config.model(),
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
            max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url()))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_ms))?;

        extract_text(parsed)
    }
}

fn extract_text(response: ChatResponse) -> AgentResult<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AgentError::MalformedResponse("no choices in completion".to_string()))?;

    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(AgentError::ContentBlocked("content_filter".to_string()));
    }

    match choice.message.and_then(|m| m.content) {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AgentError::EmptyResponse),
    }
}

#[async_trait]
impl NarrativeClient for OpenAiNarrator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn request_reaction(&self, request: &ReactionRequest) -> AgentResult<String> {
        self.complete(&reaction_prompt(request), self.config.reaction_max_tokens)
            .await
    }

    async fn request_final_report(&self, request: &ReportRequest) -> AgentResult<String> {
        self.complete(&report_prompt(request), self.config.report_max_tokens)
            .await
    }
}
