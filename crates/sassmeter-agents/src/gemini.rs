//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use sassmeter_core::{ReactionRequest, ReportRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::agent::{http_error, transport_error, AgentError, AgentResult, NarrativeClient, NarratorConfig};
use crate::prompts::{reaction_prompt, report_prompt, Prompt};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Narrative client backed by Gemini
pub struct GeminiNarrator {
    http: reqwest::Client,
    config: NarratorConfig,
    api_key: String,
}

impl GeminiNarrator {
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

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url(),
            self.config.model()
        )
    }

    async fn generate(&self, prompt: &Prompt, max_tokens: u32) -> AgentResult<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.flattened()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: max_tokens,
            },
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            return Err(http_error(response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_ms))?;

        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> AgentResult<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(AgentError::EmptyResponse),
        None => match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => Err(AgentError::ContentBlocked(reason)),
            None => Err(AgentError::MalformedResponse(
                "no candidates in generateContent response".to_string(),
            )),
        },
    }
}

#[async_trait]
impl NarrativeClient for GeminiNarrator {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn request_reaction(&self, request: &ReactionRequest) -> AgentResult<String> {
        self.generate(&reaction_prompt(request), self.config.reaction_max_tokens)
            .await
    }

    async fn request_final_report(&self, request: &ReportRequest) -> AgentResult<String> {
        self.generate(&report_prompt(request), self.config.report_max_tokens)
            .await
    }
}
