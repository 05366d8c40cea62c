//! Offline narrator used when no API key is configured.

use async_trait::async_trait;
use sassmeter_core::{ReactionRequest, ReportRequest};

use crate::agent::{AgentResult, NarrativeClient};

pub const PLACEHOLDER_REACTION: &str = "Oops! My AI brain needs an API key to function! 🤖💭 \
Add one to your configuration to get the full sass experience!";

/// Fixed text, never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderNarrator;

impl PlaceholderNarrator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NarrativeClient for PlaceholderNarrator {
    fn name(&self) -> &str {
        "placeholder"
    }

    async fn request_reaction(&self, _request: &ReactionRequest) -> AgentResult<String> {
        Ok(PLACEHOLDER_REACTION.to_string())
    }

    async fn request_final_report(&self, request: &ReportRequest) -> AgentResult<String> {
        Ok(format!(
            "{} {}\n\n\
             Your personality is like a beautiful mystery. I'd love to roast you properly, \
             but I need an API key first! 🔥\n\n\
             Life Tips:\n\
             • Add an API key to unlock premium sass\n\
             • You're probably amazing anyway\n\
             • Check the setup instructions\n\n\
             Your weirdest answer, \"{}\", is still haunting my circuits! 🤖✨",
            request.archetype.label(),
            request.archetype.emoji(),
            request.weirdest_answer
        ))
    }
}
