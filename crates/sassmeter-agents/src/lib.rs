//! # Sassmeter-Agents
//!
//! Narrative generation for the sassmeter quiz.
//!
//! ## Backends
//!
//! Every backend implements [`NarrativeClient`] with the same two operations,
//! so the session controller never knows which one it talks to:
//!
//! 1. **Gemini**: `generateContent` with a single flattened prompt
//! 2. **OpenAI**: chat completions with system + user messages
//! 3. **Placeholder**: fixed text when no API key is configured
//!
//! ## Flow
//!
//! ```text
//! Session transition
//!     -> PendingNarrative { ticket, request }
//!     -> NarrativeClient (reaction | final report)
//!     -> Session::resolve_narrative (fallback text on failure)
//! ```

pub mod agent;
pub mod controller;
pub mod gemini;
pub mod openai;
pub mod placeholder;
pub mod prompts;

pub use agent::*;
pub use controller::*;
pub use gemini::*;
pub use openai::*;
pub use placeholder::*;
pub use prompts::*;

use std::sync::Arc;

/// Pick a backend for the configured provider.
///
/// A missing or blank API key is not an error: the placeholder narrator is
/// returned and the quiz still runs.
pub fn build_narrator(config: &NarratorConfig) -> AgentResult<Arc<dyn NarrativeClient>> {
    if config.credential().is_none() {
        tracing::warn!(
            provider = %config.provider,
            "no API key configured, using placeholder narrator"
        );
        return Ok(Arc::new(PlaceholderNarrator::new()));
    }

    let narrator: Arc<dyn NarrativeClient> = match config.provider {
        Provider::Gemini => Arc::new(GeminiNarrator::new(config.clone())?),
        Provider::OpenAi => Arc::new(OpenAiNarrator::new(config.clone())?),
    };

    tracing::info!(
        narrator = narrator.name(),
        model = config.model(),
        "narrative backend ready"
    );
    Ok(narrator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_selects_placeholder() {
        let narrator = build_narrator(&NarratorConfig::default()).unwrap();
        assert_eq!(narrator.name(), "placeholder");
    }

    #[test]
    fn test_provider_selection() {
        let gemini = build_narrator(&NarratorConfig {
            api_key: Some("key".to_string()),
            ..NarratorConfig::default()
        })
        .unwrap();
        assert_eq!(gemini.name(), "gemini");

        let openai = build_narrator(&NarratorConfig {
            provider: Provider::OpenAi,
            api_key: Some("key".to_string()),
            ..NarratorConfig::default()
        })
        .unwrap();
        assert_eq!(openai.name(), "openai");
    }
}
