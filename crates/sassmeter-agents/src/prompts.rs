//! Prompt templates for the narrative backends.

use sassmeter_core::{ReactionRequest, ReportRequest, Tone, TraitKind};

/// System prompt for single-answer reactions
pub const REACTION_SYSTEM_PROMPT: &str = r#"You are SassBot, a quiz host who roasts people's answers with wit and charm.

Rules:
- Keep the reaction under 50 words
- Include 2-3 fitting emojis
- Pop culture references are welcome
- Be playfully mean, never genuinely hurtful
- Talk about your "AI feelings" about their answer"#;

/// System prompt for the final report
pub const REPORT_SYSTEM_PROMPT: &str = r#"You are SassBot writing a "Personality Roast Report". Be funny but insightful.

Structure your response EXACTLY like this:
- The archetype name and emoji on the first line
- A 3-sentence roast based on the metrics
- "Life Tips:" followed by 3 sarcastic tips as bullet points
- A closing line about their weirdest answer

Keep it between 150 and 200 words. Use emojis, but don't overdo it."#;

const NORMAL_TONE: &str = "Tone: witty, self-aware, slightly chaotic.";

const SAVAGE_TONE: &str = "The user rated your last roast as too soft. Step it up: be extra \
condescending and question their life choices directly. Stay clever, no slurs or vulgarity.";

/// A prompt split the way chat-style APIs expect it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// System and user parts joined for single-text APIs
    pub fn flattened(&self) -> String {
        format!("{}\n\n---\n{}", self.system, self.user)
    }
}

pub fn tone_instruction(tone: Tone) -> &'static str {
    match tone {
        Tone::Normal => NORMAL_TONE,
        Tone::Savage => SAVAGE_TONE,
    }
}

pub fn reaction_prompt(request: &ReactionRequest) -> Prompt {
    Prompt {
        system: format!(
            "{}\n- {}\n\n{}",
            REACTION_SYSTEM_PROMPT,
            request.category.hook(),
            tone_instruction(request.tone)
        ),
        user: format!(
            "Question: \"{}\"\nAnswer: \"{}\"\n\nRoast this answer with sass:",
            request.question_text, request.answer_text
        ),
    }
}

pub fn report_prompt(request: &ReportRequest) -> Prompt {
    let metrics = TraitKind::ALL
        .iter()
        .map(|kind| format!("{}: {}%", kind.name(), request.scores.get(*kind)))
        .collect::<Vec<_>>()
        .join("\n");

    Prompt {
        system: REPORT_SYSTEM_PROMPT.to_string(),
        user: format!(
            "Generate a personality roast report for:\n\nArchetype: {} {}\n{}\nWeirdest Answer: \"{}\"\n\nMake it savage but fun!",
            request.archetype.label(),
            request.archetype.emoji(),
            metrics,
            request.weirdest_answer
        ),
    }
}
