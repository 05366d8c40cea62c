//! Fundamental types shared across the quiz.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// Topic a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Time,
    Food,
    Choice,
    Social,
    Productivity,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Time => "time",
            Category::Food => "food",
            Category::Choice => "choice",
            Category::Social => "social",
            Category::Productivity => "productivity",
        }
    }

    /// Short lead-in used when asking for a reaction
    pub fn hook(&self) -> &'static str {
        match self {
            Category::Time => "Let's roast your sleep schedule",
            Category::Food => "Time to judge your taste buds",
            Category::Choice => "Your life choices are... interesting",
            Category::Social => "Social skills assessment incoming",
            Category::Productivity => "Productivity guru or chaos goblin?",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which answer the user committed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerChoice {
    /// Index into the question's predefined options
    Option(usize),
    /// Free text typed by the user; carries no weights
    Custom,
}

impl AnswerChoice {
    pub fn option_index(&self) -> Option<usize> {
        match self {
            AnswerChoice::Option(index) => Some(*index),
            AnswerChoice::Custom => None,
        }
    }
}

/// One committed answer in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub choice: AnswerChoice,
    pub text: String,
}

impl Answer {
    pub fn option(question_id: impl Into<String>, index: usize, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            choice: AnswerChoice::Option(index),
            text: text.into(),
        }
    }

    pub fn custom(question_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            choice: AnswerChoice::Custom,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_choice_serde() {
        let json = serde_json::to_string(&AnswerChoice::Option(3)).unwrap();
        assert_eq!(json, r#"{"option":3}"#);

        let custom: AnswerChoice = serde_json::from_str(r#""custom""#).unwrap();
        assert_eq!(custom, AnswerChoice::Custom);
        assert_eq!(custom.option_index(), None);
    }

    #[test]
    fn test_timestamp_roundtrip_datetime() {
        let ts = Timestamp::now();
        assert_eq!(ts.to_datetime().timestamp_nanos_opt(), Some(ts.as_nanos()));
    }
}
