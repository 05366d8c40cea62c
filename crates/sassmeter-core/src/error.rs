//! Error types for the sassmeter quiz core.

use thiserror::Error;

use crate::session::Phase;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("cannot {action} while in the {phase} phase")]
    InvalidTransition { phase: Phase, action: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Option index {index} out of range for question {question_id} ({available} options)")]
    OptionOutOfRange {
        question_id: String,
        index: usize,
        available: usize,
    },

    #[error("Rating {0} outside 1..=5")]
    RatingOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
