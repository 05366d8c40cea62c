//! The question bank and its trait weights.
//!
//! This registry is the only place weights live. Scoring and weirdness
//! selection both look options up here.

use serde::Serialize;

use crate::types::{Answer, Category};

/// Per-option contribution to each trait, every value in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraitWeights {
    pub chaos: u8,
    pub vintage: u8,
    pub questionable: u8,
}

/// A predefined answer option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub text: &'static str,
    pub weights: TraitWeights,
}

/// Static question definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub category: Category,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn option(&self, index: usize) -> Option<&'static QuestionOption> {
        self.options.get(index)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

const fn opt(text: &'static str, chaos: u8, vintage: u8, questionable: u8) -> QuestionOption {
    QuestionOption {
        text,
        weights: TraitWeights {
            chaos,
            vintage,
            questionable,
        },
    }
}

static QUESTIONS: [Question; 5] = [
    Question {
        id: "wake-up",
        text: "What's your ideal wake-up time? ⏰",
        category: Category::Time,
        options: &[
            opt("5 AM (I'm basically a rooster)", 0, 80, 10),
            opt("7 AM (Productive human being)", 20, 60, 20),
            opt("10 AM (Reasonable adult)", 40, 40, 30),
            opt("12 PM (Don't judge me)", 60, 20, 70),
            opt("Whenever my body decides (Chaos mode)", 100, 10, 90),
        ],
    },
    Question {
        id: "food-combo",
        text: "Which food combination speaks to your soul? 🍕",
        category: Category::Food,
        options: &[
            opt("Pizza with pineapple (Classic controversial)", 30, 60, 40),
            opt("Fries dipped in ice cream (Sweet & salty)", 50, 40, 50),
            opt("Cereal with orange juice (Milk is for weaklings)", 80, 20, 90),
            opt("Pickles with peanut butter (Don't knock it)", 70, 30, 80),
            opt("Sushi with ranch dressing (I live dangerously)", 100, 10, 100),
        ],
    },
    Question {
        id: "questionable-choice",
        text: "What's your most questionable life decision? 🤔",
        category: Category::Choice,
        options: &[
            opt("Bought something at 3 AM from an infomercial", 60, 70, 80),
            opt("Tried to cut my own hair (during quarantine)", 80, 30, 90),
            opt("Stalked my crush's ex on social media", 70, 20, 85),
            opt("Ate food that fell on the floor (5-second rule)", 40, 50, 60),
            opt("Started a conversation with 'As an AI...'", 100, 10, 100),
        ],
    },
    Question {
        id: "social-habit",
        text: "How do you handle awkward social situations? 😅",
        category: Category::Social,
        options: &[
            opt("Make a joke and hope for the best", 40, 70, 30),
            opt("Pretend my phone is ringing", 30, 50, 60),
            opt("Double down and make it weirder", 100, 20, 90),
            opt("Slowly back away like a scared cat", 60, 40, 70),
            opt("Start explaining blockchain technology", 90, 30, 100),
        ],
    },
    Question {
        id: "productivity",
        text: "What's your productivity secret weapon? ⚡",
        category: Category::Productivity,
        options: &[
            opt("Color-coded everything with backup plans", 20, 90, 10),
            opt("Panic-induced last-minute genius", 80, 30, 70),
            opt("Procrastinate until the universe aligns", 90, 20, 80),
            opt("Work in 3 AM creative bursts", 70, 40, 60),
            opt("Ask ChatGPT to do my thinking", 60, 10, 90),
        ],
    },
];

/// All questions in quiz order
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

pub fn question(index: usize) -> Option<&'static Question> {
    QUESTIONS.get(index)
}

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

pub fn total_questions() -> usize {
    QUESTIONS.len()
}

/// Resolve an answer to the predefined option it selected.
///
/// Custom answers, unknown question ids and out-of-range indices resolve to
/// `None`.
pub fn matched_option(answer: &Answer) -> Option<&'static QuestionOption> {
    let index = answer.choice.option_index()?;
    find_question(&answer.question_id)?.option(index)
}
