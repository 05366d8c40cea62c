//! Trait scoring: chaos, vintage and questionable metrics derived from answers.

use serde::{Deserialize, Serialize};

use crate::questions::matched_option;
use crate::types::Answer;

/// Normalized trait scores, each on a scale of 0 to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TraitScores {
    /// Unpredictability: sleep schedules, food crimes, doubling down
    pub chaos: u8,

    /// Old-fashioned habits: early mornings, planners, classic choices
    pub vintage: u8,

    /// How hard the answers make people stare
    pub questionable: u8,
}

impl TraitScores {
    pub fn new(chaos: u8, vintage: u8, questionable: u8) -> Self {
        Self {
            chaos: chaos.min(100),
            vintage: vintage.min(100),
            questionable: questionable.min(100),
        }
    }

    pub fn get(&self, kind: TraitKind) -> u8 {
        match kind {
            TraitKind::Chaos => self.chaos,
            TraitKind::Vintage => self.vintage,
            TraitKind::Questionable => self.questionable,
        }
    }

    /// Highest-scoring trait; ties go to the earlier trait in declaration order
    pub fn dominant_trait(&self) -> TraitKind {
        TraitKind::ALL
            .into_iter()
            .fold(TraitKind::Chaos, |best, kind| {
                if self.get(kind) > self.get(best) {
                    kind
                } else {
                    best
                }
            })
    }

    pub fn to_array(&self) -> [u8; 3] {
        [self.chaos, self.vintage, self.questionable]
    }
}

/// Individual trait enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    Chaos,
    Vintage,
    Questionable,
}

impl TraitKind {
    pub const ALL: [TraitKind; 3] = [TraitKind::Chaos, TraitKind::Vintage, TraitKind::Questionable];

    /// Name shown next to the score in reports
    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::Chaos => "Chaos Index",
            TraitKind::Vintage => "Vintage Vibes",
            TraitKind::Questionable => "Questionable Choices",
        }
    }
}

/// Compute trait scores from the full answer history.
///
/// Each trait is the rounded mean of the matched option weights, divided by
/// the total number of answers. Custom or unmatched answers add nothing to the
/// sums but still count in the divisor, which pulls scores towards zero. An
/// empty history scores zero everywhere.
pub fn compute_trait_scores(answers: &[Answer]) -> TraitScores {
    if answers.is_empty() {
        return TraitScores::default();
    }

    let mut totals = [0u32; 3];
    for option in answers.iter().filter_map(matched_option) {
        totals[0] += u32::from(option.weights.chaos);
        totals[1] += u32::from(option.weights.vintage);
        totals[2] += u32::from(option.weights.questionable);
    }

    let count = answers.len() as f64;
    let normalize = |total: u32| (total as f64 / count).round().clamp(0.0, 100.0) as u8;

    TraitScores {
        chaos: normalize(totals[0]),
        vintage: normalize(totals[1]),
        questionable: normalize(totals[2]),
    }
}
