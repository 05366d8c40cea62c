//! Archetype classification from trait scores.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scoring::TraitScores;

/// Personality archetype, declared in rule-evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// High chaos and high questionable
    ChaosGoblin,
    /// High vintage, low chaos
    VintageSoul,
    /// Very high questionable
    ProfessionalWeirdo,
    /// High chaos and high vintage
    NostalgicRebel,
    /// Everything low
    SuspiciouslyNormal,
    /// Moderately chaotic and questionable
    BeautifulDisaster,
    /// Vintage-leaning, not very questionable
    OldSoul,
    /// Mid-range chaos
    ControlledChaos,
    /// Questionable without the vintage
    ModernMess,
    /// Nothing else fit
    Enigma,
}

impl Archetype {
    pub const ALL: [Archetype; 10] = [
        Archetype::ChaosGoblin,
        Archetype::VintageSoul,
        Archetype::ProfessionalWeirdo,
        Archetype::NostalgicRebel,
        Archetype::SuspiciouslyNormal,
        Archetype::BeautifulDisaster,
        Archetype::OldSoul,
        Archetype::ControlledChaos,
        Archetype::ModernMess,
        Archetype::Enigma,
    ];

    /// Classify scores with an ordered decision list.
    ///
    /// Rules overlap, so the first match wins. All thresholds are inclusive.
    pub fn from_scores(scores: &TraitScores) -> Self {
        let TraitScores {
            chaos,
            vintage,
            questionable,
        } = *scores;

        if chaos >= 70 && questionable >= 70 {
            return Archetype::ChaosGoblin;
        }

        if vintage >= 70 && chaos <= 30 {
            return Archetype::VintageSoul;
        }

        if questionable >= 80 {
            return Archetype::ProfessionalWeirdo;
        }

        if chaos >= 60 && vintage >= 60 {
            return Archetype::NostalgicRebel;
        }

        if chaos <= 30 && vintage <= 30 && questionable <= 30 {
            return Archetype::SuspiciouslyNormal;
        }

        if chaos >= 50 && questionable >= 50 {
            return Archetype::BeautifulDisaster;
        }

        if vintage >= 50 && questionable <= 40 {
            return Archetype::OldSoul;
        }

        if (40..=60).contains(&chaos) {
            return Archetype::ControlledChaos;
        }

        if questionable >= 60 && vintage <= 40 {
            return Archetype::ModernMess;
        }

        Archetype::Enigma
    }

    pub fn label(&self) -> &'static str {
        match self {
            Archetype::ChaosGoblin => "Chaos Goblin",
            Archetype::VintageSoul => "Vintage Soul",
            Archetype::ProfessionalWeirdo => "Professional Weirdo",
            Archetype::NostalgicRebel => "Nostalgic Rebel",
            Archetype::SuspiciouslyNormal => "Suspiciously Normal",
            Archetype::BeautifulDisaster => "Beautiful Disaster",
            Archetype::OldSoul => "Old Soul",
            Archetype::ControlledChaos => "Controlled Chaos",
            Archetype::ModernMess => "Modern Mess",
            Archetype::Enigma => "Enigma Wrapped in Mystery",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Archetype::ChaosGoblin => "👹",
            Archetype::VintageSoul => "📻",
            Archetype::ProfessionalWeirdo => "🤪",
            Archetype::NostalgicRebel => "🕰️",
            Archetype::SuspiciouslyNormal => "🤔",
            Archetype::BeautifulDisaster => "🌪️",
            Archetype::OldSoul => "👴",
            Archetype::ControlledChaos => "🎯",
            Archetype::ModernMess => "📱",
            Archetype::Enigma => "🎭",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Free-function form of [`Archetype::from_scores`]
pub fn classify(scores: &TraitScores) -> Archetype {
    Archetype::from_scores(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(chaos: u8, vintage: u8, questionable: u8) -> Archetype {
        classify(&TraitScores::new(chaos, vintage, questionable))
    }

    #[test]
    fn test_one_example_per_rule() {
        assert_eq!(at(80, 10, 80), Archetype::ChaosGoblin);
        assert_eq!(at(20, 80, 50), Archetype::VintageSoul);
        assert_eq!(at(40, 40, 85), Archetype::ProfessionalWeirdo);
        assert_eq!(at(65, 65, 20), Archetype::NostalgicRebel);
        assert_eq!(at(10, 20, 30), Archetype::SuspiciouslyNormal);
        assert_eq!(at(55, 10, 55), Archetype::BeautifulDisaster);
        assert_eq!(at(35, 55, 40), Archetype::OldSoul);
        assert_eq!(at(45, 45, 45), Archetype::ControlledChaos);
        assert_eq!(at(35, 20, 65), Archetype::ModernMess);
        assert_eq!(at(90, 10, 10), Archetype::Enigma);
    }

    #[test]
    fn test_rule_order_wins() {
        // Rules 1, 3, 4 and 6 all match; the first one listed wins.
        assert_eq!(at(70, 70, 70), Archetype::ChaosGoblin);
        assert_eq!(at(100, 100, 100), Archetype::ChaosGoblin);
        // VintageSoul and ProfessionalWeirdo both match.
        assert_eq!(at(30, 70, 90), Archetype::VintageSoul);
    }

    #[test]
    fn test_inclusive_boundaries() {
        assert_eq!(at(70, 0, 70), Archetype::ChaosGoblin);
        // chaos one short: falls through to BeautifulDisaster
        assert_eq!(at(69, 0, 70), Archetype::BeautifulDisaster);
        assert_eq!(at(30, 30, 30), Archetype::SuspiciouslyNormal);
        assert_eq!(at(60, 0, 0), Archetype::ControlledChaos);
        assert_eq!(at(61, 0, 0), Archetype::Enigma);
        assert_eq!(at(40, 40, 60), Archetype::ControlledChaos);
    }

    #[test]
    fn test_total_over_grid() {
        for chaos in (0..=100).step_by(5) {
            for vintage in (0..=100).step_by(5) {
                for questionable in (0..=100).step_by(5) {
                    let archetype = at(chaos, vintage, questionable);
                    assert!(Archetype::ALL.contains(&archetype));
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Archetype::Enigma.to_string(), "Enigma Wrapped in Mystery");
        assert_eq!(Archetype::ChaosGoblin.label(), "Chaos Goblin");
    }
}
