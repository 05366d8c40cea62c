//! Picks the single most questionable answer from a session.

use crate::questions::matched_option;
use crate::types::Answer;

/// Returned when no answer matched a predefined option
pub const DEFAULT_WEIRDEST: &str = "being perfectly normal";

/// Option text of the answer carrying the highest questionable weight.
///
/// Comparison is strictly greater-than, so the first answer wins a tie.
/// Custom answers are never selected.
pub fn select_weirdest(answers: &[Answer]) -> &'static str {
    let mut weirdest = DEFAULT_WEIRDEST;
    let mut max_weirdness = 0u8;

    for option in answers.iter().filter_map(matched_option) {
        if option.weights.questionable > max_weirdness {
            max_weirdness = option.weights.questionable;
            weirdest = option.text;
        }
    }

    weirdest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(select_weirdest(&[]), DEFAULT_WEIRDEST);
    }

    #[test]
    fn test_all_custom() {
        let answers = vec![Answer::custom("wake-up", "noon-ish"), Answer::custom("food-combo", "soup")];
        assert_eq!(select_weirdest(&answers), "being perfectly normal");
    }

    #[test]
    fn test_highest_wins() {
        let answers = vec![
            Answer::option("wake-up", 0, "5 AM"),
            Answer::option("social-habit", 1, "phone"),
            Answer::option("productivity", 2, "universe"),
        ];
        assert_eq!(select_weirdest(&answers), "Procrastinate until the universe aligns");
    }

    #[test]
    fn test_first_wins_on_tie() {
        // wake-up #4 and productivity #4 are both weighted 90
        let answers = vec![
            Answer::option("wake-up", 4, "a"),
            Answer::option("productivity", 4, "b"),
        ];
        assert_eq!(select_weirdest(&answers), "Whenever my body decides (Chaos mode)");

        let reversed = vec![
            Answer::option("productivity", 4, "b"),
            Answer::option("wake-up", 4, "a"),
        ];
        assert_eq!(select_weirdest(&reversed), "Ask ChatGPT to do my thinking");
    }

    #[test]
    fn test_uses_registry_text_not_answer_text() {
        let answers = vec![Answer::option("food-combo", 4, "typed differently")];
        assert_eq!(select_weirdest(&answers), "Sushi with ranch dressing (I live dangerously)");
    }
}
