//! Guess evaluation and the hint-progression state machine.
//!
//! Hint levels 0..=4, supplied by the caller each request; the machine has
//! no server-held memory. Level table:
//!
//! | level | reveals on wrong guess | image shown            |
//! |-------|------------------------|------------------------|
//! | 0     | nothing ("Unblurred Flag") | unblurred flag     |
//! | 1     | population             | unblurred flag         |
//! | 2     | continent              | unblurred flag         |
//! | 3     | capital                | original flag URL      |
//! | >=4 or correct | country name + flag URL | -            |
//!
//! The only terminal state is `correct || level >= 4`.

use flagfog_core::types::format_population;
use flagfog_core::{GuessResult, PuzzleRecord};

/// Hint level at which the round ends regardless of the guess.
pub const MAX_HINT_LEVEL: u8 = 4;

/// Normalization applied to both the guess and the answer: trimmed,
/// case-insensitive.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Evaluate one guess against the current puzzle at the caller-supplied
/// hint level.
pub fn evaluate(puzzle: &PuzzleRecord, guess: &str, hint_level: u8) -> GuessResult {
    let correct = normalize(guess) == normalize(&puzzle.country_name);

    let mut result = GuessResult {
        correct,
        hint_level,
        hint_text: None,
        hint_image: None,
        player_name: None,
        image_url: None,
    };

    if correct || hint_level >= MAX_HINT_LEVEL {
        // Round over: reveal the answer and the canonical flag.
        result.player_name = Some(puzzle.country_name.clone());
        result.image_url = Some(puzzle.flag_url.clone());
        return result;
    }

    match hint_level {
        0 => {
            result.hint_text = Some("Unblurred Flag".to_string());
            result.hint_image = Some(puzzle.unblurred_image.clone());
        }
        1 => {
            result.hint_text = Some(format!(
                "Population: {}",
                format_population(puzzle.population)
            ));
            result.hint_image = Some(puzzle.unblurred_image.clone());
        }
        2 => {
            result.hint_text = Some(format!("Continent: {}", puzzle.continent));
            result.hint_image = Some(puzzle.unblurred_image.clone());
        }
        3 => {
            result.hint_text = Some(format!("Capital: {}", puzzle.capital));
            // Level 3 shows the original flag reference, not a re-encoded
            // blob.
            result.hint_image = Some(puzzle.flag_url.clone());
        }
        _ => unreachable!("levels >= 4 are terminal"),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagfog_core::{CountryRecord, ImagePair};

    fn puzzle() -> PuzzleRecord {
        let country = CountryRecord {
            name: "France".to_string(),
            flag_url: "https://flagcdn.com/w320/fr.png".to_string(),
            capital: "Paris".to_string(),
            continent: "Europe".to_string(),
            population: 67_391_582,
        };
        PuzzleRecord::new(
            &country,
            ImagePair {
                blurred: "data:image/png;base64,BLURRED".to_string(),
                unblurred: "data:image/png;base64,CLEAR".to_string(),
            },
        )
    }

    #[test]
    fn test_correct_guess_is_case_insensitive() {
        for guess in ["France", "francE", "FRANCE", "  france  "] {
            let result = evaluate(&puzzle(), guess, 0);
            assert!(result.correct, "guess {:?} should match", guess);
            assert_eq!(result.player_name.as_deref(), Some("France"));
            assert_eq!(
                result.image_url.as_deref(),
                Some("https://flagcdn.com/w320/fr.png")
            );
        }
    }

    #[test]
    fn test_correct_guess_terminal_at_any_level() {
        for level in 0..=6 {
            let result = evaluate(&puzzle(), "france", level);
            assert!(result.correct);
            assert!(result.is_terminal());
            assert!(result.hint_text.is_none());
            assert!(result.hint_image.is_none());
        }
    }

    #[test]
    fn test_level_0_reveals_only_unblurred_flag() {
        let result = evaluate(&puzzle(), "spain", 0);
        assert!(!result.correct);
        assert_eq!(result.hint_text.as_deref(), Some("Unblurred Flag"));
        assert_eq!(
            result.hint_image.as_deref(),
            Some("data:image/png;base64,CLEAR")
        );
        assert!(result.player_name.is_none());
        assert!(result.image_url.is_none());
    }

    #[test]
    fn test_level_1_reveals_population_with_separators() {
        let result = evaluate(&puzzle(), "spain", 1);
        assert_eq!(result.hint_text.as_deref(), Some("Population: 67,391,582"));
        assert_eq!(
            result.hint_image.as_deref(),
            Some("data:image/png;base64,CLEAR")
        );
    }

    #[test]
    fn test_level_2_reveals_continent() {
        let result = evaluate(&puzzle(), "spain", 2);
        assert_eq!(result.hint_text.as_deref(), Some("Continent: Europe"));
        assert_eq!(
            result.hint_image.as_deref(),
            Some("data:image/png;base64,CLEAR")
        );
    }

    #[test]
    fn test_level_3_reveals_capital_and_flag_url() {
        let result = evaluate(&puzzle(), "spain", 3);
        assert_eq!(result.hint_text.as_deref(), Some("Capital: Paris"));
        // Original flag reference, not a data URI.
        assert_eq!(
            result.hint_image.as_deref(),
            Some("https://flagcdn.com/w320/fr.png")
        );
    }

    #[test]
    fn test_level_4_and_beyond_is_terminal() {
        for level in 4..=8 {
            let result = evaluate(&puzzle(), "spain", level);
            assert!(!result.correct);
            assert!(result.is_terminal());
            assert_eq!(result.player_name.as_deref(), Some("France"));
            assert_eq!(
                result.image_url.as_deref(),
                Some("https://flagcdn.com/w320/fr.png")
            );
            assert!(result.hint_text.is_none());
            assert!(result.hint_image.is_none());
        }
    }

    #[test]
    fn test_hints_never_leak_higher_levels() {
        // Levels 0..=2 must not mention the capital; 0..=1 not the
        // continent; 0 not the population.
        for level in 0..=2 {
            let text = evaluate(&puzzle(), "spain", level).hint_text.unwrap();
            assert!(!text.contains("Paris"), "level {} leaked capital", level);
        }
        for level in 0..=1 {
            let text = evaluate(&puzzle(), "spain", level).hint_text.unwrap();
            assert!(!text.contains("Europe"), "level {} leaked continent", level);
        }
        let text = evaluate(&puzzle(), "spain", 0).hint_text.unwrap();
        assert!(!text.contains("67,391,582"));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  FrAnCe "), "france");
        assert_eq!(normalize("CÔTE D'IVOIRE"), "côte d'ivoire");
    }
}
