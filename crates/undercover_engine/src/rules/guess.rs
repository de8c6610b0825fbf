//! Mr. White's last-chance guess.

use super::win::{AliveCounts, Verdict};
use crate::phases::Winner;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use unicode_general_category::{GeneralCategory, get_general_category};
use unicode_normalization::UnicodeNormalization;

/// Which word, if any, a guess matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// Matched the civilian word.
    CivilianWord,
    /// Matched the undercover word.
    UndercoverWord,
    /// Matched neither.
    Wrong,
}

/// Folds a word for comparison: trimmed, lowercased, NFD-decomposed with
/// nonspacing marks (`Mn`) removed.
///
/// Spacing and enclosing marks are kept; in scripts such as Devanagari they
/// carry vowels, not accents.
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| get_general_category(*c) != GeneralCategory::NonspacingMark)
        .collect()
}

/// Compares a guess against both words after normalization.
///
/// Matching is exact on the normalized forms. The civilian word wins if both
/// words normalize identically.
#[instrument(skip_all)]
pub fn resolve_guess(guess: &str, civilian_word: &str, undercover_word: &str) -> GuessOutcome {
    let guess = normalize_word(guess);
    let outcome = if guess == normalize_word(civilian_word) {
        GuessOutcome::CivilianWord
    } else if guess == normalize_word(undercover_word) {
        GuessOutcome::UndercoverWord
    } else {
        GuessOutcome::Wrong
    };
    debug!(?outcome, "Guess resolved");
    outcome
}

/// Next step after a guess. `alive` must already exclude the guesser.
#[instrument]
pub fn verdict_after_guess(outcome: GuessOutcome, alive: AliveCounts) -> Verdict {
    match outcome {
        GuessOutcome::CivilianWord => Verdict::GameOver(Winner::MrWhite),
        GuessOutcome::UndercoverWord => Verdict::GameOver(Winner::Undercovers),
        GuessOutcome::Wrong if alive.mr_whites == 0 => Verdict::GameOver(Winner::Civilians),
        GuessOutcome::Wrong => Verdict::Vote,
    }
}
