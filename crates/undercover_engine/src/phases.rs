//! Match phases and outcomes.
//!
//! A match moves through `Reveal → Announce → Vote → Result → (Guess) →
//! Vote | GameOver`. Each phase carries only the data it needs, so a
//! finished match always has a winner and a guess always has a guesser.

use crate::types::Player;
use serde::{Deserialize, Serialize};

/// Side that won the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Winner {
    /// Every Mr. White is out.
    #[strum(serialize = "Civilians win")]
    Civilians,
    /// Civilians were outnumbered.
    #[strum(serialize = "Impostors win")]
    Impostors,
    /// Mr. White survived to the final two or guessed the civilian word.
    #[strum(serialize = "Mr. White wins")]
    MrWhite,
    /// Mr. White guessed the undercover word.
    #[strum(serialize = "Undercovers win")]
    Undercovers,
}

/// Phase of a running match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
pub enum Phase {
    /// Players view their words one at a time, in speaking order.
    Reveal {
        /// Position in the alive speaking order of the player now viewing.
        index: usize,
    },
    /// The first speaker is announced.
    Announce {
        /// Name of the player who opens the discussion.
        first_speaker: String,
    },
    /// The table discusses and votes someone out.
    Vote,
    /// The voted-out player's role is shown.
    Result {
        /// The player just eliminated.
        eliminated: Player,
    },
    /// The eliminated Mr. White guesses the civilian word.
    Guess {
        /// The Mr. White making the guess.
        guesser: Player,
    },
    /// The match is over.
    GameOver {
        /// Who won.
        winner: Winner,
    },
}

impl Phase {
    /// Variant name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Returns true once a winner is decided.
    pub fn is_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_messages() {
        assert_eq!(Winner::Civilians.to_string(), "Civilians win");
        assert_eq!(Winner::Impostors.to_string(), "Impostors win");
        assert_eq!(Winner::MrWhite.to_string(), "Mr. White wins");
        assert_eq!(Winner::Undercovers.to_string(), "Undercovers win");
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Vote.name(), "Vote");
        assert_eq!(Phase::Reveal { index: 0 }.name(), "Reveal");
        assert!(Phase::GameOver { winner: Winner::MrWhite }.is_over());
    }
}
