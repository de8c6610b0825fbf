//! Win evaluation after an elimination.

use crate::phases::Winner;
use crate::types::{Player, Role};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Role tallies over the players still in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AliveCounts {
    /// Civilians still alive.
    pub civilians: usize,
    /// Undercovers still alive.
    pub undercovers: usize,
    /// Mr. Whites still alive.
    pub mr_whites: usize,
}

impl AliveCounts {
    /// Creates counts directly.
    pub fn new(civilians: usize, undercovers: usize, mr_whites: usize) -> Self {
        Self {
            civilians,
            undercovers,
            mr_whites,
        }
    }

    /// Counts the roles of `players`.
    pub fn tally<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        players
            .into_iter()
            .fold(Self::default(), |mut acc, p| {
                match p.role() {
                    Role::Civilian => acc.civilians += 1,
                    Role::Undercover => acc.undercovers += 1,
                    Role::MrWhite => acc.mr_whites += 1,
                }
                acc
            })
    }

    /// Undercovers plus Mr. Whites.
    pub fn impostors(&self) -> usize {
        self.undercovers + self.mr_whites
    }

    /// Everyone still alive.
    pub fn total(&self) -> usize {
        self.civilians + self.impostors()
    }
}

/// What happens after an elimination or a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The eliminated Mr. White gets a last-chance guess.
    Guess,
    /// Play continues with another vote.
    Vote,
    /// The match is over.
    GameOver(Winner),
}

/// Decides the next step after a player holding `eliminated` was voted out.
///
/// `alive` must already exclude that player. Eliminating a Mr. White always
/// leads to a guess, whatever the counts.
#[instrument]
pub fn evaluate_elimination(eliminated: Role, alive: AliveCounts) -> Verdict {
    if eliminated == Role::MrWhite {
        debug!("Mr. White eliminated, guess pending");
        return Verdict::Guess;
    }
    evaluate_alive(alive)
}

/// Applies the win rules in priority order.
///
/// 1. No Mr. White alive: civilians win.
/// 2. Civilians outnumbered by impostors: impostors win.
/// 3. Two or fewer players left: Mr. White wins.
/// 4. Otherwise vote again.
#[instrument]
pub fn evaluate_alive(alive: AliveCounts) -> Verdict {
    let verdict = if alive.mr_whites == 0 {
        Verdict::GameOver(Winner::Civilians)
    } else if alive.civilians < alive.impostors() {
        Verdict::GameOver(Winner::Impostors)
    } else if alive.total() <= 2 {
        Verdict::GameOver(Winner::MrWhite)
    } else {
        Verdict::Vote
    };
    debug!(?verdict, "Evaluated alive counts");
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mr_white_left_civilians_win() {
        assert_eq!(
            evaluate_elimination(Role::Undercover, AliveCounts::new(3, 0, 0)),
            Verdict::GameOver(Winner::Civilians)
        );
    }

    #[test]
    fn test_parity_impostors_win() {
        assert_eq!(
            evaluate_elimination(Role::Civilian, AliveCounts::new(1, 2, 1)),
            Verdict::GameOver(Winner::Impostors)
        );
    }

    #[test]
    fn test_no_mr_white_beats_parity() {
        // Rule 1 fires before rule 2 even though undercovers outnumber civilians.
        assert_eq!(
            evaluate_elimination(Role::Civilian, AliveCounts::new(1, 2, 0)),
            Verdict::GameOver(Winner::Civilians)
        );
    }

    #[test]
    fn test_two_left_mr_white_wins() {
        assert_eq!(
            evaluate_elimination(Role::Civilian, AliveCounts::new(1, 0, 1)),
            Verdict::GameOver(Winner::MrWhite)
        );
    }

    #[test]
    fn test_continue_voting() {
        assert_eq!(
            evaluate_elimination(Role::Undercover, AliveCounts::new(4, 1, 1)),
            Verdict::Vote
        );
    }

    #[test]
    fn test_mr_white_elimination_always_guesses() {
        for c in 0..5 {
            for u in 0..5 {
                for m in 0..3 {
                    assert_eq!(
                        evaluate_elimination(Role::MrWhite, AliveCounts::new(c, u, m)),
                        Verdict::Guess
                    );
                }
            }
        }
    }

    #[test]
    fn test_tally() {
        let players = [
            Player::new("a", Role::Civilian, "x"),
            Player::new("b", Role::Civilian, "x"),
            Player::new("c", Role::Undercover, "y"),
            Player::new("d", Role::MrWhite, ""),
        ];
        let counts = AliveCounts::tally(&players);
        assert_eq!(counts, AliveCounts::new(2, 1, 1));
        assert_eq!(counts.impostors(), 2);
        assert_eq!(counts.total(), 4);
    }
}
