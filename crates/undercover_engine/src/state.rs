//! Mutable per-match record.

use crate::phases::Phase;
use crate::rules::AliveCounts;
use crate::types::{Player, Roster};
use serde::{Deserialize, Serialize};

/// Everything a running match knows.
///
/// The roster never changes. Eliminations are an append-only list of names
/// in the order they happened, which keeps the match replayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub(crate) roster: Roster,
    pub(crate) dealt: AliveCounts,
    pub(crate) speaking_order: Vec<String>,
    pub(crate) eliminated: Vec<String>,
    pub(crate) last_eliminated: Option<Player>,
    pub(crate) phase: Phase,
}

impl MatchState {
    pub(crate) fn new(roster: Roster, speaking_order: Vec<String>) -> Self {
        Self {
            dealt: AliveCounts::tally(roster.players()),
            roster,
            speaking_order,
            eliminated: Vec::new(),
            last_eliminated: None,
            phase: Phase::Reveal { index: 0 },
        }
    }

    /// Role counts at the deal.
    pub fn dealt(&self) -> AliveCounts {
        self.dealt
    }

    /// The dealt roster, in creation order.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Names in speaking order, eliminated players included.
    pub fn speaking_order(&self) -> &[String] {
        &self.speaking_order
    }

    /// Eliminated names, oldest first.
    pub fn eliminated(&self) -> &[String] {
        &self.eliminated
    }

    /// Most recently eliminated player.
    pub fn last_eliminated(&self) -> Option<&Player> {
        self.last_eliminated.as_ref()
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns true if `name` has been voted out.
    pub fn is_eliminated(&self, name: &str) -> bool {
        self.eliminated.iter().any(|n| n == name)
    }

    /// Players still in the game, in roster order.
    pub fn alive(&self) -> impl Iterator<Item = &Player> {
        self.roster
            .players()
            .iter()
            .filter(|p| !self.is_eliminated(p.name()))
    }

    /// Players still in the game, in speaking order.
    pub fn alive_in_speaking_order(&self) -> Vec<&Player> {
        self.speaking_order
            .iter()
            .filter(|n| !self.is_eliminated(n))
            .filter_map(|n| self.roster.find(n))
            .collect()
    }

    /// Role tallies over the players still in the game.
    pub fn alive_counts(&self) -> AliveCounts {
        AliveCounts::tally(self.alive())
    }
}
