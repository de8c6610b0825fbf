//! Core domain types: roles, players, word pairs and the match roster.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Secret role dealt to a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Role {
    /// Knows the common word, in the majority.
    #[strum(serialize = "Civilian")]
    Civilian,
    /// Impostor holding a similar but different word.
    #[strum(serialize = "Undercover")]
    Undercover,
    /// Impostor with no word at all.
    #[strum(serialize = "Mr. White")]
    MrWhite,
}

impl Role {
    /// Returns true for the two impostor roles.
    pub fn is_impostor(self) -> bool {
        !matches!(self, Role::Civilian)
    }

    /// Weight of this role in the first-speaker bag.
    ///
    /// Mr. White is half as likely to open the discussion.
    pub fn first_speaker_weight(self) -> usize {
        match self {
            Role::MrWhite => 1,
            Role::Civilian | Role::Undercover => 2,
        }
    }
}

/// A player with their dealt role and word.
///
/// Players never change after the roster is built. Elimination is tracked
/// by the match state, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    name: String,
    role: Role,
    word: String,
}

impl Player {
    /// Creates a player. Mr. White always receives an empty word.
    pub fn new(name: impl Into<String>, role: Role, word: impl Into<String>) -> Self {
        let word = match role {
            Role::MrWhite => String::new(),
            Role::Civilian | Role::Undercover => word.into(),
        };
        Self {
            name: name.into(),
            role,
            word,
        }
    }

    /// Player's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Player's secret role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Player's secret word (empty for Mr. White).
    pub fn word(&self) -> &str {
        &self.word
    }
}

/// Two related words, one for civilians and one for undercovers.
///
/// Which side gets which word is decided per match, not by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    /// First word as listed.
    pub first: String,
    /// Second word as listed.
    pub second: String,
}

impl WordPair {
    /// Creates a word pair.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }
}

impl std::fmt::Display for WordPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.first, self.second)
    }
}

/// The dealt roster of a match, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Roster {
    /// Players in the order their names were supplied.
    players: Vec<Player>,
    /// Word held by every civilian.
    civilian_word: String,
    /// Word held by every undercover.
    undercover_word: String,
}

impl Roster {
    pub(crate) fn new(players: Vec<Player>, civilian_word: String, undercover_word: String) -> Self {
        Self {
            players,
            civilian_word,
            undercover_word,
        }
    }

    /// Looks up a player by exact name.
    pub fn find(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Number of players holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.players.iter().filter(|p| p.role == role).count()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if the roster has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Word to show on the player's reveal screen.
    ///
    /// Mr. White sees a row of `?` as long as the civilian word. The mask is
    /// for display only and never takes part in a comparison.
    pub fn display_word(&self, player: &Player) -> String {
        match player.role {
            Role::MrWhite => "?".repeat(self.civilian_word.chars().count()),
            Role::Civilian | Role::Undercover => player.word.clone(),
        }
    }
}
