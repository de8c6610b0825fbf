//! JSON audit record of a finished match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use undercover_engine::{Match, Player, Winner};

/// Everything needed to replay or audit a match after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTranscript {
    /// When the roles were dealt.
    pub started_at: DateTime<Utc>,
    /// When the transcript was taken.
    pub finished_at: DateTime<Utc>,
    /// Dealt roster, in creation order.
    pub players: Vec<Player>,
    /// Word every civilian held.
    pub civilian_word: String,
    /// Word every undercover held.
    pub undercover_word: String,
    /// Names in speaking order.
    pub speaking_order: Vec<String>,
    /// Names in elimination order.
    pub eliminated: Vec<String>,
    /// Winner, absent if the match was abandoned.
    pub winner: Option<Winner>,
}

impl MatchTranscript {
    /// Captures `game` as it stands now.
    #[instrument(skip(game))]
    pub fn capture(game: &Match, started_at: DateTime<Utc>) -> Self {
        let state = game.state();
        Self {
            started_at,
            finished_at: Utc::now(),
            players: state.roster().players().clone(),
            civilian_word: state.roster().civilian_word().clone(),
            undercover_word: state.roster().undercover_word().clone(),
            speaking_order: state.speaking_order().to_vec(),
            eliminated: state.eliminated().to_vec(),
            winner: game.winner(),
        }
    }

    /// Writes the transcript as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn write_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        info!("Transcript written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use undercover_engine::{MatchSetup, MemoryLastStarter, SecureRng, WordPair};

    #[test]
    fn test_transcript_roundtrip_on_disk() {
        let mut store = MemoryLastStarter::new();
        let mut rng = SecureRng::from_seed(2);
        let game = MatchSetup::new(["Ana", "Bo", "Cy", "Di"])
            .start(&WordPair::new("Frog", "Toad"), &mut store, &mut rng)
            .unwrap();

        let transcript = MatchTranscript::capture(&game, Utc::now());
        assert_eq!(transcript.players.len(), 4);
        assert_eq!(transcript.winner, None);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        transcript.write_json(&path).unwrap();

        let read: MatchTranscript =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, transcript);
    }
}
