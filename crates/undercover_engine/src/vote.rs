//! Vote resolution: taking one player out of play.

use crate::contracts::{Contract, EliminationContract};
use crate::error::EngineError;
use crate::phases::Phase;
use crate::state::MatchState;
use crate::types::Player;
use tracing::{info, instrument};

/// Records the elimination of `name` and moves the match to the result
/// phase.
///
/// This is bookkeeping only. The winner is decided when the result is
/// acknowledged.
///
/// # Errors
///
/// [`EngineError::WrongPhase`] outside the vote,
/// [`EngineError::UnknownPlayer`] for a name not on the roster and
/// [`EngineError::AlreadyEliminated`] for a player already out.
#[instrument(skip(state), fields(eliminated_so_far = state.eliminated().len()))]
pub(crate) fn eliminate(state: &mut MatchState, name: &str) -> Result<Player, EngineError> {
    EliminationContract::pre(state, name)?;

    #[cfg(debug_assertions)]
    let before = state.clone();

    let player = state
        .roster()
        .find(name)
        .cloned()
        .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))?;
    state.eliminated.push(player.name().to_string());
    state.last_eliminated = Some(player.clone());
    state.phase = Phase::Result {
        eliminated: player.clone(),
    };

    #[cfg(debug_assertions)]
    EliminationContract::post(&before, state)?;

    info!(player = %player.name(), role = %player.role(), "Player eliminated");
    Ok(player)
}
