//! Preconditions for state transitions.
//!
//! A contract states what must hold before an action `{P}` and what must
//! hold after it `{Q}`. Postconditions are only checked in debug builds.

use crate::error::EngineError;
use crate::invariants::{InvariantSet, MatchInvariants};
use crate::phases::Phase;
use crate::state::MatchState;
use tracing::{instrument, warn};

/// Pre- and postconditions for an action `A` on state `S`.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), EngineError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

/// Precondition: the match is voting.
pub struct VotingOpen;

impl VotingOpen {
    /// Fails with [`EngineError::WrongPhase`] outside [`Phase::Vote`].
    #[instrument(skip(state))]
    pub fn check(state: &MatchState) -> Result<(), EngineError> {
        match state.phase() {
            Phase::Vote => Ok(()),
            other => Err(EngineError::WrongPhase {
                expected: "Vote",
                actual: other.name(),
            }),
        }
    }
}

/// Precondition: the name belongs to the roster.
pub struct InRoster;

impl InRoster {
    /// Fails with [`EngineError::UnknownPlayer`].
    #[instrument(skip(state))]
    pub fn check(state: &MatchState, name: &str) -> Result<(), EngineError> {
        if state.roster().find(name).is_none() {
            warn!(name, "Vote for unknown player");
            return Err(EngineError::UnknownPlayer(name.to_string()));
        }
        Ok(())
    }
}

/// Precondition: the player has not been voted out already.
pub struct StillAlive;

impl StillAlive {
    /// Fails with [`EngineError::AlreadyEliminated`].
    #[instrument(skip(state))]
    pub fn check(state: &MatchState, name: &str) -> Result<(), EngineError> {
        if state.is_eliminated(name) {
            warn!(name, "Vote for eliminated player");
            return Err(EngineError::AlreadyEliminated(name.to_string()));
        }
        Ok(())
    }
}

/// Contract for voting a player out.
///
/// Preconditions:
/// - The match is in the vote phase
/// - The player is on the roster
/// - The player is still alive
///
/// Postconditions:
/// - Exactly one name was appended to the elimination list
/// - All match invariants hold
pub struct EliminationContract;

impl Contract<MatchState, str> for EliminationContract {
    fn pre(state: &MatchState, name: &str) -> Result<(), EngineError> {
        VotingOpen::check(state)?;
        InRoster::check(state, name)?;
        StillAlive::check(state, name)
    }

    fn post(before: &MatchState, after: &MatchState) -> Result<(), EngineError> {
        if after.eliminated().len() != before.eliminated().len() + 1
            || !after.eliminated().starts_with(before.eliminated())
        {
            return Err(EngineError::InvariantViolation(
                "elimination must append exactly one name".to_string(),
            ));
        }
        check_invariants(after)
    }
}

/// Runs every [`MatchInvariants`] check, joining the failures.
pub fn check_invariants(state: &MatchState) -> Result<(), EngineError> {
    MatchInvariants::check_all(state).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        EngineError::InvariantViolation(descriptions)
    })
}
