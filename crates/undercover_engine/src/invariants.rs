//! Properties that hold for every match state.
//!
//! Checked after each transition in debug builds and usable directly in
//! tests.

use crate::rules::AliveCounts;
use crate::state::MatchState;
use crate::types::Role;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
            (I4::holds(state), I4::description()),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, d)| InvariantViolation::new(d))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the roster still holds the roles that were dealt.
pub struct RoleCountsUnchanged;

impl Invariant<MatchState> for RoleCountsUnchanged {
    fn holds(state: &MatchState) -> bool {
        AliveCounts::tally(state.roster().players()) == state.dealt()
    }

    fn description() -> &'static str {
        "Roster role counts match the deal"
    }
}

/// Invariant: each role holds its own word.
///
/// Civilians share the civilian word, undercovers share the undercover
/// word, Mr. White holds nothing.
pub struct WordConsistency;

impl Invariant<MatchState> for WordConsistency {
    fn holds(state: &MatchState) -> bool {
        let roster = state.roster();
        roster.players().iter().all(|p| match p.role() {
            Role::Civilian => p.word() == roster.civilian_word(),
            Role::Undercover => p.word() == roster.undercover_word(),
            Role::MrWhite => p.word().is_empty(),
        })
    }

    fn description() -> &'static str {
        "Every role holds its own word"
    }
}

/// Invariant: eliminated names are distinct roster members.
pub struct EliminationsFromRoster;

impl Invariant<MatchState> for EliminationsFromRoster {
    fn holds(state: &MatchState) -> bool {
        let mut seen = HashSet::new();
        state
            .eliminated()
            .iter()
            .all(|n| state.roster().find(n).is_some() && seen.insert(n.as_str()))
    }

    fn description() -> &'static str {
        "Eliminated names are distinct roster members"
    }
}

/// Invariant: the last eliminated player is the tail of the elimination list.
pub struct LastEliminatedIsTail;

impl Invariant<MatchState> for LastEliminatedIsTail {
    fn holds(state: &MatchState) -> bool {
        state.last_eliminated().map(|p| p.name()) == state.eliminated().last().map(String::as_str)
    }

    fn description() -> &'static str {
        "Last eliminated player matches the elimination history"
    }
}

/// All match invariants.
pub type MatchInvariants = (
    RoleCountsUnchanged,
    WordConsistency,
    EliminationsFromRoster,
    LastEliminatedIsTail,
);
