//! Match lifecycle: setup, reveal, discussion and voting rounds.

#[cfg(debug_assertions)]
use crate::contracts::check_invariants;
use crate::error::EngineError;
use crate::phases::{Phase, Winner};
use crate::rng::SecureRng;
use crate::roles::{RoleCounts, assign_roles};
use crate::rules::{GuessOutcome, Verdict, evaluate_elimination, resolve_guess, verdict_after_guess};
use crate::speaking::{LastStarterStore, SpeakingPolicy, speaking_order};
use crate::state::MatchState;
use crate::types::{Player, Roster, WordPair};
use crate::vote;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Setup
// ─────────────────────────────────────────────────────────────

/// A table waiting to be dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSetup {
    names: Vec<String>,
    counts: RoleCounts,
    policy: SpeakingPolicy,
}

impl MatchSetup {
    /// Creates a setup with random role counts and the default policy.
    #[instrument(skip(names))]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            counts: RoleCounts::random(),
            policy: SpeakingPolicy::default(),
        }
    }

    /// Sets the requested impostor counts.
    pub fn with_counts(mut self, counts: RoleCounts) -> Self {
        self.counts = counts;
        self
    }

    /// Sets the speaking-order policy.
    pub fn with_policy(mut self, policy: SpeakingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Player names in table order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Requested impostor counts.
    pub fn counts(&self) -> RoleCounts {
        self.counts
    }

    /// Speaking-order policy.
    pub fn policy(&self) -> SpeakingPolicy {
        self.policy
    }

    /// Deals roles from `pair`, orders the table and opens the reveal.
    ///
    /// Callers must not start two matches against the same `store`
    /// concurrently.
    #[instrument(skip(self, pair, store, rng), fields(players = self.names.len()))]
    pub fn start<S>(
        &self,
        pair: &WordPair,
        store: &mut S,
        rng: &mut SecureRng,
    ) -> Result<Match, EngineError>
    where
        S: LastStarterStore + ?Sized,
    {
        let roster = assign_roles(&self.names, pair, self.counts, rng)?;
        let order = speaking_order(&roster, store, self.policy, rng);
        let order = order.iter().map(|p| p.name().to_string()).collect();

        let state = MatchState::new(roster, order);
        #[cfg(debug_assertions)]
        check_invariants(&state)?;

        info!("Match started");
        Ok(Match {
            setup: self.clone(),
            state,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Running match
// ─────────────────────────────────────────────────────────────

/// A dealt match, driven one phase at a time.
///
/// Every method checks the current phase and fails with
/// [`EngineError::WrongPhase`] when called out of turn.
#[derive(Debug, Clone)]
pub struct Match {
    setup: MatchSetup,
    state: MatchState,
}

impl Match {
    /// Full match state.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        self.state.phase()
    }

    /// Dealt roster.
    pub fn roster(&self) -> &Roster {
        self.state.roster()
    }

    /// Winner, once the match is over.
    pub fn winner(&self) -> Option<Winner> {
        match self.state.phase() {
            Phase::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Player currently viewing their word during the reveal.
    pub fn current_viewer(&self) -> Option<&Player> {
        match self.state.phase() {
            Phase::Reveal { index } => self.state.alive_in_speaking_order().get(*index).copied(),
            _ => None,
        }
    }

    /// Hands the device to the next player, or announces the first speaker
    /// once everyone alive has seen their word.
    #[instrument(skip(self))]
    pub fn advance_reveal(&mut self) -> Result<&Phase, EngineError> {
        let index = match self.state.phase() {
            Phase::Reveal { index } => *index,
            _ => return Err(self.wrong_phase("Reveal")),
        };

        let alive = self.state.alive_in_speaking_order();
        let next = if index + 1 < alive.len() {
            Phase::Reveal { index: index + 1 }
        } else {
            let first_speaker = alive
                .first()
                .map(|p| p.name().to_string())
                .unwrap_or_default();
            info!(%first_speaker, "Reveal finished");
            Phase::Announce { first_speaker }
        };
        self.transition(next)
    }

    /// Starts the discussion and vote after the announcement.
    #[instrument(skip(self))]
    pub fn begin_vote(&mut self) -> Result<&Phase, EngineError> {
        if !matches!(self.state.phase(), Phase::Announce { .. }) {
            return Err(self.wrong_phase("Announce"));
        }
        self.transition(Phase::Vote)
    }

    /// Votes `name` out and moves to [`Phase::Result`].
    ///
    /// # Errors
    ///
    /// [`EngineError::WrongPhase`] outside a vote,
    /// [`EngineError::UnknownPlayer`] for a name not in the roster and
    /// [`EngineError::AlreadyEliminated`] for a second vote on the same player.
    #[instrument(skip(self))]
    pub fn eliminate(&mut self, name: &str) -> Result<Player, EngineError> {
        vote::eliminate(&mut self.state, name)
    }

    /// Acknowledges the result and evaluates the table.
    ///
    /// A Mr. White elimination always leads to [`Phase::Guess`].
    #[instrument(skip(self))]
    pub fn continue_after_result(&mut self) -> Result<&Phase, EngineError> {
        let Phase::Result { eliminated } = self.state.phase().clone() else {
            return Err(self.wrong_phase("Result"));
        };
        let verdict = evaluate_elimination(eliminated.role(), self.state.alive_counts());
        self.apply(verdict, eliminated)
    }

    /// Resolves the eliminated Mr. White's guess.
    #[instrument(skip(self, guess))]
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessOutcome, EngineError> {
        let Phase::Guess { guesser } = self.state.phase().clone() else {
            return Err(self.wrong_phase("Guess"));
        };
        let roster = self.state.roster();
        let outcome = resolve_guess(guess, roster.civilian_word(), roster.undercover_word());
        info!(guesser = %guesser.name(), ?outcome, "Mr. White guessed");

        let verdict = verdict_after_guess(outcome, self.state.alive_counts());
        self.apply(verdict, guesser)?;
        Ok(outcome)
    }

    /// Abandons the match and returns to setup with the same table.
    #[instrument(skip(self))]
    pub fn cancel(self) -> MatchSetup {
        if !self.state.phase().is_over() {
            warn!(phase = self.state.phase().name(), "Match abandoned");
        }
        self.setup
    }

    fn apply(&mut self, verdict: Verdict, eliminated: Player) -> Result<&Phase, EngineError> {
        let next = match verdict {
            Verdict::Guess => Phase::Guess { guesser: eliminated },
            Verdict::Vote => Phase::Vote,
            Verdict::GameOver(winner) => {
                info!(%winner, "Match over");
                Phase::GameOver { winner }
            }
        };
        self.transition(next)
    }

    fn transition(&mut self, next: Phase) -> Result<&Phase, EngineError> {
        debug!(from = self.state.phase().name(), to = next.name(), "Phase transition");
        self.state.phase = next;

        #[cfg(debug_assertions)]
        check_invariants(&self.state)?;

        Ok(self.state.phase())
    }

    fn wrong_phase(&self, expected: &'static str) -> EngineError {
        let actual = self.state.phase().name();
        warn!(expected, actual, "Operation issued in wrong phase");
        EngineError::WrongPhase { expected, actual }
    }
}
