//! Undercover engine - pure match logic for the pass-and-play party game
//!
//! Players pass one device around, each secretly views a word, then the
//! table votes out suspected impostors. This crate deals roles and words,
//! picks the speaking order, keeps the elimination bookkeeping and decides
//! who won. It performs no I/O; the word list and the last-starter memory
//! are injected by the caller.
//!
//! # Example
//!
//! ```
//! use undercover_engine::{MatchSetup, MemoryLastStarter, Phase, SecureRng, WordPair};
//!
//! let setup = MatchSetup::new(["Ana", "Bo", "Cy", "Di", "Eve"]);
//! let mut store = MemoryLastStarter::new();
//! let mut rng = SecureRng::from_os();
//!
//! let mut game = setup.start(&WordPair::new("Coffee", "Tea"), &mut store, &mut rng)?;
//! assert!(matches!(game.phase(), Phase::Reveal { index: 0 }));
//! while game.current_viewer().is_some() {
//!     game.advance_reveal()?;
//! }
//! game.begin_vote()?;
//! # Ok::<(), undercover_engine::EngineError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod contracts;
mod error;
mod game;
mod invariants;
mod phases;
mod rng;
mod roles;
pub mod rules;
mod speaking;
mod state;
mod types;
mod vote;

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Domain types
pub use types::{Player, Role, Roster, WordPair};

// Crate-level exports - Randomness
pub use rng::SecureRng;

// Crate-level exports - Role assignment
pub use roles::{MIN_CIVILIANS, MIN_PLAYERS, RoleBounds, RoleCounts, assign_roles};

// Crate-level exports - Speaking order
pub use speaking::{LastStarterStore, MemoryLastStarter, SpeakingPolicy, speaking_order};

// Crate-level exports - Rules
pub use rules::{AliveCounts, GuessOutcome, Verdict, normalize_word, resolve_guess};

// Crate-level exports - Match lifecycle
pub use game::{Match, MatchSetup};
pub use phases::{Phase, Winner};
pub use state::MatchState;

// Crate-level exports - Contracts and invariants
pub use contracts::{Contract, EliminationContract, check_invariants};
pub use invariants::{
    EliminationsFromRoster, Invariant, InvariantSet, InvariantViolation, LastEliminatedIsTail,
    MatchInvariants, RoleCountsUnchanged, WordConsistency,
};
