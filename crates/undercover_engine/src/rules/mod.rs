//! Game rules as pure functions.
//!
//! Win evaluation and guess resolution take counts and strings, never the
//! match itself, so they can be checked in isolation.

pub mod guess;
pub mod win;

pub use guess::{GuessOutcome, normalize_word, resolve_guess, verdict_after_guess};
pub use win::{AliveCounts, Verdict, evaluate_alive, evaluate_elimination};
