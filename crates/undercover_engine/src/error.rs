//! Error types for match setup and round bookkeeping.

/// Error raised by the match engine.
///
/// `InvalidConfiguration` is the caller's fault and surfaces at setup time.
/// The remaining variants indicate a driver that issued an operation it
/// should not have (wrong phase, stale vote) and are not meant to be retried.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Bad player count, duplicate names or impossible role counts.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The player has already been voted out.
    #[display("{} has already been eliminated", _0)]
    AlreadyEliminated(String),

    /// The name is not part of the roster.
    #[display("No player named {:?} in this match", _0)]
    UnknownPlayer(String),

    /// The operation is not valid in the current phase.
    #[display("Expected phase {}, match is in {}", expected, actual)]
    WrongPhase {
        /// Phase the operation requires.
        expected: &'static str,
        /// Phase the match is actually in.
        actual: &'static str,
    },

    /// A post-transition invariant failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineError {}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidConfiguration`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}
