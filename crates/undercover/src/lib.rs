//! Undercover - terminal companion for the pass-and-play party game
//!
//! Wraps the pure [`undercover_engine`] with the pieces a real table needs:
//! word lists from disk or the web, saved names and last starter, a TOML
//! config and a line-based driver for playing on one terminal.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod config;
mod driver;
mod prefs;
mod transcript;
mod words;

// Crate-level exports - CLI
pub use cli::{Cli, Command, PlayersAction};

// Crate-level exports - Commands
pub use commands::{
    PlayOptions, PlayedMatch, clear_players, describe_words, list_players, load_pairs_or_default,
    play, set_players,
};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use prefs::{FilePreferences, Preferences, PrefsError};

// Crate-level exports - Table driver
pub use driver::{QUIT_COMMAND, TableDriver};

// Crate-level exports - Transcript
pub use transcript::MatchTranscript;

// Crate-level exports - Word lists
pub use words::{
    FETCH_TIMEOUT, WordLoader, WordSource, WordSourceError, default_pairs, parse_word_list,
    pick_pair,
};
