//! Command-line interface for undercover.

use crate::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use undercover_engine::SpeakingPolicy;

/// Undercover - pass-and-play social deduction at the table
#[derive(Parser, Debug)]
#[command(name = "undercover")]
#[command(about = "Pass-and-play Undercover / Mr. White party game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override the preferences file from the config
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Deal a match and play it on this terminal
    Play {
        /// Comma-separated player names (defaults to the saved table)
        #[arg(long, value_delimiter = ',')]
        players: Vec<String>,

        /// Number of undercovers (random when omitted)
        #[arg(long)]
        undercovers: Option<usize>,

        /// Number of Mr. Whites (random when omitted)
        #[arg(long)]
        mr_whites: Option<usize>,

        /// Word list: empty for built-in, an http(s) URL, or a file path
        #[arg(long)]
        words: Option<String>,

        /// Speaking-order policy (first_with_memory or first_and_last)
        #[arg(long)]
        policy: Option<SpeakingPolicy>,

        /// Write a JSON transcript here when the match ends
        #[arg(long)]
        transcript: Option<PathBuf>,

        /// Do not clear the terminal between reveals
        #[arg(long)]
        no_clear: bool,
    },

    /// Manage the saved player names
    Players {
        /// Action to perform
        #[command(subcommand)]
        action: PlayersAction,
    },

    /// Load a word list and report how many pairs it holds
    Words {
        /// Locator to check (defaults to the saved one)
        #[arg(long)]
        locator: Option<String>,
    },
}

/// Saved-table actions
#[derive(Subcommand, Debug)]
pub enum PlayersAction {
    /// Print the saved names
    List,

    /// Replace the saved names
    Set {
        /// Names in table order
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Forget the saved names
    Clear,
}
