//! Undercover - terminal entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use undercover::{
    AppConfig, Cli, Command, FilePreferences, MatchTranscript, PlayOptions, PlayersAction,
    WordLoader, clear_players, describe_words, list_players, play, set_players,
};
use undercover_engine::SecureRng;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(path) = cli.prefs {
        config = config.with_preferences_path(path);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Play {
            players,
            undercovers,
            mr_whites,
            words,
            policy,
            transcript,
            no_clear,
        } => {
            let mut config = config.with_role_counts(undercovers, mr_whites);
            if let Some(policy) = policy {
                config = config.with_speaking_policy(policy);
            }
            let options = PlayOptions::new(players, words, !no_clear);
            run_play(config, options, transcript).await
        }
        Command::Players { action } => run_players(&config, action),
        Command::Words { locator } => run_words(&config, locator).await,
    }
}

/// Deal and play one match on this terminal
#[instrument(skip_all)]
async fn run_play(
    config: AppConfig,
    options: PlayOptions,
    transcript: Option<std::path::PathBuf>,
) -> Result<()> {
    info!("Starting Undercover match");

    let mut prefs = FilePreferences::open(config.preferences_path())?;
    let loader = WordLoader::new()?;
    let mut rng = SecureRng::from_os();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let played = play(
        &config,
        options,
        &mut prefs,
        &loader,
        &mut rng,
        stdin.lock(),
        stdout.lock(),
    )
    .await?;

    if let Some(path) = transcript {
        MatchTranscript::capture(&played.game, played.started_at).write_json(&path)?;
        println!("Transcript written to {}", path.display());
    }

    if played.winner.is_none() {
        println!("Match abandoned.");
    }
    Ok(())
}

/// Manage the saved table
fn run_players(config: &AppConfig, action: PlayersAction) -> Result<()> {
    let mut prefs = FilePreferences::open(config.preferences_path())?;
    match action {
        PlayersAction::List => println!("{}", list_players(&prefs)),
        PlayersAction::Set { names } => {
            set_players(&mut prefs, names)?;
            println!("{}", list_players(&prefs));
        }
        PlayersAction::Clear => {
            clear_players(&mut prefs)?;
            println!("Saved players cleared.");
        }
    }
    Ok(())
}

/// Check a word list
async fn run_words(config: &AppConfig, locator: Option<String>) -> Result<()> {
    let locator = match locator {
        Some(l) => l,
        None => FilePreferences::open(config.preferences_path())?
            .word_locator()
            .to_string(),
    };
    let loader = WordLoader::new()?;
    println!("{}", describe_words(&loader, &locator).await?);
    Ok(())
}
