//! Command implementations shared by the binary and the integration tests.

use crate::config::AppConfig;
use crate::driver::TableDriver;
use crate::prefs::FilePreferences;
use crate::words::{WordSource, WordSourceError, default_pairs, pick_pair};
use anyhow::Context;
use chrono::{DateTime, Utc};
use derive_new::new;
use std::io::{BufRead, Write};
use tracing::{info, instrument, warn};
use undercover_engine::{Match, MatchSetup, RoleBounds, SecureRng, WordPair, Winner};

/// Per-invocation choices for `play`, layered over [`AppConfig`].
#[derive(Debug, Clone, Default, new)]
pub struct PlayOptions {
    /// Player names; empty means the saved table.
    pub players: Vec<String>,
    /// Word locator; `None` means the saved one.
    pub locator: Option<String>,
    /// Clear the terminal between reveals.
    pub clear_screen: bool,
}

/// A match that has been played or abandoned.
#[derive(Debug, Clone)]
pub struct PlayedMatch {
    /// Final match state.
    pub game: Match,
    /// When roles were dealt.
    pub started_at: DateTime<Utc>,
    /// Winner, `None` if the table quit.
    pub winner: Option<Winner>,
}

/// Loads pairs from `locator`, falling back to the built-in list.
///
/// The error that forced the fallback is returned alongside.
#[instrument(skip(source))]
pub async fn load_pairs_or_default<S>(
    source: &S,
    locator: &str,
) -> (Vec<WordPair>, Option<WordSourceError>)
where
    S: WordSource + ?Sized,
{
    match source.load(locator).await {
        Ok(pairs) => (pairs, None),
        Err(e) => {
            warn!(error = %e, "Falling back to built-in word list");
            (default_pairs(), Some(e))
        }
    }
}

/// Deals and plays one match at the table.
///
/// The names and locator are saved once the deal succeeds, together with
/// the new first speaker.
#[instrument(skip_all, fields(players = options.players.len()))]
pub async fn play<S, R, W>(
    config: &AppConfig,
    options: PlayOptions,
    prefs: &mut FilePreferences,
    source: &S,
    rng: &mut SecureRng,
    input: R,
    mut output: W,
) -> anyhow::Result<PlayedMatch>
where
    S: WordSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let names = if options.players.is_empty() {
        prefs.player_names().to_vec()
    } else {
        options.players
    };
    let locator = options
        .locator
        .unwrap_or_else(|| prefs.word_locator().to_string());

    let (pairs, fallback) = load_pairs_or_default(source, &locator).await;
    if let Some(e) = fallback {
        writeln!(output, "{}; using the built-in word list.", e)?;
    }
    let pair = pick_pair(&pairs, rng)
        .cloned()
        .context("word list is empty")?;

    let counts = config.role_counts();
    if !RoleBounds::for_players(names.len(), counts).admits(counts) {
        warn!(
            undercover = counts.undercover,
            mr_white = counts.mr_white,
            players = names.len(),
            "Impostor counts exceed the usual setup limits"
        );
    }

    let setup = MatchSetup::new(names)
        .with_counts(counts)
        .with_policy(*config.speaking_policy());
    let mut game = setup.start(&pair, prefs, rng)?;
    let started_at = Utc::now();

    let dealt = game
        .roster()
        .players()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    prefs.set_player_names(dealt);
    prefs.set_word_locator(locator);
    prefs.save()?;

    let mut driver = TableDriver::new(input, output).with_screen_clearing(options.clear_screen);
    let winner = driver.run(&mut game)?;
    match winner {
        Some(w) => info!(winner = %w, "Match finished"),
        None => info!("Match abandoned"),
    }

    Ok(PlayedMatch {
        game,
        started_at,
        winner,
    })
}

/// Renders the saved names, one per line.
pub fn list_players(prefs: &FilePreferences) -> String {
    if prefs.player_names().is_empty() {
        return "No saved players.".to_string();
    }
    prefs
        .player_names()
        .iter()
        .enumerate()
        .map(|(i, n)| format!("{}. {}", i + 1, n))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces the saved names, dropping blanks.
#[instrument(skip(prefs))]
pub fn set_players(prefs: &mut FilePreferences, names: Vec<String>) -> anyhow::Result<()> {
    let names = names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    prefs.set_player_names(names);
    prefs.save()?;
    Ok(())
}

/// Forgets the saved names.
#[instrument(skip(prefs))]
pub fn clear_players(prefs: &mut FilePreferences) -> anyhow::Result<()> {
    prefs.set_player_names(Vec::new());
    prefs.save()?;
    Ok(())
}

/// Loads `locator` strictly and summarizes it.
#[instrument(skip(source))]
pub async fn describe_words<S>(source: &S, locator: &str) -> Result<String, WordSourceError>
where
    S: WordSource + ?Sized,
{
    let pairs = source.load(locator).await?;
    let label = if locator.trim().is_empty() {
        "built-in list"
    } else {
        locator
    };
    let sample = pairs
        .first()
        .map(|p| format!(", e.g. {}", p))
        .unwrap_or_default();
    Ok(format!("{}: {} pairs{}", label, pairs.len(), sample))
}
