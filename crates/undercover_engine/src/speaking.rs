//! Speaking-order selection.
//!
//! The first speaker is drawn from a weighted bag where Mr. White counts
//! once and everyone else twice. Under the default policy the previous
//! match's first speaker sits out of that draw, and the new first speaker
//! is written back to the injected [`LastStarterStore`].

use crate::rng::SecureRng;
use crate::types::{Player, Roster};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// The one fact that survives between matches: who spoke first last time.
pub trait LastStarterStore {
    /// Name of the previous first speaker, if any.
    fn last_starter(&self) -> Option<String>;

    /// Records the first speaker of the match being set up.
    fn set_last_starter(&mut self, name: &str);
}

/// In-memory [`LastStarterStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLastStarter {
    name: Option<String>,
}

impl MemoryLastStarter {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that remembers `name`.
    pub fn with(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl LastStarterStore for MemoryLastStarter {
    fn last_starter(&self) -> Option<String> {
        self.name.clone()
    }

    fn set_last_starter(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }
}

/// How the speaking order is weighted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SpeakingPolicy {
    /// Weight the first seat only and skip last match's first speaker.
    #[default]
    FirstWithMemory,
    /// Weight the first and the last seat independently, no memory.
    FirstAndLast,
}

/// Orders the roster for the discussion.
///
/// Always returns a permutation of the roster. Only
/// [`SpeakingPolicy::FirstWithMemory`] touches `store`.
#[instrument(skip(roster, store, rng), fields(players = roster.len()))]
pub fn speaking_order<S>(
    roster: &Roster,
    store: &mut S,
    policy: SpeakingPolicy,
    rng: &mut SecureRng,
) -> Vec<Player>
where
    S: LastStarterStore + ?Sized,
{
    let mut pool: Vec<&Player> = roster.players().iter().collect();
    if pool.is_empty() {
        return Vec::new();
    }

    let mut order = Vec::with_capacity(pool.len());
    let mut last = None;

    match policy {
        SpeakingPolicy::FirstWithMemory => {
            let previous = store.last_starter();
            let first = draw_weighted(&mut pool, previous.as_deref(), rng);
            info!(first_speaker = %first.name(), "First speaker chosen");
            store.set_last_starter(first.name());
            order.push(first);
        }
        SpeakingPolicy::FirstAndLast => {
            order.push(draw_weighted(&mut pool, None, rng));
            if !pool.is_empty() {
                last = Some(draw_weighted(&mut pool, None, rng));
            }
        }
    }

    while !pool.is_empty() {
        let idx = rng.index(pool.len());
        order.push(pool.remove(idx));
    }
    order.extend(last);

    debug!(order = ?order.iter().map(|p| p.name()).collect::<Vec<_>>(), "Speaking order");
    order.into_iter().cloned().collect()
}

/// Removes one player from `pool`, weighted by role, never `excluded`
/// unless nobody else is left.
fn draw_weighted<'a>(
    pool: &mut Vec<&'a Player>,
    excluded: Option<&str>,
    rng: &mut SecureRng,
) -> &'a Player {
    let eligible: Vec<usize> = (0..pool.len())
        .filter(|&i| Some(pool[i].name()) != excluded)
        .collect();
    let eligible = if eligible.is_empty() {
        (0..pool.len()).collect()
    } else {
        eligible
    };

    let bag: Vec<usize> = eligible
        .into_iter()
        .flat_map(|i| std::iter::repeat_n(i, pool[i].role().first_speaker_weight()))
        .collect();
    let chosen = bag[rng.index(bag.len())];
    pool.remove(chosen)
}
