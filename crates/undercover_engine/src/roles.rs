//! Role and word assignment.

use crate::error::EngineError;
use crate::rng::SecureRng;
use crate::types::{Player, Role, Roster, WordPair};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, trace};

/// Smallest playable table.
pub const MIN_PLAYERS: usize = 4;

/// Civilians that must remain after impostors are dealt.
pub const MIN_CIVILIANS: usize = 2;

/// Requested impostor counts. A zero means "pick at random".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleCounts {
    /// Undercover players, or 0 for random.
    #[serde(default)]
    pub undercover: usize,
    /// Mr. White players, or 0 for random.
    #[serde(default)]
    pub mr_white: usize,
}

impl RoleCounts {
    /// Creates explicit counts (zeros still mean random).
    pub fn new(undercover: usize, mr_white: usize) -> Self {
        Self {
            undercover,
            mr_white,
        }
    }

    /// Both counts chosen at random.
    pub fn random() -> Self {
        Self::default()
    }

    /// Applies the setup screen's slider coupling.
    ///
    /// A random undercover count makes Mr. White random too; a fixed
    /// undercover count needs a fixed Mr. White count, at least one. The
    /// result resolves to the same counts on every deal, or is random on
    /// both sides.
    pub fn coupled(self) -> Self {
        match (self.undercover, self.mr_white) {
            (0, _) => Self::random(),
            (undercover, 0) => Self::new(undercover, 1),
            _ => self,
        }
    }

    /// True when neither count is left to chance.
    pub fn is_fixed(&self) -> bool {
        self.undercover > 0 && self.mr_white > 0
    }

    /// Replaces random sentinels with concrete counts for `players` players.
    ///
    /// Undercovers are drawn from `[ceil(n/10), max(1, (n-2)/2)]`, then
    /// Mr. Whites from `[1, max(1, undercovers/3)]`.
    #[instrument(skip(rng))]
    pub fn resolve(self, players: usize, rng: &mut SecureRng) -> Self {
        let undercover = if self.undercover == 0 {
            let low = players.div_ceil(10);
            let high = (players.saturating_sub(2) / 2).max(1);
            rng.range_inclusive(low, high)
        } else {
            self.undercover
        };

        let mr_white = if self.mr_white == 0 {
            rng.range_inclusive(1, (undercover / 3).max(1))
        } else {
            self.mr_white
        };

        debug!(undercover, mr_white, "Resolved role counts");
        Self {
            undercover,
            mr_white,
        }
    }
}

/// Slider limits a setup screen offers for the impostor counts.
///
/// These only guide the UI; [`assign_roles`] enforces the hard rule that at
/// least two civilians remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleBounds {
    /// Upper limit on impostors of both kinds.
    pub max_impostors: usize,
    /// Upper limit on the undercover slider.
    pub max_undercovers: usize,
    /// Upper limit on the Mr. White slider.
    pub max_mr_whites: usize,
}

impl RoleBounds {
    /// Computes the limits for `players` players and the current selections.
    ///
    /// A random (zero) selection on one slider is counted as one impostor
    /// when bounding the other.
    #[instrument]
    pub fn for_players(players: usize, counts: RoleCounts) -> Self {
        let max_impostors = (players.saturating_sub(2) / 2).max(1);
        let effective_mr_white = if counts.mr_white == 0 { 1 } else { counts.mr_white };
        let effective_undercover = if counts.undercover == 0 { 1 } else { counts.undercover };

        Self {
            max_impostors,
            max_undercovers: (max_impostors + 1).saturating_sub(effective_mr_white),
            max_mr_whites: (max_impostors + 1).saturating_sub(effective_undercover).max(1),
        }
    }

    /// Whether `counts` sit inside the slider ranges.
    pub fn admits(&self, counts: RoleCounts) -> bool {
        counts.undercover <= self.max_undercovers && counts.mr_white <= self.max_mr_whites
    }
}

/// Deals roles and words to `names`.
///
/// The returned roster keeps the names in their input order; the roles are
/// shuffled across those positions with the secure source, and a coin flip
/// decides which word of `pair` belongs to the civilians.
///
/// # Errors
///
/// [`EngineError::InvalidConfiguration`] when fewer than four names are
/// given, a name is blank or repeated (ignoring case), or the resolved
/// impostor counts would leave fewer than two civilians.
#[instrument(skip(names, pair, rng), fields(players = names.len()))]
pub fn assign_roles<S: AsRef<str>>(
    names: &[S],
    pair: &WordPair,
    counts: RoleCounts,
    rng: &mut SecureRng,
) -> Result<Roster, EngineError> {
    validate_names(names)?;

    let total = names.len();
    let counts = counts.resolve(total, rng);
    let impostors = counts.undercover + counts.mr_white;
    let civilians = total.saturating_sub(impostors);
    if civilians < MIN_CIVILIANS {
        return Err(EngineError::invalid(format!(
            "{} undercover and {} Mr. White leave {} civilians out of {} players (need at least {})",
            counts.undercover, counts.mr_white, civilians, total, MIN_CIVILIANS
        )));
    }

    let (civilian_word, undercover_word) = if rng.coin() {
        (pair.first.clone(), pair.second.clone())
    } else {
        (pair.second.clone(), pair.first.clone())
    };
    trace!(%civilian_word, %undercover_word, "Word orientation chosen");

    let mut deck: Vec<(Role, &str)> = Vec::with_capacity(total);
    deck.extend(std::iter::repeat_n((Role::MrWhite, ""), counts.mr_white));
    deck.extend(std::iter::repeat_n(
        (Role::Undercover, undercover_word.as_str()),
        counts.undercover,
    ));
    deck.extend(std::iter::repeat_n(
        (Role::Civilian, civilian_word.as_str()),
        civilians,
    ));
    rng.shuffle(&mut deck);

    let players = names
        .iter()
        .zip(deck)
        .map(|(name, (role, word))| Player::new(name.as_ref().trim(), role, word))
        .collect();

    info!(
        civilians,
        undercover = counts.undercover,
        mr_white = counts.mr_white,
        "Roles dealt"
    );
    Ok(Roster::new(players, civilian_word, undercover_word))
}

#[instrument(skip_all)]
fn validate_names<S: AsRef<str>>(names: &[S]) -> Result<(), EngineError> {
    if names.len() < MIN_PLAYERS {
        return Err(EngineError::invalid(format!(
            "need at least {} players, got {}",
            MIN_PLAYERS,
            names.len()
        )));
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(EngineError::invalid("player names must not be blank"));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(EngineError::invalid(format!("duplicate player name {:?}", name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("P{}", i)).collect()
    }

    #[test]
    fn test_resolve_keeps_explicit_counts() {
        let mut rng = SecureRng::from_seed(3);
        let counts = RoleCounts::new(2, 1).resolve(8, &mut rng);
        assert_eq!(counts, RoleCounts::new(2, 1));
    }

    #[test]
    fn test_resolve_random_stays_in_range() {
        let mut rng = SecureRng::from_os();
        for n in 4..=20 {
            for _ in 0..50 {
                let c = RoleCounts::random().resolve(n, &mut rng);
                let low = n.div_ceil(10);
                let high = ((n - 2) / 2).max(1);
                assert!((low..=high).contains(&c.undercover), "n={} {:?}", n, c);
                assert!((1..=(c.undercover / 3).max(1)).contains(&c.mr_white));
                assert!(n - c.undercover - c.mr_white >= MIN_CIVILIANS);
            }
        }
    }

    #[test]
    fn test_too_few_players() {
        let mut rng = SecureRng::from_seed(1);
        let err = assign_roles(&names(3), &WordPair::new("a", "b"), RoleCounts::random(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_duplicate_names_ignore_case() {
        let mut rng = SecureRng::from_seed(1);
        let list = ["Ana", "Bo", "ana", "Cy"];
        let err = assign_roles(&list, &WordPair::new("a", "b"), RoleCounts::random(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut rng = SecureRng::from_seed(1);
        let list = ["Ana", "Bo", "  ", "Cy"];
        assert!(assign_roles(&list, &WordPair::new("a", "b"), RoleCounts::random(), &mut rng).is_err());
    }

    #[test]
    fn test_too_many_impostors() {
        let mut rng = SecureRng::from_seed(1);
        let err = assign_roles(&names(5), &WordPair::new("a", "b"), RoleCounts::new(2, 2), &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_bounds_match_setup_sliders() {
        let b = RoleBounds::for_players(8, RoleCounts::random());
        assert_eq!(b.max_impostors, 3);
        assert_eq!(b.max_undercovers, 3);
        assert_eq!(b.max_mr_whites, 3);

        let b = RoleBounds::for_players(8, RoleCounts::new(2, 2));
        assert_eq!(b.max_undercovers, 2);
        assert_eq!(b.max_mr_whites, 2);

        let b = RoleBounds::for_players(4, RoleCounts::new(3, 0));
        assert_eq!(b.max_impostors, 1);
        assert_eq!(b.max_mr_whites, 1);
    }

    #[test]
    fn test_bounds_admit() {
        let b = RoleBounds::for_players(9, RoleCounts::new(3, 1));
        assert!(b.admits(RoleCounts::new(3, 1)));
        assert!(!RoleBounds::for_players(9, RoleCounts::new(6, 1)).admits(RoleCounts::new(6, 1)));
    }

    #[test]
    fn test_coupling_follows_undercover_slider() {
        assert_eq!(RoleCounts::new(0, 2).coupled(), RoleCounts::random());
        assert_eq!(RoleCounts::new(3, 0).coupled(), RoleCounts::new(3, 1));
        assert_eq!(RoleCounts::new(3, 2).coupled(), RoleCounts::new(3, 2));
        assert!(RoleCounts::new(6, 0).coupled().is_fixed());
    }

    #[test]
    fn test_coupled_counts_deal_the_same_way_every_time() {
        let counts = RoleCounts::new(6, 0).coupled();
        for seed in 0..200 {
            let mut rng = SecureRng::from_seed(seed);
            let roster = assign_roles(&names(9), &WordPair::new("a", "b"), counts, &mut rng)
                .expect("fixed counts fit nine players");
            assert_eq!(roster.count(Role::Undercover), 6);
            assert_eq!(roster.count(Role::MrWhite), 1);
        }

        let too_many = RoleCounts::new(7, 0).coupled();
        for seed in 0..50 {
            let mut rng = SecureRng::from_seed(seed);
            assert!(assign_roles(&names(9), &WordPair::new("a", "b"), too_many, &mut rng).is_err());
        }
    }
}
