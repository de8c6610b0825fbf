//! Secure random source for role, word and speaking-order draws.
//!
//! Every draw the engine makes goes through [`SecureRng`]. In play it is
//! seeded from the operating system, so no player can reproduce a match
//! from observed outcomes. Tests may seed it explicitly for reproducibility.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// ChaCha20 stream seeded from the OS entropy source.
#[derive(Clone)]
pub struct SecureRng {
    inner: ChaCha20Rng,
}

impl SecureRng {
    /// Creates a generator seeded from the operating system CSPRNG.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
        }
    }

    /// Creates a reproducible generator. Never use this for a real match.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw from the closed range `[low, high]`.
    ///
    /// A reversed range collapses to `low`.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }

    /// Uniform index into a collection of `len` elements.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Fair coin flip.
    pub fn coin(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Unbiased Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::from_os()
    }
}

// Internal state stays out of logs and panic messages.
impl std::fmt::Debug for SecureRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureRng").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_streams_repeat() {
        let mut a = SecureRng::from_seed(7);
        let mut b = SecureRng::from_seed(7);
        let xs: Vec<usize> = (0..16).map(|_| a.index(1000)).collect();
        let ys: Vec<usize> = (0..16).map(|_| b.index(1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_range_inclusive_hits_both_ends() {
        let mut rng = SecureRng::from_os();
        let draws: Vec<usize> = (0..500).map(|_| rng.range_inclusive(2, 4)).collect();
        assert!(draws.iter().all(|d| (2..=4).contains(d)));
        assert!(draws.contains(&2));
        assert!(draws.contains(&4));
    }

    #[test]
    fn test_reversed_range_collapses() {
        let mut rng = SecureRng::from_seed(1);
        assert_eq!(rng.range_inclusive(3, 1), 3);
    }

    #[test]
    fn test_debug_hides_state() {
        let rng = SecureRng::from_seed(1);
        assert_eq!(format!("{:?}", rng), "SecureRng { .. }");
    }
}
