//! Deterministic random source for one match.
//!
//! Every stochastic decision in the engine draws from a [`MatchRng`] that is
//! created inside `simulate` from the caller's seed. Nothing is shared
//! between invocations, so two calls with the same inputs replay the same
//! draw sequence.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MatchError;

// ============================================================================
// Seed
// ============================================================================

/// Caller-facing seed: an integer or any string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchSeed {
    Number(u64),
    Text(String),
}

impl MatchSeed {
    /// Internal 64-bit seed. Strings are hashed with FNV-1a so that the
    /// derivation is stable across platforms and toolchains.
    pub fn derive(&self) -> u64 {
        match self {
            MatchSeed::Number(n) => *n,
            MatchSeed::Text(s) => fnv1a64(s.as_bytes()),
        }
    }

    /// Checked conversion from a float seed; non-finite values are rejected.
    pub fn try_from_f64(value: f64) -> Result<Self, MatchError> {
        if !value.is_finite() {
            return Err(MatchError::InvalidSeed(value.to_string()));
        }
        if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
            Ok(MatchSeed::Number(value as u64))
        } else {
            Ok(MatchSeed::Number(value.to_bits()))
        }
    }

    /// Interpret a command-line or query-string value: digits become a
    /// numeric seed, anything else is hashed as text.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(n) => MatchSeed::Number(n),
            Err(_) => MatchSeed::Text(raw.to_string()),
        }
    }
}

impl From<u64> for MatchSeed {
    fn from(n: u64) -> Self {
        MatchSeed::Number(n)
    }
}

impl From<&str> for MatchSeed {
    fn from(s: &str) -> Self {
        MatchSeed::Text(s.to_string())
    }
}

impl From<String> for MatchSeed {
    fn from(s: String) -> Self {
        MatchSeed::Text(s)
    }
}

/// Float seeds must be finite. A NaN or infinite seed is a caller bug.
impl From<f64> for MatchSeed {
    fn from(value: f64) -> Self {
        assert!(value.is_finite(), "match seed must be finite, got {}", value);
        match MatchSeed::try_from_f64(value) {
            Ok(seed) => seed,
            Err(_) => unreachable!("finite seeds always convert"),
        }
    }
}

impl fmt::Display for MatchSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchSeed::Number(n) => write!(f, "{}", n),
            MatchSeed::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for b in bytes {
        hash = (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME);
    }
    hash
}

// ============================================================================
// RNG
// ============================================================================

/// Seeded ChaCha8 stream owned by a single simulation.
#[derive(Debug, Clone)]
pub struct MatchRng {
    inner: ChaCha8Rng,
    draws: u32,
}

impl MatchRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: ChaCha8Rng::seed_from_u64(seed), draws: 0 }
    }

    pub fn from_seed(seed: &MatchSeed) -> Self {
        Self::new(seed.derive())
    }

    /// Uniform draw in `[0, 1)`
    pub fn roll(&mut self) -> f64 {
        self.draws += 1;
        self.inner.gen::<f64>()
    }

    /// Uniform draw in `[low, high)`. Degenerate ranges return `low`
    /// and still consume a draw so the stream position does not depend
    /// on configuration values.
    pub fn range(&mut self, low: f64, high: f64) -> f64 {
        let t = self.roll();
        if high <= low {
            return low;
        }
        low + (high - low) * t
    }

    /// Match minute in `1..=90`
    pub fn minute(&mut self) -> u8 {
        self.draws += 1;
        self.inner.gen_range(1..=90)
    }

    /// Index drawn proportionally to `weights`. Falls back to a uniform
    /// pick when every weight is zero. `None` only for an empty slice.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        self.draws += 1;
        match WeightedIndex::new(weights) {
            Ok(dist) => Some(dist.sample(&mut self.inner)),
            Err(_) => Some(self.inner.gen_range(0..weights.len())),
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> u32 {
        self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = MatchRng::new(12345);
        let mut b = MatchRng::new(12345);
        for _ in 0..100 {
            assert_eq!(a.roll().to_bits(), b.roll().to_bits());
        }
        assert_eq!(a.draws(), 100);
    }

    #[test]
    fn test_text_seed_derivation_is_stable() {
        let a = MatchSeed::from("match-1");
        let b = MatchSeed::Text("match-1".to_string());
        assert_eq!(a.derive(), b.derive());
        assert_ne!(MatchSeed::from("match-1").derive(), MatchSeed::from("match-2").derive());
        // FNV-1a of the empty string is the offset basis
        assert_eq!(MatchSeed::from("").derive(), 0xcbf2_9ce4_8422_2325);
    }

    #[test]
    fn test_float_seed() {
        assert_eq!(MatchSeed::from(42.0), MatchSeed::Number(42));
        assert!(MatchSeed::try_from_f64(f64::NAN).is_err());
        assert!(MatchSeed::try_from_f64(f64::INFINITY).is_err());
        assert_eq!(MatchSeed::from(-1.5), MatchSeed::Number((-1.5f64).to_bits()));
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn test_non_finite_seed_panics() {
        let _ = MatchSeed::from(f64::NAN);
    }

    #[test]
    fn test_untagged_deserialize() {
        let n: MatchSeed = serde_json::from_str("7").unwrap();
        let s: MatchSeed = serde_json::from_str("\"derby\"").unwrap();
        assert_eq!(n, MatchSeed::Number(7));
        assert_eq!(s, MatchSeed::Text("derby".into()));
        assert_eq!(MatchSeed::parse_lenient("99"), MatchSeed::Number(99));
        assert_eq!(MatchSeed::parse_lenient("round-3"), MatchSeed::Text("round-3".into()));
    }

    #[test]
    fn test_ranges() {
        let mut rng = MatchRng::new(7);
        for _ in 0..500 {
            let v = rng.range(2.2, 3.2);
            assert!((2.2..3.2).contains(&v));
            let m = rng.minute();
            assert!((1..=90).contains(&m));
        }
        assert_eq!(rng.range(1.0, 1.0), 1.0);
    }

    #[test]
    fn test_weighted_index() {
        let mut rng = MatchRng::new(3);
        assert_eq!(rng.weighted_index(&[]), None);
        for _ in 0..50 {
            assert_eq!(rng.weighted_index(&[0.0, 5.0, 0.0]), Some(1));
        }
        let idx = rng.weighted_index(&[0.0, 0.0]).unwrap();
        assert!(idx < 2);
    }
}
