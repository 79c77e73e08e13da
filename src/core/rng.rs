//! Deterministic Random Number Generator
//!
//! Uses the Mulberry32 algorithm: a 32-bit state, integer-only mixing, and a
//! float projection into `[0, 1)` that is exact on every platform.
//! Given the same seed, produces an identical sequence everywhere.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Mulberry32 increment.
const MULBERRY_STEP: u32 = 0x6D2B_79F5;

/// 2^32 as a float, used to project a `u32` into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Deterministic PRNG using the Mulberry32 algorithm.
///
/// # Determinism Guarantee
///
/// The mixing step uses only wrapping integer arithmetic. The float returned
/// by [`next_f64`](Self::next_f64) is `u32 / 2^32`, which is exactly
/// representable, so index draws of the form `floor(next * len)` agree across
/// platforms.
///
/// # Example
///
/// ```
/// use imposter::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(0);
/// assert_eq!(rng.next_u32(), 1144304738); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u32,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generate the next raw 32-bit value.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_STEP);
        let a = self.state;
        let mut t = (a ^ (a >> 15)).wrapping_mul(1 | a);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Generate the next value in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }

    /// Generate an index in `[0, len)` as `floor(next_f64() * len)`.
    ///
    /// Returns 0 without advancing when `len` is 0.
    #[inline]
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_f64() * len as f64) as usize
    }

    /// Shuffle a slice in place using Fisher-Yates, right to left.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_index(i + 1);
            slice.swap(i, j);
        }
    }

    /// Return a shuffled copy of a slice, leaving the input untouched.
    pub fn shuffled<T: Clone>(&mut self, slice: &[T]) -> Vec<T> {
        let mut out = slice.to_vec();
        self.shuffle(&mut out);
        out
    }

    /// Select a random element from a slice.
    pub fn sample<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let idx = self.next_index(slice.len());
            slice.get(idx)
        }
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }
}

// =============================================================================
// SEED SOURCE
// =============================================================================

/// Supplies seeds for games whose setup does not pin one.
///
/// Seeds never come from a [`DeterministicRng`]; they are the root of the
/// deterministic stream, not a product of it.
pub trait SeedSource {
    /// Produce the seed for the next game.
    fn next_seed(&mut self) -> u32;
}

/// Seed source backed by [`fresh_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockSeedSource;

impl SeedSource for ClockSeedSource {
    fn next_seed(&mut self) -> u32 {
        fresh_seed()
    }
}

/// Seed source that always yields the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedSeedSource(pub u32);

impl SeedSource for FixedSeedSource {
    fn next_seed(&mut self) -> u32 {
        self.0
    }
}

/// Produce a fresh 32-bit seed.
///
/// Mixes the wall clock, a monotonic high-resolution reading and a
/// process-local counter so two calls within the same clock tick still
/// differ.
pub fn fresh_seed() -> u32 {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let wall_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let mono_nanos = ORIGIN.get_or_init(Instant::now).elapsed().as_nanos();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    derive_seed(wall_nanos, mono_nanos, count)
}

/// Fold seed entropy into a `u32`.
///
/// Pure; split out of [`fresh_seed`] so the mixing is testable.
pub fn derive_seed(wall_nanos: u128, mono_nanos: u128, counter: u32) -> u32 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"IMPOSTER_SEED_V1");
    hasher.update(wall_nanos.to_le_bytes());
    hasher.update(mono_nanos.to_le_bytes());
    hasher.update(counter.to_le_bytes());

    let hash = hasher.finalize();
    u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]])
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_known_values() {
        // These values must never change!
        // If they do, recorded transcripts stop replaying.
        let mut rng = DeterministicRng::new(42);
        assert_eq!(rng.next_u32(), 2581720956);
        assert_eq!(rng.next_u32(), 1925393290);
        assert_eq!(rng.next_u32(), 3661312704);

        let mut rng = DeterministicRng::new(0);
        assert_eq!(rng.next_u32(), 1144304738);
        assert_eq!(rng.next_u32(), 1416247);
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = DeterministicRng::new(9999);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_next_index() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            assert!(rng.next_index(12) < 12);
        }

        assert_eq!(rng.next_index(0), 0);
        assert_eq!(rng.next_index(1), 0);
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = DeterministicRng::new(1111);
        let mut rng2 = DeterministicRng::new(1111);

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut arr2 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let mut rng = DeterministicRng::new(77);
        let input: Vec<u8> = (1..=12).collect();
        let mut out = rng.shuffled(&input);

        assert_eq!(input, (1..=12).collect::<Vec<u8>>());
        out.sort_unstable();
        assert_eq!(out, input);
    }

    #[test]
    fn test_sample() {
        let mut rng = DeterministicRng::new(5);
        let empty: [u8; 0] = [];
        assert_eq!(rng.sample(&empty), None);
        assert_eq!(rng.sample(&["only"]), Some(&"only"));

        let words = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(words.contains(rng.sample(&words).unwrap()));
        }
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = DeterministicRng::new(5555);
        for _ in 0..50 {
            rng.next_u32();
        }

        let saved_state = rng.state();
        let next_values: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();

        rng.set_state(saved_state);
        for expected in next_values {
            assert_eq!(rng.next_u32(), expected);
        }
    }

    #[test]
    fn test_derive_seed() {
        let a = derive_seed(1_700_000_000_000_000_000, 42, 0);
        let b = derive_seed(1_700_000_000_000_000_000, 42, 0);
        assert_eq!(a, b);

        // Same clock readings, different counter
        assert_ne!(a, derive_seed(1_700_000_000_000_000_000, 42, 1));
    }

    #[test]
    fn test_fresh_seed_varies() {
        let seeds: Vec<u32> = (0..8).map(|_| fresh_seed()).collect();
        let first = seeds[0];
        assert!(seeds.iter().any(|s| *s != first));
    }

    #[test]
    fn test_seed_sources() {
        let mut fixed = FixedSeedSource(7);
        assert_eq!(fixed.next_seed(), 7);
        assert_eq!(fixed.next_seed(), 7);

        let mut clock = ClockSeedSource;
        let _ = clock.next_seed();
    }
}
