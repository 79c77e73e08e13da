//! Core deterministic primitives.
//!
//! Everything randomized in the engine draws from [`rng::DeterministicRng`];
//! nothing here reads ambient randomness except the seed source.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, SeedSource, ClockSeedSource, FixedSeedSource, fresh_seed};
pub use hash::{StateHash, StateHasher, compute_state_hash};
