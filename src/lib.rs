//! # Imposter Game Engine
//!
//! Deterministic rules engine for the pass-and-play party game Imposter.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    IMPOSTER ENGINE                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Mulberry32 PRNG and seed sources          │
//! │  └── hash.rs     - State hashing for verification            │
//! │                                                              │
//! │  game/           - Game rules (pure)                         │
//! │  ├── action.rs   - Engine actions                            │
//! │  ├── category.rs - Word categories                           │
//! │  ├── setup.rs    - Configuration and validation              │
//! │  ├── state.rs    - Game state snapshot                       │
//! │  ├── deal.rs     - Words, roles and reveal order             │
//! │  ├── voting.rs   - Ballot tally and revotes                  │
//! │  ├── outcome.rs  - Win conditions                            │
//! │  └── reducer.rs  - Phase state machine                       │
//! │                                                              │
//! │  replay/         - Transcripts and verification by replay    │
//! │  session.rs      - Caller-owned session wrapper              │
//! │  config.rs       - Environment configuration                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! `(state, action, seed)` fully determines the next state:
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time dependencies inside the reducer
//! - All randomness from one seeded Mulberry32 stream per game
//!
//! The only ambient input is the seed drawn when a game starts without a
//! pinned one, and [`SeedSource`](crate::core::SeedSource) makes that injectable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod game;
pub mod replay;
pub mod session;

// Re-export commonly used types
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::core::hash::StateHash;
pub use crate::core::rng::{ClockSeedSource, DeterministicRng, FixedSeedSource, SeedSource};
pub use crate::game::action::GameAction;
pub use crate::game::category::{Category, CategorySet};
pub use crate::game::reducer::{reduce, reduce_with_seeds};
pub use crate::game::setup::{GameMode, GameSetup, SetupPatch};
pub use crate::game::state::{GameResult, GameState, Phase, PlayerId, Role, Winner};
pub use crate::replay::{verify_transcript, GameTranscript, TranscriptError};
pub use crate::session::GameSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
