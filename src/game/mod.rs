//! Game Logic Module
//!
//! All game rules. 100% deterministic given a seed.
//!
//! ## Module Structure
//!
//! - `action`: The closed set of engine actions
//! - `category`: Word categories and category lists
//! - `setup`: Configuration, patches and validation
//! - `state`: Game state snapshot and accessors
//! - `deal`: Category, word, role and reveal-order draw
//! - `voting`: Ballot tally and tie handling
//! - `outcome`: Win conditions
//! - `reducer`: Phase state machine

pub mod action;
pub mod category;
pub mod deal;
pub mod outcome;
pub mod reducer;
pub mod setup;
pub mod state;
pub mod voting;

// Re-export key types
pub use action::GameAction;
pub use category::{Category, CategoryError, CategorySet};
pub use reducer::{reduce, reduce_with_seeds};
pub use setup::{validate_setup, GameMode, GameSetup, SetupPatch, SetupRejection, ValidatedSetup};
pub use state::{
    Elimination, GameResult, GameState, Phase, PlayerId, ResultReason, Role, RoleCard, Round, Tie,
    VotingState, Winner,
};
