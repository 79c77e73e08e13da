//! Game Session Management
//!
//! Owns one game's state together with its seed source, category list and
//! transcript. Hosts drive a session by dispatching actions; the reducer
//! stays pure and the session does the bookkeeping around it.

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::rng::{ClockSeedSource, SeedSource};
use crate::game::action::GameAction;
use crate::game::category::CategorySet;
use crate::game::reducer::reduce_with_seeds;
use crate::game::state::GameState;
use crate::replay::transcript::GameTranscript;

/// Seed source wrapper that remembers what it handed out.
struct Recording<'a, S: ?Sized> {
    inner: &'a mut S,
    drawn: Option<u32>,
}

impl<S: SeedSource + ?Sized> SeedSource for Recording<'_, S> {
    fn next_seed(&mut self) -> u32 {
        let seed = self.inner.next_seed();
        self.drawn = Some(seed);
        seed
    }
}

/// A single game, from setup through any number of resets.
pub struct GameSession<S = ClockSeedSource> {
    state: GameState,
    seeds: S,
    categories: CategorySet,
    transcript: GameTranscript,
}

impl GameSession<ClockSeedSource> {
    /// Create a session seeded from the clock, with the bundled categories.
    pub fn new(initial: GameState) -> Self {
        Self::with_seed_source(initial, ClockSeedSource)
    }
}

impl<S: SeedSource> GameSession<S> {
    /// Create a session with an explicit seed source.
    pub fn with_seed_source(initial: GameState, seeds: S) -> Self {
        let transcript = GameTranscript::new(initial.clone());
        info!(game_id = %transcript.game_id, "session opened");
        Self {
            state: initial,
            seeds,
            categories: CategorySet::builtin(),
            transcript,
        }
    }

    /// Replace the category list used by [`start`](Self::start).
    pub fn with_categories(mut self, categories: CategorySet) -> Self {
        self.categories = categories;
        self
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Categories offered to `GAME_START`.
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Mutable access to the category list, for custom categories.
    pub fn categories_mut(&mut self) -> &mut CategorySet {
        &mut self.categories
    }

    /// Identifier of this session's transcript.
    pub fn game_id(&self) -> Uuid {
        self.transcript.game_id
    }

    /// Everything recorded so far.
    pub fn transcript(&self) -> &GameTranscript {
        &self.transcript
    }

    /// Close the session, keeping its transcript.
    pub fn into_transcript(self) -> GameTranscript {
        self.transcript
    }

    /// Apply an action, record it and return the new state.
    pub fn dispatch(&mut self, action: GameAction) -> &GameState {
        let mut seeds = Recording {
            inner: &mut self.seeds,
            drawn: None,
        };
        let next = reduce_with_seeds(&self.state, &action, &mut seeds);
        let drawn = seeds.drawn;

        if next.phase != self.state.phase {
            debug!(
                game_id = %self.transcript.game_id,
                from = ?self.state.phase,
                to = ?next.phase,
                "phase change"
            );
        }

        self.transcript.record(action, drawn, &next);
        self.state = next;
        &self.state
    }

    /// Start a game with the session's categories.
    pub fn start(&mut self) -> &GameState {
        let categories = self.categories.as_slice().to_vec();
        self.dispatch(GameAction::GameStart { categories })
    }
}
