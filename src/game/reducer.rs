//! Phase State Machine
//!
//! The single authority over `(state, action) -> state`. Total: every pair
//! yields a state, invalid or out-of-phase actions yield the input unchanged.
//!
//! ## Transitions
//!
//! ```text
//! SETUP ──GAME_START──► REVEAL ──REVEAL_NEXT (last)──► DISCUSSION ◄──┐
//!   │                                    │                 │         │
//!   └─(invalid)─► RESULT                 │      START_VOTING        (no winner)
//!                   ▲                    │                 ▼         │
//!                   │                    │              VOTING ──────┘
//!                   │                    │                 │
//!                   │                    │            (winner)──► RESULT
//!                   │                    ▼
//!                   └──TIMER_END──── TIMER        (timed mode)
//! ```
//!
//! `GAME_RESET` returns to SETUP from anywhere; `SETUP_UPDATE` patches the
//! setup in any phase.

use tracing::{debug, info};

use crate::core::rng::{ClockSeedSource, DeterministicRng, SeedSource};
use crate::game::action::GameAction;
use crate::game::category::Category;
use crate::game::deal::deal;
use crate::game::outcome::evaluate_winner;
use crate::game::setup::{validate_setup, GameMode, SetupPatch};
use crate::game::state::{GameResult, GameState, Phase, PlayerId, Round, VotingState};
use crate::game::voting::{resolve, VoteResolution};

/// Log target for engine events.
pub const TARGET: &str = "imposter::engine";

/// Apply one action, drawing a fresh seed from the clock if the game starts
/// without a pinned one.
pub fn reduce(state: &GameState, action: &GameAction) -> GameState {
    reduce_with_seeds(state, action, &mut ClockSeedSource)
}

/// Apply one action with an explicit seed source.
///
/// The source is consulted only when a game starts successfully and its
/// setup has no pinned seed.
pub fn reduce_with_seeds<S>(state: &GameState, action: &GameAction, seeds: &mut S) -> GameState
where
    S: SeedSource + ?Sized,
{
    let next = match action {
        GameAction::SetupUpdate(patch) => Some(setup_update(state, patch)),
        GameAction::GameStart { categories } => game_start(state, categories, seeds),
        GameAction::RevealNext => reveal_next(state),
        GameAction::DiscussionStartVoting => start_voting(state),
        GameAction::VoteCast { voter, target } => vote_cast(state, *voter, *target),
        GameAction::VotingConfirmNext => confirm_next(state),
        GameAction::RoundContinue => round_continue(state),
        GameAction::TimerEnd => timer_end(state),
        GameAction::GameReset => Some(game_reset(state)),
    };

    match next {
        Some(next) => next,
        None => {
            debug!(target: TARGET, action = action.name(), phase = ?state.phase, "ignored action");
            state.clone()
        }
    }
}

fn setup_update(state: &GameState, patch: &SetupPatch) -> GameState {
    GameState {
        setup: state.setup.merged(patch),
        ..state.clone()
    }
}

fn game_start<S>(state: &GameState, categories: &[Category], seeds: &mut S) -> Option<GameState>
where
    S: SeedSource + ?Sized,
{
    if state.phase != Phase::Setup {
        return None;
    }

    let validated = match validate_setup(&state.setup, categories) {
        Ok(v) => v,
        Err(rejection) => {
            info!(target: TARGET, %rejection, "setup rejected");
            return Some(GameState {
                phase: Phase::Result,
                result: Some(GameResult::CONFIG_INVALID),
                ..state.clone()
            });
        }
    };

    let seed = state.setup.seed.unwrap_or_else(|| seeds.next_seed());
    let mut rng = DeterministicRng::new(seed);
    let dealt = deal(&validated, state.setup.imposter_sees_imposter_only, &mut rng)?;

    info!(
        target: TARGET,
        seed,
        category = %dealt.category_name,
        players = validated.players,
        imposters = validated.imposters,
        mode = ?state.setup.mode,
        "game started"
    );

    let mut setup = state.setup.clone();
    setup.players = i32::from(validated.players);
    setup.imposters = i32::from(validated.imposters);

    Some(GameState {
        phase: Phase::Reveal,
        setup,
        category_name: dealt.category_name,
        seed,
        secret_word: dealt.secret_word,
        imposter_word: dealt.imposter_word,
        roles_by_player: dealt.roles_by_player,
        reveal_order: dealt.reveal_order,
        reveal_index: 0,
        round: Round::opening(&dealt.players),
        voting: None,
        last_elimination: None,
        result: None,
    })
}

fn reveal_next(state: &GameState) -> Option<GameState> {
    if state.phase != Phase::Reveal {
        return None;
    }

    let reveal_index = (state.reveal_index + 1).min(state.reveal_order.len());
    let phase = if reveal_index < state.reveal_order.len() {
        Phase::Reveal
    } else {
        match state.setup.mode {
            GameMode::Elimination => Phase::Discussion,
            GameMode::Timed => Phase::Timer,
        }
    };

    Some(GameState {
        phase,
        reveal_index,
        ..state.clone()
    })
}

fn start_voting(state: &GameState) -> Option<GameState> {
    if state.phase != Phase::Discussion {
        return None;
    }

    Some(GameState {
        phase: Phase::Voting,
        voting: Some(VotingState::open(&state.round.alive)),
        last_elimination: None,
        ..state.clone()
    })
}

fn vote_cast(state: &GameState, voter: PlayerId, target: PlayerId) -> Option<GameState> {
    if state.phase != Phase::Voting {
        return None;
    }
    let voting = state.voting.as_ref()?;

    if voting.current_voter() != Some(voter) {
        return None;
    }
    if !state.round.is_alive(target) || target == voter {
        return None;
    }

    let mut voting = voting.clone();
    voting.votes.insert(voter, target);

    Some(GameState {
        voting: Some(voting),
        ..state.clone()
    })
}

fn confirm_next(state: &GameState) -> Option<GameState> {
    if state.phase != Phase::Voting {
        return None;
    }
    let voting = state.voting.as_ref()?;
    let voter = voting.current_voter()?;

    // Must vote before advancing
    if !voting.votes.contains_key(&voter) {
        return None;
    }

    let next_index = voting.voter_index + 1;
    if next_index < voting.voter_order.len() {
        let mut voting = voting.clone();
        voting.voter_index = next_index;
        return Some(GameState {
            voting: Some(voting),
            ..state.clone()
        });
    }

    match resolve(voting) {
        VoteResolution::NoVotes => None,
        VoteResolution::Revote(tie) => {
            info!(target: TARGET, candidates = ?tie.candidates, "tie, starting revote");
            Some(GameState {
                voting: Some(VotingState {
                    voter_order: voting.voter_order.clone(),
                    voter_index: 0,
                    votes: Default::default(),
                    tie: Some(tie),
                }),
                last_elimination: None,
                ..state.clone()
            })
        }
        VoteResolution::Eliminate(elimination) => {
            let out = elimination.eliminated;
            let alive: Vec<PlayerId> = state.round.alive.iter().copied().filter(|p| *p != out).collect();
            let mut eliminated = state.round.eliminated.clone();
            eliminated.push(out);

            let result = evaluate_winner(&alive, &state.roles_by_player);
            info!(
                target: TARGET,
                player = out.get(),
                was_tie = elimination.was_tie,
                was_revote = elimination.was_revote,
                "player eliminated"
            );
            if let Some(result) = result {
                info!(target: TARGET, winner = ?result.winner, reason = ?result.reason, "game over");
            }

            Some(GameState {
                phase: if result.is_some() { Phase::Result } else { Phase::Discussion },
                round: Round {
                    number: state.round.number,
                    alive,
                    eliminated,
                },
                voting: None,
                last_elimination: Some(elimination),
                result,
                ..state.clone()
            })
        }
    }
}

fn round_continue(state: &GameState) -> Option<GameState> {
    if state.phase != Phase::Discussion {
        return None;
    }

    let mut round = state.round.clone();
    round.number += 1;

    Some(GameState {
        round,
        last_elimination: None,
        ..state.clone()
    })
}

fn timer_end(state: &GameState) -> Option<GameState> {
    if state.phase != Phase::Timer {
        return None;
    }

    info!(target: TARGET, "timed round over");
    Some(GameState {
        phase: Phase::Result,
        result: Some(GameResult::TIME_UP),
        ..state.clone()
    })
}

fn game_reset(state: &GameState) -> GameState {
    GameState::with_setup(state.setup.carried_forward())
}

// =============================================================================
// TESTS
// =============================================================================
