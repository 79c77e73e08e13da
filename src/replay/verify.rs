//! Verification API
//!
//! Verify games by deterministic replay.

use tracing::debug;

use crate::core::hash::StateHash;
use crate::core::rng::SeedSource;
use crate::game::reducer::reduce_with_seeds;
use crate::game::state::GameState;
use crate::replay::transcript::{GameTranscript, TranscriptError};

/// Outcome of a successful replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedReplay {
    /// State after the last action.
    pub final_state: GameState,
    /// Hash of `final_state`.
    pub final_hash: StateHash,
    /// Number of actions replayed.
    pub steps: usize,
}

/// Feeds one recorded seed to the reducer and notes if it was asked for
/// one that was never recorded.
struct RecordedSeed {
    seed: Option<u32>,
    missing: bool,
}

impl SeedSource for RecordedSeed {
    fn next_seed(&mut self) -> u32 {
        match self.seed {
            Some(seed) => seed,
            None => {
                self.missing = true;
                0
            }
        }
    }
}

/// Verify a transcript by full replay.
///
/// Replays every action from the recorded initial state, handing each
/// `GAME_START` the seed recorded with it, and compares the hash after every
/// step. Fails at the first divergence.
pub fn verify_transcript(transcript: &GameTranscript) -> Result<VerifiedReplay, TranscriptError> {
    transcript.check_version()?;

    let mut state = transcript.initial_state.clone();
    let computed = state.compute_hash();
    if computed != transcript.initial_hash {
        return Err(TranscriptError::InitialStateMismatch {
            expected: transcript.initial_hash,
            computed,
        });
    }

    for (step, entry) in transcript.entries.iter().enumerate() {
        let mut seeds = RecordedSeed {
            seed: entry.seed,
            missing: false,
        };
        state = reduce_with_seeds(&state, &entry.action, &mut seeds);
        if seeds.missing {
            return Err(TranscriptError::MissingSeed { step });
        }

        let computed = state.compute_hash();
        if computed != entry.state_hash {
            return Err(TranscriptError::HashMismatch {
                step,
                expected: entry.state_hash,
                computed,
            });
        }
    }

    debug!(steps = transcript.entries.len(), "transcript verified");

    Ok(VerifiedReplay {
        final_hash: state.compute_hash(),
        final_state: state,
        steps: transcript.entries.len(),
    })
}

/// Replay a transcript without checking hashes.
///
/// Useful for inspecting where a corrupted transcript leads. Recorded seeds
/// are still injected; a missing one replays as seed 0.
pub fn replay_states(transcript: &GameTranscript) -> Vec<GameState> {
    let mut states = Vec::with_capacity(transcript.entries.len() + 1);
    let mut state = transcript.initial_state.clone();
    states.push(state.clone());
    for entry in &transcript.entries {
        let mut seeds = RecordedSeed {
            seed: entry.seed,
            missing: false,
        };
        state = reduce_with_seeds(&state, &entry.action, &mut seeds);
        states.push(state.clone());
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::FixedSeedSource;
    use crate::game::action::GameAction;
    use crate::game::category::Category;
    use crate::game::setup::SetupPatch;
    use crate::game::state::Phase;

    fn categories() -> Vec<Category> {
        vec![Category::new("Animals", ["Lion", "Owl", "Zebra", "Penguin"])]
    }

    /// Record a short game the way a session would.
    fn record(actions: &[GameAction], source_seed: u32) -> GameTranscript {
        let mut state = GameState::new();
        let mut transcript = GameTranscript::new(state.clone());
        for action in actions {
            let drawing = matches!(action, GameAction::GameStart { .. })
                && state.phase == Phase::Setup
                && state.setup.seed.is_none();
            state = reduce_with_seeds(&state, action, &mut FixedSeedSource(source_seed));
            let seed = (drawing && state.phase == Phase::Reveal).then_some(state.seed);
            transcript.record(action.clone(), seed, &state);
        }
        transcript
    }

    fn script() -> Vec<GameAction> {
        let mut actions = vec![
            GameAction::SetupUpdate(SetupPatch::categories(["Animals"])),
            GameAction::SetupUpdate(SetupPatch::counts(4, 1)),
            GameAction::GameStart { categories: categories() },
        ];
        actions.extend(std::iter::repeat(GameAction::RevealNext).take(4));
        actions.push(GameAction::DiscussionStartVoting);
        actions.push(GameAction::vote(1, 2));
        actions.push(GameAction::VotingConfirmNext);
        actions
    }

    #[test]
    fn test_verify_valid_transcript() {
        let transcript = record(&script(), 4242);
        assert_eq!(transcript.entries[2].seed, Some(4242));

        let replay = verify_transcript(&transcript).unwrap();
        assert_eq!(replay.steps, script().len());
        assert_eq!(replay.final_hash, transcript.final_hash());
        assert_eq!(replay.final_state.phase, Phase::Voting);
        assert_eq!(replay.final_state.seed, 4242);
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = GameTranscript::new(GameState::new());
        let replay = verify_transcript(&transcript).unwrap();
        assert_eq!(replay.steps, 0);
        assert_eq!(replay.final_state, GameState::new());
    }

    #[test]
    fn test_tampered_hash_detected() {
        let mut transcript = record(&script(), 7);
        transcript.entries[5].state_hash = [0xab; 32];
        match verify_transcript(&transcript) {
            Err(TranscriptError::HashMismatch { step, expected, .. }) => {
                assert_eq!(step, 5);
                assert_eq!(expected, [0xab; 32]);
            }
            other => panic!("expected hash mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_tampered_seed_detected() {
        let mut transcript = record(&script(), 7);
        transcript.entries[2].seed = Some(8);
        assert!(matches!(
            verify_transcript(&transcript),
            Err(TranscriptError::HashMismatch { step: 2, .. })
        ));
    }

    #[test]
    fn test_missing_seed_detected() {
        let mut transcript = record(&script(), 7);
        transcript.entries[2].seed = None;
        assert!(matches!(
            verify_transcript(&transcript),
            Err(TranscriptError::MissingSeed { step: 2 })
        ));
    }

    #[test]
    fn test_tampered_initial_state_detected() {
        let mut transcript = record(&script(), 7);
        transcript.initial_state.setup.players = 9;
        assert!(matches!(
            verify_transcript(&transcript),
            Err(TranscriptError::InitialStateMismatch { .. })
        ));
    }

    #[test]
    fn test_pinned_seed_needs_no_record() {
        let mut actions = script();
        actions[0] = GameAction::SetupUpdate(SetupPatch::categories(["Animals"]).with_seed(5));
        let transcript = record(&actions, 999);
        assert_eq!(transcript.entries[2].seed, None);
        let replay = verify_transcript(&transcript).unwrap();
        assert_eq!(replay.final_state.seed, 5);
    }

    #[test]
    fn test_replay_states() {
        let transcript = record(&script(), 3);
        let states = replay_states(&transcript);
        assert_eq!(states.len(), transcript.len() + 1);
        assert_eq!(states[0], GameState::new());
        assert_eq!(states[3].phase, Phase::Reveal);
        assert_eq!(states.last().map(|s| s.compute_hash()), Some(transcript.final_hash()));
    }
}
