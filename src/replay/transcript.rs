//! Game Transcript Recording
//!
//! Records everything needed to replay a game and check it step by step:
//! the starting state, every action in order, any seed drawn from outside
//! the setup, and the state hash after each action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::hash::StateHash;
use crate::game::action::GameAction;
use crate::game::state::GameState;

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u8 = 1;

/// One recorded transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Action that was applied.
    pub action: GameAction,

    /// Seed drawn for this action, when a game started without a pinned seed.
    pub seed: Option<u32>,

    /// State hash after the action.
    pub state_hash: StateHash,
}

/// Complete record of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTranscript {
    /// Version for forward compatibility.
    pub version: u8,

    /// Unique game identifier.
    pub game_id: Uuid,

    /// Wall-clock time the session opened. Informational only.
    pub started_at: DateTime<Utc>,

    /// State the first action was applied to.
    pub initial_state: GameState,

    /// Hash of `initial_state`.
    pub initial_hash: StateHash,

    /// Transitions in order.
    pub entries: Vec<TranscriptEntry>,
}

impl GameTranscript {
    /// Open a transcript starting from `initial_state`.
    pub fn new(initial_state: GameState) -> Self {
        Self {
            version: TRANSCRIPT_VERSION,
            game_id: Uuid::new_v4(),
            started_at: Utc::now(),
            initial_hash: initial_state.compute_hash(),
            initial_state,
            entries: Vec::new(),
        }
    }

    /// Record an applied action and the state it produced.
    pub fn record(&mut self, action: GameAction, seed: Option<u32>, state: &GameState) {
        self.entries.push(TranscriptEntry {
            action,
            seed,
            state_hash: state.compute_hash(),
        });
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no action has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hash of the latest recorded state.
    pub fn final_hash(&self) -> StateHash {
        self.entries
            .last()
            .map_or(self.initial_hash, |e| e.state_hash)
    }

    /// Serialize to bytes using bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TranscriptError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from bytes, rejecting other versions.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TranscriptError> {
        let transcript: Self = bincode::deserialize(data)?;
        transcript.check_version()?;
        Ok(transcript)
    }

    /// Pretty JSON, for inspection.
    pub fn to_json(&self) -> Result<String, TranscriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, TranscriptError> {
        let transcript: Self = serde_json::from_str(json)?;
        transcript.check_version()?;
        Ok(transcript)
    }

    /// Fail unless this transcript has the current version.
    pub fn check_version(&self) -> Result<(), TranscriptError> {
        if self.version != TRANSCRIPT_VERSION {
            return Err(TranscriptError::VersionMismatch {
                expected: TRANSCRIPT_VERSION,
                got: self.version,
            });
        }
        Ok(())
    }
}

/// Errors that can occur with transcripts.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// Binary encoding failed.
    #[error("binary codec failed: {0}")]
    Binary(#[from] bincode::Error),

    /// JSON encoding failed.
    #[error("json codec failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Version mismatch.
    #[error("version mismatch: expected {expected}, got {got}")]
    VersionMismatch {
        /// Version this build reads.
        expected: u8,
        /// Version found.
        got: u8,
    },

    /// The recorded initial hash does not match the recorded initial state.
    #[error("initial state hash mismatch: expected {}, computed {}", hex::encode(.expected), hex::encode(.computed))]
    InitialStateMismatch {
        /// Recorded hash.
        expected: StateHash,
        /// Hash of the recorded state.
        computed: StateHash,
    },

    /// A replayed step produced a different state.
    #[error("state hash mismatch at step {step}: expected {}, computed {}", hex::encode(.expected), hex::encode(.computed))]
    HashMismatch {
        /// Zero-based entry index.
        step: usize,
        /// Recorded hash.
        expected: StateHash,
        /// Hash from replay.
        computed: StateHash,
    },

    /// A game started without a pinned seed and the entry has none recorded.
    #[error("step {step} needs a seed but none was recorded")]
    MissingSeed {
        /// Zero-based entry index.
        step: usize,
    },
}
