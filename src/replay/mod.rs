//! Replay and Verification
//!
//! Every game is a pure function of its initial state, its action list and
//! the seeds drawn at start. Recording those is enough to rebuild the game
//! and prove no step was altered.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    REPLAY                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  transcript.rs   - Action log with per-step state hashes    │
//! │  verify.rs       - Verification by replay                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod transcript;
pub mod verify;

// Re-export key types
pub use transcript::{GameTranscript, TranscriptEntry, TranscriptError, TRANSCRIPT_VERSION};
pub use verify::{replay_states, verify_transcript, VerifiedReplay};
