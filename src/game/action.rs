//! Engine Actions
//!
//! The closed set of inputs the reducer accepts. Externally tagged so the
//! same values encode to JSON for debugging and to bincode for transcripts.

use serde::{Deserialize, Serialize};

use crate::game::category::Category;
use crate::game::setup::SetupPatch;
use crate::game::state::PlayerId;

/// Everything a caller can do to a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameAction {
    /// Merge partial setup fields.
    SetupUpdate(SetupPatch),
    /// Start a game from the current setup against these categories.
    GameStart {
        /// Categories available to the selection.
        categories: Vec<Category>,
    },
    /// The current player has seen their card.
    RevealNext,
    /// Open a ballot box.
    DiscussionStartVoting,
    /// Record a private ballot.
    VoteCast {
        /// Who is voting.
        voter: PlayerId,
        /// Who they vote out.
        target: PlayerId,
    },
    /// Confirm the current ballot and move on.
    VotingConfirmNext,
    /// Bump the round counter without voting.
    RoundContinue,
    /// The timed round ran out.
    TimerEnd,
    /// Back to setup, keeping the configuration.
    GameReset,
}

impl GameAction {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::SetupUpdate(_) => "SETUP_UPDATE",
            GameAction::GameStart { .. } => "GAME_START",
            GameAction::RevealNext => "REVEAL_NEXT",
            GameAction::DiscussionStartVoting => "DISCUSSION_START_VOTING",
            GameAction::VoteCast { .. } => "VOTE_CAST",
            GameAction::VotingConfirmNext => "VOTING_CONFIRM_NEXT",
            GameAction::RoundContinue => "ROUND_CONTINUE",
            GameAction::TimerEnd => "TIMER_END",
            GameAction::GameReset => "GAME_RESET",
        }
    }

    /// Shorthand for a vote.
    pub fn vote(voter: u8, target: u8) -> Self {
        GameAction::VoteCast {
            voter: PlayerId(voter),
            target: PlayerId(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&GameAction::RevealNext).unwrap();
        assert_eq!(json, "\"REVEAL_NEXT\"");

        let json = serde_json::to_string(&GameAction::vote(1, 2)).unwrap();
        assert_eq!(json, r#"{"VOTE_CAST":{"voter":1,"target":2}}"#);
    }

    #[test]
    fn test_bincode_roundtrip() {
        let actions = vec![
            GameAction::SetupUpdate(SetupPatch::counts(4, 1).with_seed(7)),
            GameAction::GameStart {
                categories: vec![Category::new("X", ["apple"])],
            },
            GameAction::vote(3, 1),
            GameAction::GameReset,
        ];
        let bytes = bincode::serialize(&actions).unwrap();
        let back: Vec<GameAction> = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, actions);
    }

    #[test]
    fn test_names() {
        assert_eq!(GameAction::TimerEnd.name(), "TIMER_END");
        assert_eq!(GameAction::vote(1, 2).name(), "VOTE_CAST");
    }
}
