//! Game State Definitions
//!
//! The root [`GameState`] snapshot and everything it is built from.
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::hash::{compute_state_hash, StateHash};
use crate::game::setup::GameSetup;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Player seat number, `1..=players`.
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create from a seat number.
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Seat number.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// All seats of a game with `players` players, ascending.
    pub fn seats(players: u8) -> Vec<PlayerId> {
        (1..=players).map(PlayerId).collect()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

// =============================================================================
// ROLE
// =============================================================================

/// Secret role, fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Role {
    /// Knows the secret word.
    Civilian = 0,
    /// Sees nothing, or an alternate word.
    Imposter = 1,
}

/// What one player sees on their reveal card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleCard<'a> {
    /// The player's role.
    pub role: Role,
    /// The word shown, if any. `None` for an imposter who sees only their role.
    pub word: Option<&'a str>,
}

// =============================================================================
// PHASE
// =============================================================================

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Phase {
    /// Choosing categories and counts
    #[default]
    Setup = 0,
    /// Players view their cards one by one
    Reveal = 1,
    /// Open discussion between votes (elimination profile)
    Discussion = 2,
    /// Private ballots (elimination profile)
    Voting = 3,
    /// Fixed-length round running (timed profile)
    Timer = 4,
    /// Game over
    Result = 5,
}

// =============================================================================
// ROUND
// =============================================================================

/// Round bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Round counter, starts at 1
    pub number: u32,
    /// Players still in, ascending
    pub alive: Vec<PlayerId>,
    /// Players out, in elimination order
    pub eliminated: Vec<PlayerId>,
}

impl Default for Round {
    fn default() -> Self {
        Self {
            number: 1,
            alive: Vec::new(),
            eliminated: Vec::new(),
        }
    }
}

impl Round {
    /// First round with every player alive.
    pub fn opening(players: &[PlayerId]) -> Self {
        Self {
            number: 1,
            alive: players.to_vec(),
            eliminated: Vec::new(),
        }
    }

    /// Whether a player is still in.
    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.alive.contains(&id)
    }
}

// =============================================================================
// VOTING
// =============================================================================

/// A tie that triggered the single revote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tie {
    /// Players tied for most votes, ascending
    pub candidates: Vec<PlayerId>,
    /// Always true once a tie is recorded
    pub is_revote: bool,
}

/// Ballot collection for one voting round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingState {
    /// Voters in casting order (alive players at vote start, ascending)
    pub voter_order: Vec<PlayerId>,
    /// Index of the voter whose turn it is
    pub voter_index: usize,
    /// Ballots keyed by voter
    pub votes: BTreeMap<PlayerId, PlayerId>,
    /// Set once the first tie has happened
    pub tie: Option<Tie>,
}

impl VotingState {
    /// Fresh ballot box for the given alive players.
    pub fn open(alive: &[PlayerId]) -> Self {
        let mut voter_order = alive.to_vec();
        voter_order.sort_unstable();
        Self {
            voter_order,
            voter_index: 0,
            votes: BTreeMap::new(),
            tie: None,
        }
    }

    /// The voter whose turn it is.
    pub fn current_voter(&self) -> Option<PlayerId> {
        self.voter_order.get(self.voter_index).copied()
    }

    /// Whether the current vote is the revote.
    pub fn is_revote(&self) -> bool {
        self.tie.as_ref().is_some_and(|t| t.is_revote)
    }
}

/// Record of the most recent elimination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Elimination {
    /// Who went out
    pub eliminated: PlayerId,
    /// Votes received per target in the deciding ballot
    pub counts: BTreeMap<PlayerId, u32>,
    /// Whether the deciding ballot was still tied
    pub was_tie: bool,
    /// Whether the deciding ballot was the revote
    pub was_revote: bool,
}

// =============================================================================
// RESULT
// =============================================================================

/// Winning side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Winner {
    /// Civilians
    Civilians = 0,
    /// Imposters
    Imposters = 1,
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ResultReason {
    /// No imposter left alive
    AllImpostersEliminated = 0,
    /// Imposters alive >= civilians alive
    ImpostersEqualOrOutnumber = 1,
    /// Setup failed validation at start
    ConfigInvalid = 2,
    /// Timed round expired
    TimeUp = 3,
}

/// Final outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Winning side
    pub winner: Winner,
    /// Why
    pub reason: ResultReason,
}

impl GameResult {
    /// Result for a setup that failed validation.
    pub const CONFIG_INVALID: GameResult = GameResult {
        winner: Winner::Civilians,
        reason: ResultReason::ConfigInvalid,
    };

    /// Result when the timed round runs out.
    pub const TIME_UP: GameResult = GameResult {
        winner: Winner::Imposters,
        reason: ResultReason::TimeUp,
    };
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a game.
///
/// Owned by the caller and replaced wholesale on every transition; the
/// reducer never mutates a state it was handed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: Phase,
    /// Configuration (carried across resets)
    pub setup: GameSetup,
    /// Category the secret word came from
    pub category_name: String,
    /// Seed the game was dealt from
    pub seed: u32,
    /// Word shown to civilians
    pub secret_word: String,
    /// Word shown to imposters, if they get one
    pub imposter_word: Option<String>,
    /// Role per seat
    pub roles_by_player: BTreeMap<PlayerId, Role>,
    /// Order players view their cards
    pub reveal_order: Vec<PlayerId>,
    /// Index into `reveal_order`; equals its length once reveal is done
    pub reveal_index: usize,
    /// Round bookkeeping
    pub round: Round,
    /// Ballot box while voting
    pub voting: Option<VotingState>,
    /// Most recent elimination, shown during discussion
    pub last_elimination: Option<Elimination>,
    /// Set once the game is over
    pub result: Option<GameResult>,
}

impl GameState {
    /// Fresh state in `Setup` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state in `Setup` with the given configuration.
    pub fn with_setup(setup: GameSetup) -> Self {
        Self {
            setup,
            ..Self::default()
        }
    }

    /// Role of a seat, if dealt.
    pub fn role_of(&self, id: PlayerId) -> Option<Role> {
        self.roles_by_player.get(&id).copied()
    }

    /// Reveal card for a seat, if dealt.
    pub fn card_for(&self, id: PlayerId) -> Option<RoleCard<'_>> {
        let role = self.role_of(id)?;
        let word = match role {
            Role::Civilian => Some(self.secret_word.as_str()),
            Role::Imposter => self.imposter_word.as_deref(),
        };
        Some(RoleCard { role, word })
    }

    /// Word a seat sees, if any.
    pub fn word_for(&self, id: PlayerId) -> Option<&str> {
        self.card_for(id)?.word
    }

    /// Player whose card is up, while revealing.
    pub fn current_reveal_player(&self) -> Option<PlayerId> {
        if self.phase != Phase::Reveal {
            return None;
        }
        self.reveal_order.get(self.reveal_index).copied()
    }

    /// Voter whose turn it is, while voting.
    pub fn current_voter(&self) -> Option<PlayerId> {
        if self.phase != Phase::Voting {
            return None;
        }
        self.voting.as_ref()?.current_voter()
    }

    /// Targets the current voter should be offered.
    ///
    /// Alive players other than the voter; during the revote, only the tied
    /// candidates. The reducer itself accepts any alive non-self target.
    pub fn eligible_targets(&self) -> Vec<PlayerId> {
        let Some(voting) = self.voting.as_ref().filter(|_| self.phase == Phase::Voting) else {
            return Vec::new();
        };
        let voter = voting.current_voter();
        self.round
            .alive
            .iter()
            .copied()
            .filter(|p| Some(*p) != voter)
            .filter(|p| voting.tie.as_ref().map_or(true, |t| t.candidates.contains(p)))
            .collect()
    }

    /// Imposters still alive.
    pub fn imposters_alive(&self) -> usize {
        self.round
            .alive
            .iter()
            .filter(|p| self.role_of(**p) == Some(Role::Imposter))
            .count()
    }

    /// Civilians still alive.
    pub fn civilians_alive(&self) -> usize {
        self.round.alive.len() - self.imposters_alive()
    }

    /// Seats dealt the imposter role, ascending.
    pub fn imposters(&self) -> Vec<PlayerId> {
        self.roles_by_player
            .iter()
            .filter(|(_, r)| **r == Role::Imposter)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Check if the game has ended.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Result
    }

    /// Compute hash of current state for verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.seed, |hasher| {
            hasher.update_u8(self.phase as u8);
            self.setup.hash_into(hasher);

            hasher.update_str(&self.category_name);
            hasher.update_str(&self.secret_word);
            hasher.update_opt_str(self.imposter_word.as_deref());

            // Roles in seat order (BTreeMap guarantees this)
            hasher.update_len(self.roles_by_player.len());
            for (player, role) in &self.roles_by_player {
                hasher.update_u8(player.0);
                hasher.update_u8(*role as u8);
            }

            hasher.update_len(self.reveal_order.len());
            for player in &self.reveal_order {
                hasher.update_u8(player.0);
            }
            hasher.update_len(self.reveal_index);

            hasher.update_u32(self.round.number);
            hasher.update_len(self.round.alive.len());
            for player in &self.round.alive {
                hasher.update_u8(player.0);
            }
            hasher.update_len(self.round.eliminated.len());
            for player in &self.round.eliminated {
                hasher.update_u8(player.0);
            }

            match &self.voting {
                Some(voting) => {
                    hasher.update_bool(true);
                    hasher.update_len(voting.voter_order.len());
                    for player in &voting.voter_order {
                        hasher.update_u8(player.0);
                    }
                    hasher.update_len(voting.voter_index);
                    hasher.update_len(voting.votes.len());
                    for (voter, target) in &voting.votes {
                        hasher.update_u8(voter.0);
                        hasher.update_u8(target.0);
                    }
                    match &voting.tie {
                        Some(tie) => {
                            hasher.update_bool(true);
                            hasher.update_len(tie.candidates.len());
                            for player in &tie.candidates {
                                hasher.update_u8(player.0);
                            }
                            hasher.update_bool(tie.is_revote);
                        }
                        None => hasher.update_bool(false),
                    }
                }
                None => hasher.update_bool(false),
            }

            match &self.last_elimination {
                Some(e) => {
                    hasher.update_bool(true);
                    hasher.update_u8(e.eliminated.0);
                    hasher.update_len(e.counts.len());
                    for (player, count) in &e.counts {
                        hasher.update_u8(player.0);
                        hasher.update_u32(*count);
                    }
                    hasher.update_bool(e.was_tie);
                    hasher.update_bool(e.was_revote);
                }
                None => hasher.update_bool(false),
            }

            match self.result {
                Some(result) => {
                    hasher.update_bool(true);
                    hasher.update_u8(result.winner as u8);
                    hasher.update_u8(result.reason as u8);
                }
                None => hasher.update_bool(false),
            }
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
