//! Voting Resolver
//!
//! Tallies a completed ballot box and decides between an elimination and the
//! single permitted revote.

use std::collections::BTreeMap;

use crate::game::state::{Elimination, PlayerId, Tie, VotingState};

/// What a completed ballot box resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoteResolution {
    /// First tie of this vote: ballot again among the tied candidates.
    Revote(Tie),
    /// Someone goes out.
    Eliminate(Elimination),
    /// No ballots were cast; nothing to resolve.
    NoVotes,
}

/// Count votes received per target.
pub fn tally(votes: &BTreeMap<PlayerId, PlayerId>) -> BTreeMap<PlayerId, u32> {
    let mut counts = BTreeMap::new();
    for target in votes.values() {
        *counts.entry(*target).or_insert(0) += 1;
    }
    counts
}

/// Targets sharing the highest count, ascending.
pub fn top_candidates(counts: &BTreeMap<PlayerId, u32>) -> Vec<PlayerId> {
    let Some(max) = counts.values().copied().max() else {
        return Vec::new();
    };
    // BTreeMap iteration keeps the result ascending
    counts
        .iter()
        .filter(|(_, c)| **c == max)
        .map(|(p, _)| *p)
        .collect()
}

/// Resolve a ballot box once every voter has cast.
///
/// A unique leader is eliminated. The first tie starts a revote. A tie on
/// the revote eliminates the lowest-numbered candidate, so a vote never
/// needs more than two ballots.
pub fn resolve(voting: &VotingState) -> VoteResolution {
    let counts = tally(&voting.votes);
    let candidates = top_candidates(&counts);

    let Some(&lowest) = candidates.first() else {
        return VoteResolution::NoVotes;
    };
    let is_tie = candidates.len() > 1;

    if is_tie && voting.tie.is_none() {
        return VoteResolution::Revote(Tie {
            candidates,
            is_revote: true,
        });
    }

    VoteResolution::Eliminate(Elimination {
        eliminated: lowest,
        counts,
        was_tie: is_tie,
        was_revote: voting.is_revote(),
    })
}
