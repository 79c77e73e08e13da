//! Round Initializer
//!
//! Turns a validated setup and a seeded RNG into the category, words, roles
//! and reveal order of a new game. Draw order is part of the replay contract:
//! category, reveal shuffle, imposter shuffle, secret word, imposter word.

use std::collections::BTreeMap;

use crate::core::rng::DeterministicRng;
use crate::game::category::Category;
use crate::game::setup::ValidatedSetup;
use crate::game::state::{PlayerId, Role};

/// Everything dealt at game start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// Category drawn from the selection
    pub category_name: String,
    /// Word civilians see
    pub secret_word: String,
    /// Word imposters see, if any
    pub imposter_word: Option<String>,
    /// Role per seat
    pub roles_by_player: BTreeMap<PlayerId, Role>,
    /// Card viewing order
    pub reveal_order: Vec<PlayerId>,
    /// All seats, ascending
    pub players: Vec<PlayerId>,
}

/// Deal a new game.
///
/// `setup.categories` must be non-empty and every entry must have a word,
/// which [`validate_setup`](crate::game::setup::validate_setup) guarantees.
/// Returns `None` otherwise.
pub fn deal(
    setup: &ValidatedSetup,
    imposter_sees_imposter_only: bool,
    rng: &mut DeterministicRng,
) -> Option<Deal> {
    let category = rng.sample(&setup.categories)?;

    let players = PlayerId::seats(setup.players);
    let reveal_order = rng.shuffled(&players);

    // Independent draw; reusing reveal_order would leak roles through order
    let imposter_pool = rng.shuffled(&players);
    let imposters = &imposter_pool[..setup.imposters as usize];

    let roles_by_player = players
        .iter()
        .map(|p| {
            let role = if imposters.contains(p) {
                Role::Imposter
            } else {
                Role::Civilian
            };
            (*p, role)
        })
        .collect();

    let (secret, alternate) = pick_words(category, rng)?;

    Some(Deal {
        category_name: category.name.clone(),
        secret_word: secret,
        imposter_word: (!imposter_sees_imposter_only).then_some(alternate),
        roles_by_player,
        reveal_order,
        players,
    })
}

/// Pick the secret word and a distinct alternate.
///
/// A single-word category yields that word twice. Otherwise the alternate is
/// resampled until it differs from the secret; a list whose words all equal
/// the secret has no distinct alternate, so the secret is reused instead of
/// looping forever.
pub fn pick_words(category: &Category, rng: &mut DeterministicRng) -> Option<(String, String)> {
    let words = &category.words;
    if words.len() == 1 {
        return Some((words[0].clone(), words[0].clone()));
    }

    let secret = rng.sample(words)?.clone();
    if words.iter().all(|w| *w == secret) {
        return Some((secret.clone(), secret));
    }

    loop {
        let alternate = rng.sample(words)?;
        if *alternate != secret {
            return Some((secret, alternate.clone()));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
