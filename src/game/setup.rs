//! Game Setup and Validation
//!
//! The user-editable configuration, the patch type used to edit it, and the
//! pure validator that turns it into counts the dealer can trust.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::StateHasher;
use crate::game::category::Category;

/// Fewest players a game can seat.
pub const MIN_PLAYERS: i32 = 3;
/// Most players a game can seat.
pub const MAX_PLAYERS: i32 = 12;
/// Fewest imposters.
pub const MIN_IMPOSTERS: i32 = 1;
/// Most imposters.
pub const MAX_IMPOSTERS: i32 = 3;

/// Which post-reveal flow the game runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum GameMode {
    /// Discussion and voting rounds until one side wins.
    #[default]
    Elimination = 0,
    /// A single fixed-length round ended by the clock.
    Timed = 1,
}

/// User-editable game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSetup {
    /// Selected category names; one is drawn at start.
    pub category_names: Vec<String>,
    /// Requested player count (clamped at start).
    pub players: i32,
    /// Requested imposter count (clamped at start).
    pub imposters: i32,
    /// Imposters see only their role, not an alternate word.
    pub imposter_sees_imposter_only: bool,
    /// Pinned seed for reproducible games.
    pub seed: Option<u32>,
    /// Post-reveal flow.
    pub mode: GameMode,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            category_names: Vec::new(),
            players: 5,
            imposters: 1,
            imposter_sees_imposter_only: true,
            seed: None,
            mode: GameMode::Elimination,
        }
    }
}

impl GameSetup {
    /// Merge a patch, field by field.
    pub fn merged(&self, patch: &SetupPatch) -> Self {
        Self {
            category_names: patch
                .category_names
                .clone()
                .unwrap_or_else(|| self.category_names.clone()),
            players: patch.players.unwrap_or(self.players),
            imposters: patch.imposters.unwrap_or(self.imposters),
            imposter_sees_imposter_only: patch
                .imposter_sees_imposter_only
                .unwrap_or(self.imposter_sees_imposter_only),
            seed: patch.seed.or(self.seed),
            mode: patch.mode.unwrap_or(self.mode),
        }
    }

    /// Setup carried into the next game after a reset.
    ///
    /// Keeps categories, counts, the imposter-word option and the mode;
    /// drops any pinned seed.
    pub fn carried_forward(&self) -> Self {
        Self {
            category_names: self.category_names.clone(),
            players: self.players,
            imposters: self.imposters,
            imposter_sees_imposter_only: self.imposter_sees_imposter_only,
            seed: None,
            mode: self.mode,
        }
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_len(self.category_names.len());
        for name in &self.category_names {
            hasher.update_str(name);
        }
        hasher.update_i32(self.players);
        hasher.update_i32(self.imposters);
        hasher.update_bool(self.imposter_sees_imposter_only);
        match self.seed {
            Some(seed) => {
                hasher.update_bool(true);
                hasher.update_u32(seed);
            }
            None => hasher.update_bool(false),
        }
        hasher.update_u8(self.mode as u8);
    }
}

/// Partial setup update; `None` fields are left as they are.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPatch {
    /// Replace the category selection.
    pub category_names: Option<Vec<String>>,
    /// Replace the player count.
    pub players: Option<i32>,
    /// Replace the imposter count.
    pub imposters: Option<i32>,
    /// Replace the imposter-word option.
    pub imposter_sees_imposter_only: Option<bool>,
    /// Pin a seed.
    pub seed: Option<u32>,
    /// Switch mode.
    pub mode: Option<GameMode>,
}

impl SetupPatch {
    /// Patch selecting categories.
    pub fn categories<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category_names: Some(names.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Patch setting both counts.
    pub fn counts(players: i32, imposters: i32) -> Self {
        Self {
            players: Some(players),
            imposters: Some(imposters),
            ..Self::default()
        }
    }

    /// Add a pinned seed to this patch.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Add a mode switch to this patch.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Why a setup cannot start a game.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupRejection {
    /// Nothing selected, or no selected name is available.
    #[error("no selected category is available")]
    CategoryNotFound,
    /// Imposters would not be a strict minority of seats.
    #[error("imposters must be fewer than players")]
    BadCounts,
    /// Every selected category is empty.
    #[error("selected categories contain no words")]
    NoWords,
}

/// A setup that passed validation, with counts clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedSetup {
    /// Selected categories that have at least one word, in availability order.
    pub categories: Vec<Category>,
    /// Clamped player count.
    pub players: u8,
    /// Clamped imposter count, always below `players`.
    pub imposters: u8,
}

/// Clamp a requested count into `[min, max]`.
pub fn clamp_count(value: i32, min: i32, max: i32) -> i32 {
    value.clamp(min, max)
}

/// Check a setup against the available categories.
///
/// Rules apply in order: category selection, count clamping, count
/// relationship, word availability. Pure.
pub fn validate_setup(
    setup: &GameSetup,
    available: &[Category],
) -> Result<ValidatedSetup, SetupRejection> {
    let selected: Vec<&str> = setup
        .category_names
        .iter()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
        .collect();
    if selected.is_empty() {
        return Err(SetupRejection::CategoryNotFound);
    }

    let matched: Vec<&Category> = available
        .iter()
        .filter(|c| selected.contains(&c.name.as_str()))
        .collect();
    if matched.is_empty() {
        return Err(SetupRejection::CategoryNotFound);
    }

    let players = clamp_count(setup.players, MIN_PLAYERS, MAX_PLAYERS);
    let imposters = clamp_count(setup.imposters, MIN_IMPOSTERS, MAX_IMPOSTERS);
    if imposters >= players {
        return Err(SetupRejection::BadCounts);
    }

    let categories: Vec<Category> = matched
        .into_iter()
        .filter(|c| c.has_words())
        .cloned()
        .collect();
    if categories.is_empty() {
        return Err(SetupRejection::NoWords);
    }

    // Both counts are inside [1, 12] here
    Ok(ValidatedSetup {
        categories,
        players: players as u8,
        imposters: imposters as u8,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("Animals", ["Lion", "Owl"]),
            Category::new("Empty", Vec::<String>::new()),
        ]
    }

    fn setup(names: &[&str], players: i32, imposters: i32) -> GameSetup {
        GameSetup {
            category_names: names.iter().map(|s| s.to_string()).collect(),
            players,
            imposters,
            ..GameSetup::default()
        }
    }

    #[test]
    fn test_empty_selection_rejected() {
        let result = validate_setup(&setup(&[], 5, 1), &categories());
        assert_eq!(result, Err(SetupRejection::CategoryNotFound));

        let result = validate_setup(&setup(&[""], 5, 1), &categories());
        assert_eq!(result, Err(SetupRejection::CategoryNotFound));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = validate_setup(&setup(&["Sports"], 5, 1), &categories());
        assert_eq!(result, Err(SetupRejection::CategoryNotFound));
    }

    #[test]
    fn test_category_match_is_exact() {
        let result = validate_setup(&setup(&["animals"], 5, 1), &categories());
        assert_eq!(result, Err(SetupRejection::CategoryNotFound));
    }

    #[test]
    fn test_counts_are_clamped() {
        let v = validate_setup(&setup(&["Animals"], 40, 9), &categories()).unwrap();
        assert_eq!((v.players, v.imposters), (12, 3));

        let v = validate_setup(&setup(&["Animals"], -4, 0), &categories()).unwrap();
        assert_eq!((v.players, v.imposters), (3, 1));
    }

    #[test]
    fn test_bad_counts() {
        // 3 players, 3 imposters survives clamping but is not a minority
        let result = validate_setup(&setup(&["Animals"], 3, 3), &categories());
        assert_eq!(result, Err(SetupRejection::BadCounts));

        assert!(validate_setup(&setup(&["Animals"], 4, 3), &categories()).is_ok());
    }

    #[test]
    fn test_no_words() {
        let result = validate_setup(&setup(&["Empty"], 5, 1), &categories());
        assert_eq!(result, Err(SetupRejection::NoWords));
    }

    #[test]
    fn test_empty_categories_are_dropped() {
        let v = validate_setup(&setup(&["Empty", "Animals"], 5, 1), &categories()).unwrap();
        assert_eq!(v.categories.len(), 1);
        assert_eq!(v.categories[0].name, "Animals");
    }

    #[test]
    fn test_rule_order() {
        // Category failure wins over count failure
        let result = validate_setup(&setup(&["Nope"], 3, 3), &categories());
        assert_eq!(result, Err(SetupRejection::CategoryNotFound));

        // Count failure wins over word failure
        let result = validate_setup(&setup(&["Empty"], 3, 3), &categories());
        assert_eq!(result, Err(SetupRejection::BadCounts));
    }

    #[test]
    fn test_patch_merge() {
        let base = GameSetup::default();
        let merged = base.merged(&SetupPatch::counts(8, 2).with_seed(99));
        assert_eq!(merged.players, 8);
        assert_eq!(merged.imposters, 2);
        assert_eq!(merged.seed, Some(99));
        assert!(merged.imposter_sees_imposter_only);

        let merged = merged.merged(&SetupPatch::categories(["Food"]).with_mode(GameMode::Timed));
        assert_eq!(merged.category_names, vec!["Food"]);
        assert_eq!(merged.players, 8);
        assert_eq!(merged.mode, GameMode::Timed);
    }

    #[test]
    fn test_carried_forward_drops_seed() {
        let setup = GameSetup {
            seed: Some(5),
            mode: GameMode::Timed,
            players: 7,
            ..GameSetup::default()
        };
        let next = setup.carried_forward();
        assert_eq!(next.seed, None);
        assert_eq!(next.players, 7);
        assert_eq!(next.mode, GameMode::Timed);
    }
}
