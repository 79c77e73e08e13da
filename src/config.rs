//! Engine configuration structures and loaders.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::game::category::{CategoryError, CategorySet};
use crate::game::setup::GameSetup;
use crate::game::state::GameState;

/// Length of a timed round when nothing overrides it (five minutes).
pub const DEFAULT_ROUND_SECONDS: u64 = 300;

/// Host-side settings around the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// `tracing` filter directive used when no env filter is set.
    pub log_filter: String,
    /// Length of a timed round. The host runs the clock and sends `TIMER_END`.
    pub round_duration: Duration,
    /// Player count a fresh setup starts with.
    pub default_players: i32,
    /// Imposter count a fresh setup starts with.
    pub default_imposters: i32,
    /// Word list document to load instead of the bundled categories.
    pub categories_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let setup = GameSetup::default();
        Self {
            log_filter: "info".to_string(),
            round_duration: Duration::from_secs(DEFAULT_ROUND_SECONDS),
            default_players: setup.players,
            default_imposters: setup.imposters,
            categories_path: None,
        }
    }
}

impl EngineConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `IMPOSTER_LOG`
    /// - `IMPOSTER_ROUND_SECONDS`
    /// - `IMPOSTER_PLAYERS` / `IMPOSTER_IMPOSTERS`
    /// - `IMPOSTER_CATEGORIES`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construct configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(filter) = lookup("IMPOSTER_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(seconds) = read_number::<u64, _>(&lookup, "IMPOSTER_ROUND_SECONDS")? {
            config.round_duration = Duration::from_secs(seconds.max(1));
        }
        if let Some(players) = read_number::<i32, _>(&lookup, "IMPOSTER_PLAYERS")? {
            config.default_players = players;
        }
        if let Some(imposters) = read_number::<i32, _>(&lookup, "IMPOSTER_IMPOSTERS")? {
            config.default_imposters = imposters;
        }
        if let Some(path) = lookup("IMPOSTER_CATEGORIES").filter(|p| !p.trim().is_empty()) {
            config.categories_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Setup a fresh game starts from.
    pub fn initial_setup(&self) -> GameSetup {
        GameSetup {
            players: self.default_players,
            imposters: self.default_imposters,
            ..GameSetup::default()
        }
    }

    /// State a fresh session starts from.
    pub fn initial_state(&self) -> GameState {
        GameState::with_setup(self.initial_setup())
    }

    /// Load the configured word list, or the bundled one.
    pub fn load_categories(&self) -> Result<CategorySet, ConfigError> {
        let Some(path) = &self.categories_path else {
            return Ok(CategorySet::builtin());
        };
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(CategorySet::from_json(&json)?)
    }
}

fn read_number<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var: key, value: raw })
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{var} must be a number, got '{value}'")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
    /// The word list file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The word list file is malformed.
    #[error(transparent)]
    Categories(#[from] CategoryError),
}
