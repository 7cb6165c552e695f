//! Game Configuration
//!
//! Configuration types and defaults for the game service.

use chrono::{DateTime, Utc};
use lexis_rank::{DEFAULT_CACHE_CAPACITY, DEFAULT_HINT_CEILING};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clock::default_epoch;

/// Accepted values for `log_level`
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding words.json, targets.json and vectors.bin
    pub data_dir: PathBuf,

    /// Directories tried in order when `data_dir` does not exist
    pub fallback_data_dirs: Vec<PathBuf>,

    /// Instant at which day 0 starts
    pub epoch: DateTime<Utc>,

    /// Number of daily rankings kept in memory
    pub ranking_cache_capacity: usize,

    /// Default length of top-word listings
    pub top_words_count: usize,

    /// Highest rank a hint may reveal
    pub hint_rank_ceiling: usize,

    /// Log level
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fallback_data_dirs: vec![PathBuf::from("src/data"), PathBuf::from("public/data")],
            epoch: default_epoch(),
            ranking_cache_capacity: DEFAULT_CACHE_CAPACITY,
            top_words_count: 100,
            hint_rank_ceiling: DEFAULT_HINT_CEILING,
            log_level: "info".to_string(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration builder
    pub fn builder() -> GameConfigBuilder {
        GameConfigBuilder::default()
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))
    }

    /// Primary data directory followed by the fallbacks
    pub fn data_dir_candidates(&self) -> Vec<PathBuf> {
        std::iter::once(self.data_dir.clone())
            .chain(self.fallback_data_dirs.iter().cloned())
            .collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("data_dir cannot be empty".into()));
        }

        if self.ranking_cache_capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "ranking_cache_capacity must be at least 1".into(),
            ));
        }

        if self.top_words_count == 0 {
            return Err(ConfigError::InvalidValue("top_words_count cannot be 0".into()));
        }

        if self.hint_rank_ceiling < 2 {
            return Err(ConfigError::InvalidValue(
                "hint_rank_ceiling must be at least 2".into(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue(format!(
                "log_level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration builder
#[derive(Default)]
pub struct GameConfigBuilder {
    config: GameConfig,
}

impl GameConfigBuilder {
    /// Set data directory
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.data_dir = dir.into();
        self
    }

    /// Set fallback data directories
    pub fn fallback_data_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.config.fallback_data_dirs = dirs;
        self
    }

    /// Set the day 0 instant
    pub fn epoch(mut self, epoch: DateTime<Utc>) -> Self {
        self.config.epoch = epoch;
        self
    }

    /// Set ranking cache capacity
    pub fn ranking_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.ranking_cache_capacity = capacity;
        self
    }

    /// Set default top-words count
    pub fn top_words_count(mut self, count: usize) -> Self {
        self.config.top_words_count = count;
        self
    }

    /// Set hint ceiling
    pub fn hint_rank_ceiling(mut self, ceiling: usize) -> Self {
        self.config.hint_rank_ceiling = ceiling;
        self
    }

    /// Set log level
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.config.log_level = level.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<GameConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
