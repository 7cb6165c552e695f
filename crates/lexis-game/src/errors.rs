//! Game Errors
//!
//! Error types for loading game data and answering queries.

use lexis_rank::RankError;
use lexis_schedule::ScheduleError;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Game errors
#[derive(Error, Debug)]
pub enum GameError {
    /// A query arrived before `initialize()` succeeded
    #[error("Game service must be initialized before use")]
    NotInitialized,

    /// Data source is missing or inconsistent
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Failed to read a data file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a data file
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// History key is not a non-negative integer
    #[error("Invalid history day index: '{0}'")]
    InvalidHistoryKey(String),

    /// Caller supplied a bad argument
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested day is before day 0 or after today
    #[error("Day index {requested} is not available (current day is {current})")]
    DayOutOfRange { requested: i64, current: i64 },

    /// Scheduling error
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// Ranking error
    #[error(transparent)]
    Rank(#[from] RankError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GameError {
    /// Whether the error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GameError::InvalidParameter(_) | GameError::DayOutOfRange { .. }
        )
    }
}
