//! Schedule Errors
//!
//! Error types for pool rotation and daily scheduling.

use lexis_core::LcgError;
use thiserror::Error;

/// Result type for scheduling operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Scheduling errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Requested a pool word but the pool is empty
    #[error("No words available in active pool for day {day_index}")]
    EmptyPool { day_index: i64 },

    /// LCG parameters could not be built for the pool
    #[error("LCG error: {0}")]
    Lcg(#[from] LcgError),
}
