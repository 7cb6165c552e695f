//! Daily Secret Scheduler
//!
//! Maps a day index to exactly one word.
//!
//! ## How It Works
//!
//! History days return their pinned word. Every other day is mapped to a
//! pool slot with the direct LCG `((A·day + B) mod N + N) mod N`, where N is
//! the pool size and (A, B) come from [`find_optimal_params`]. Because
//! gcd(A, N) = 1 the mapping is a bijection over any N consecutive days, and
//! because A mod N ≠ 1 tomorrow's word is not simply the next pool entry.

use lexis_core::{find_optimal_params, LcgParams};
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ScheduleResult;
use crate::pool::{WordPool, WordSource};

/// A day's secret word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySecret {
    /// Day index the word belongs to
    pub day_index: i64,
    /// The secret word
    pub word: String,
    /// Whether it came from history or the pool
    pub source: WordSource,
}

/// Deterministic day → word scheduler
///
/// Owns the pool and the LCG parameters computed for it. Both are fixed for
/// the scheduler's lifetime.
#[derive(Debug, Clone)]
pub struct DailyScheduler {
    /// History and active pool
    pool: WordPool,
    /// Present when the pool holds at least two words
    params: Option<LcgParams>,
}

impl DailyScheduler {
    /// Create a scheduler, computing LCG parameters for the pool size
    pub fn new(pool: WordPool) -> ScheduleResult<Self> {
        let pool_size = pool.remaining_pool_count() as u64;

        // A pool of 0 or 1 words has a single possible mapping
        let params = if pool_size > 1 {
            Some(find_optimal_params(pool_size)?)
        } else {
            None
        };

        match &params {
            Some(p) => info!(
                pool_size,
                history = pool.history_count(),
                multiplier = p.multiplier(),
                increment = p.increment(),
                "daily scheduler ready"
            ),
            None => info!(
                pool_size,
                history = pool.history_count(),
                "daily scheduler ready without rotation"
            ),
        }

        Ok(Self { pool, params })
    }

    /// The underlying pool
    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    /// LCG parameters, if the pool is large enough to rotate
    pub fn params(&self) -> Option<&LcgParams> {
        self.params.as_ref()
    }

    /// Pool slot for a day, or `None` when no rotation applies
    ///
    /// History days and pools of fewer than two words have no slot.
    pub fn pool_slot(&self, day_index: i64) -> Option<u64> {
        if self.pool.is_in_history(day_index) {
            return None;
        }
        self.params.as_ref().map(|p| p.slot(day_index))
    }

    /// Secret word for a day
    ///
    /// # Errors
    /// `EmptyPool` when the day is not in history and the pool is empty
    pub fn secret_for_day(&self, day_index: i64) -> ScheduleResult<DailySecret> {
        let slot = self.pool_slot(day_index).unwrap_or(0);
        let rotation = self.pool.word_for_day(day_index, slot)?;

        debug!(day_index, slot, source = ?rotation.source, "resolved daily secret");

        Ok(DailySecret {
            day_index,
            word: rotation.word.to_string(),
            source: rotation.source,
        })
    }

    /// Secrets for `count` consecutive days starting at `start`
    pub fn preview(&self, start: i64, count: usize) -> ScheduleResult<Vec<DailySecret>> {
        (0..count as i64)
            .map(|offset| self.secret_for_day(start + offset))
            .collect()
    }
}
