//! Ranking Cache
//!
//! Keeps the rankings of the most recently used days.
//!
//! Finished rankings live in an LRU map bounded by the capacity. A day being
//! computed lives in a separate in-flight map that eviction never touches:
//! its slot sits behind its own mutex, the computation runs under that lock,
//! and concurrent callers for the same day wait on it instead of repeating
//! the work. Only a successful computation is promoted into the LRU map, so
//! failures never take up capacity. Evicted rankings stay valid for anyone
//! still holding them.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::errors::{RankError, RankResult};
use crate::ranking::Ranking;

/// Default number of cached days
pub const DEFAULT_CACHE_CAPACITY: usize = 2;

/// Computation slot shared by callers waiting on one day
type Slot = Arc<Mutex<Option<Arc<Ranking>>>>;

/// A cached day with its recency stamp
struct CachedDay {
    /// Finished ranking
    ranking: Arc<Ranking>,
    /// Logical time of the last access
    last_touched: u64,
}

/// Mutable cache state under the map lock
#[derive(Default)]
struct CacheState {
    /// Day index → finished ranking
    days: HashMap<i64, CachedDay>,
    /// Day index → slot of a computation in progress
    in_flight: HashMap<i64, Slot>,
    /// Monotonic access counter
    clock: u64,
    /// Lifetime counters
    stats: CacheStats,
}

impl CacheState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Store a finished ranking, evicting the stalest days beyond capacity
    fn promote(&mut self, day_index: i64, ranking: Arc<Ranking>, capacity: usize) {
        let now = self.tick();
        if let Some(cached) = self.days.get_mut(&day_index) {
            cached.ranking = ranking;
            cached.last_touched = now;
            return;
        }

        while self.days.len() >= capacity {
            let stalest = self
                .days
                .iter()
                .min_by_key(|(_, cached)| cached.last_touched)
                .map(|(&day, _)| day);
            match stalest {
                Some(day) => {
                    self.days.remove(&day);
                    self.stats.evictions += 1;
                    debug!(day_index = day, "evicted cached ranking");
                }
                None => break,
            }
        }

        self.days.insert(
            day_index,
            CachedDay {
                ranking,
                last_touched: now,
            },
        );
    }

    /// Drop the in-flight entry for a day if it is still `slot`
    fn release(&mut self, day_index: i64, slot: &Slot) {
        if self
            .in_flight
            .get(&day_index)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            self.in_flight.remove(&day_index);
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered without computing
    pub hits: u64,
    /// Rankings actually computed
    pub computations: u64,
    /// Days dropped to respect capacity
    pub evictions: u64,
}

/// Fixed-capacity LRU cache of rankings keyed by day index
pub struct RankingCache {
    /// Maximum number of finished days held
    capacity: usize,
    /// Maps and counters
    state: Mutex<CacheState>,
}

impl RankingCache {
    /// Create a cache holding at most `capacity` days
    pub fn new(capacity: usize) -> RankResult<Self> {
        if capacity == 0 {
            return Err(RankError::InvalidCacheCapacity(capacity));
        }
        Ok(Self {
            capacity,
            state: Mutex::new(CacheState::default()),
        })
    }

    /// Get the ranking for a day, computing it at most once
    ///
    /// # Arguments
    /// * `day_index` - Cache key
    /// * `compute` - Called only if no ranking is stored or being computed
    ///
    /// # Errors
    /// Whatever `compute` returns. A failed computation is not cached; a
    /// caller that was waiting on it computes for itself.
    pub fn get_or_compute<F>(&self, day_index: i64, compute: F) -> RankResult<Arc<Ranking>>
    where
        F: FnOnce() -> RankResult<Ranking>,
    {
        let slot = {
            let mut state = self.state.lock();
            let now = state.tick();
            if let Some(cached) = state.days.get_mut(&day_index) {
                cached.last_touched = now;
                let ranking = Arc::clone(&cached.ranking);
                state.stats.hits += 1;
                return Ok(ranking);
            }
            Arc::clone(state.in_flight.entry(day_index).or_default())
        };

        let mut guard = slot.lock();
        if let Some(ranking) = guard.as_ref() {
            self.state.lock().stats.hits += 1;
            return Ok(Arc::clone(ranking));
        }

        let result = compute();

        let mut state = self.state.lock();
        state.release(day_index, &slot);
        let ranking = Arc::new(result?);
        *guard = Some(Arc::clone(&ranking));
        state.promote(day_index, Arc::clone(&ranking), self.capacity);
        state.stats.computations += 1;

        Ok(ranking)
    }

    /// Maximum number of days held
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of finished days currently held
    pub fn len(&self) -> usize {
        self.state.lock().days.len()
    }

    /// Whether no day is held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a finished ranking is held for a day
    pub fn contains(&self, day_index: i64) -> bool {
        self.state.lock().days.contains_key(&day_index)
    }

    /// Cached day indices, most recent first
    pub fn days(&self) -> Vec<i64> {
        let state = self.state.lock();
        let mut days: Vec<(i64, u64)> = state
            .days
            .iter()
            .map(|(&day, cached)| (day, cached.last_touched))
            .collect();
        days.sort_by(|a, b| b.1.cmp(&a.1));
        days.into_iter().map(|(day, _)| day).collect()
    }

    /// Number of days currently being computed
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight.len()
    }

    /// Lifetime statistics
    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    /// Drop every cached day
    pub fn clear(&self) {
        self.state.lock().days.clear();
    }
}

impl Default for RankingCache {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            state: Mutex::new(CacheState::default()),
        }
    }
}

impl std::fmt::Debug for RankingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingCache")
            .field("capacity", &self.capacity)
            .field("days", &self.days())
            .finish()
    }
}
