//! Word Pool
//!
//! Separates the fixed history (days whose secret is already public or
//! pinned) from the rotating pool of words for future days.
//!
//! A word that sits in both would be revealed through history and still be
//! reachable by rotation, so construction drops such words from the pool.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::errors::{ScheduleError, ScheduleResult};

/// Where a day's word came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSource {
    /// Pinned in the history map
    History,
    /// Selected from the active pool
    Pool,
}

/// A word resolved for a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation<'a> {
    /// The selected word
    pub word: &'a str,
    /// Its origin
    pub source: WordSource,
}

impl Rotation<'_> {
    /// Whether the word was pinned in history
    pub fn is_from_history(&self) -> bool {
        self.source == WordSource::History
    }
}

/// Diagnostics collected while building the pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Pool words dropped because history already uses them, in pool order
    pub removed: Vec<String>,
}

impl PoolReport {
    /// Number of dropped words
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }
}

/// History map plus deduplicated active pool
#[derive(Debug, Clone)]
pub struct WordPool {
    /// Day index → pinned word
    history: BTreeMap<i64, String>,
    /// Rotating words, none of which appear in history
    pool: Vec<String>,
    /// Construction diagnostics
    report: PoolReport,
}

impl WordPool {
    /// Build the pool, dropping any pool word that history already uses
    pub fn new(history: BTreeMap<i64, String>, pool: Vec<String>) -> Self {
        let history_words: HashSet<&str> = history.values().map(String::as_str).collect();

        let (pool, removed): (Vec<String>, Vec<String>) = pool
            .into_iter()
            .partition(|word| !history_words.contains(word.as_str()));

        if !removed.is_empty() {
            warn!(
                count = removed.len(),
                words = %removed.join(", "),
                "found words in both history and pool, removing them from pool"
            );
        }

        Self {
            history,
            pool,
            report: PoolReport { removed },
        }
    }

    /// Whether the day is pinned in history
    pub fn is_in_history(&self, day_index: i64) -> bool {
        self.history.contains_key(&day_index)
    }

    /// Resolve the word for a day
    ///
    /// History days ignore `pool_slot`. Other days take
    /// `pool[pool_slot mod len]`.
    pub fn word_for_day(&self, day_index: i64, pool_slot: u64) -> ScheduleResult<Rotation<'_>> {
        if let Some(word) = self.history.get(&day_index) {
            return Ok(Rotation {
                word,
                source: WordSource::History,
            });
        }

        if self.pool.is_empty() {
            return Err(ScheduleError::EmptyPool { day_index });
        }

        let index = (pool_slot % self.pool.len() as u64) as usize;
        Ok(Rotation {
            word: &self.pool[index],
            source: WordSource::Pool,
        })
    }

    /// Whether the word is still in rotation
    pub fn is_word_in_pool(&self, word: &str) -> bool {
        self.pool.iter().any(|w| w == word)
    }

    /// Number of words in rotation
    pub fn remaining_pool_count(&self) -> usize {
        self.pool.len()
    }

    /// Number of pinned days
    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Words in rotation, in pool order
    pub fn pool_words(&self) -> &[String] {
        &self.pool
    }

    /// Pinned days
    pub fn history(&self) -> &BTreeMap<i64, String> {
        &self.history
    }

    /// Construction diagnostics
    pub fn report(&self) -> &PoolReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn history(entries: &[(i64, &str)]) -> BTreeMap<i64, String> {
        entries.iter().map(|(d, w)| (*d, w.to_string())).collect()
    }

    #[test]
    fn test_pool_counts() {
        let pool = WordPool::new(
            history(&[(0, "one"), (1, "two")]),
            words(&["three", "four", "five"]),
        );
        assert_eq!(pool.history_count(), 2);
        assert_eq!(pool.remaining_pool_count(), 3);
        assert!(pool.report().removed.is_empty());
    }

    #[test]
    fn test_overlap_removed_from_pool() {
        let pool = WordPool::new(
            history(&[(0, "apple"), (3, "cherry")]),
            words(&["apple", "banana", "cherry", "date"]),
        );

        assert_eq!(pool.pool_words(), &words(&["banana", "date"])[..]);
        assert_eq!(pool.report().removed, words(&["apple", "cherry"]));
        assert_eq!(pool.report().removed_count(), 2);
        assert!(!pool.is_word_in_pool("apple"));
        for word in pool.history().values() {
            assert!(!pool.is_word_in_pool(word));
        }
    }

    #[test]
    fn test_history_ignores_slot() {
        let pool = WordPool::new(history(&[(5, "pinned")]), words(&["a", "b"]));
        for slot in [0, 1, 99, u64::MAX] {
            let rotation = pool.word_for_day(5, slot).unwrap();
            assert_eq!(rotation.word, "pinned");
            assert!(rotation.is_from_history());
        }
    }

    #[test]
    fn test_pool_slot_wraps() {
        let pool = WordPool::new(BTreeMap::new(), words(&["a", "b", "c"]));
        assert_eq!(pool.word_for_day(1, 0).unwrap().word, "a");
        assert_eq!(pool.word_for_day(1, 4).unwrap().word, "b");
        assert_eq!(pool.word_for_day(1, 4).unwrap().source, WordSource::Pool);
    }

    #[test]
    fn test_empty_pool_fails_only_off_history() {
        let pool = WordPool::new(history(&[(0, "only")]), words(&["only"]));
        assert_eq!(pool.remaining_pool_count(), 0);
        assert_eq!(pool.word_for_day(0, 0).unwrap().word, "only");
        assert_eq!(
            pool.word_for_day(1, 0),
            Err(ScheduleError::EmptyPool { day_index: 1 })
        );
    }

    #[test]
    fn test_is_in_history() {
        let pool = WordPool::new(history(&[(2, "x")]), words(&["y"]));
        assert!(pool.is_in_history(2));
        assert!(!pool.is_in_history(3));
        assert!(!pool.is_in_history(-2));
    }
}
