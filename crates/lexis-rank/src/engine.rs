//! Similarity Ranking Engine
//!
//! Answers guess, rank and top-word queries for a day's secret on top of the
//! shared [`Vocabulary`] and the per-day [`RankingCache`].

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::cache::RankingCache;
use crate::errors::{RankError, RankResult};
use crate::ranking::{cosine_similarity, Ranking};
use crate::vocabulary::{normalize_word, Vocabulary};

/// Rank reported for words outside the vocabulary
pub const UNKNOWN_RANK: i64 = -1;

/// Default upper bound for hint ranks
pub const DEFAULT_HINT_CEILING: usize = 100_000;

/// Result of scoring one guess
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessOutcome {
    /// The guess after normalization
    pub word: String,
    /// 1-based rank, or [`UNKNOWN_RANK`]
    pub rank: i64,
    /// Cosine similarity to the secret
    pub similarity: f64,
    /// The guess is not in the vocabulary
    pub is_unknown: bool,
}

impl GuessOutcome {
    /// Outcome for a word outside the vocabulary
    pub fn unknown(word: String) -> Self {
        Self {
            word,
            rank: UNKNOWN_RANK,
            similarity: 0.0,
            is_unknown: true,
        }
    }
}

/// One entry of a top-words listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopWord {
    /// 1-based rank
    pub rank: usize,
    /// The word
    pub word: String,
}

/// Ranking engine over one vocabulary
#[derive(Debug)]
pub struct RankingEngine {
    /// Immutable vocabulary and embeddings
    vocabulary: Arc<Vocabulary>,
    /// Recently used daily rankings
    cache: RankingCache,
}

impl RankingEngine {
    /// Create an engine with the default cache capacity
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary: Arc::new(vocabulary),
            cache: RankingCache::default(),
        }
    }

    /// Create an engine caching up to `capacity` days
    pub fn with_cache_capacity(vocabulary: Vocabulary, capacity: usize) -> RankResult<Self> {
        Ok(Self {
            vocabulary: Arc::new(vocabulary),
            cache: RankingCache::new(capacity)?,
        })
    }

    /// The vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The ranking cache
    pub fn cache(&self) -> &RankingCache {
        &self.cache
    }

    fn secret_index(&self, secret: &str) -> RankResult<u32> {
        self.vocabulary.index_of(secret).ok_or_else(|| {
            error!(secret, "secret word missing from vocabulary");
            RankError::SecretNotInVocabulary(secret.to_string())
        })
    }

    /// Full ranking of the vocabulary for a day's secret
    ///
    /// Cached per day; the first request for a day pays for the sort.
    ///
    /// # Errors
    /// `SecretNotInVocabulary` if the secret has no embedding
    pub fn rankings_for(&self, day_index: i64, secret: &str) -> RankResult<Arc<Ranking>> {
        let secret_index = self.secret_index(secret)?;
        let vocabulary = &self.vocabulary;

        let ranking = self
            .cache
            .get_or_compute(day_index, || Ok(Ranking::compute(vocabulary, secret_index)))?;

        if ranking.secret_index() != secret_index {
            // A day's secret is fixed, so this only happens on caller error
            warn!(
                day_index,
                cached = ranking.secret_index(),
                requested = secret_index,
                "cached ranking belongs to another secret, computing uncached"
            );
            return Ok(Arc::new(Ranking::compute(vocabulary, secret_index)));
        }

        Ok(ranking)
    }

    /// Score a guess against a day's secret
    ///
    /// Unknown words are a normal outcome with `is_unknown` set.
    pub fn guess(&self, word: &str, day_index: i64, secret: &str) -> RankResult<GuessOutcome> {
        let normalized = normalize_word(word);

        let Some(guess_index) = self.vocabulary.index_of_normalized(&normalized) else {
            debug!(word = %normalized, day_index, "unknown guess");
            return Ok(GuessOutcome::unknown(normalized));
        };

        let secret_index = self.secret_index(secret)?;
        if guess_index == secret_index {
            return Ok(GuessOutcome {
                word: normalized,
                rank: 1,
                similarity: 1.0,
                is_unknown: false,
            });
        }

        let ranking = self.rankings_for(day_index, secret)?;
        let rank = ranking.rank_of(guess_index).map_or(UNKNOWN_RANK, |r| r as i64);
        let similarity = cosine_similarity(&self.vocabulary, guess_index, secret_index);

        debug!(word = %normalized, day_index, rank, "scored guess");

        Ok(GuessOutcome {
            word: normalized,
            rank,
            similarity,
            is_unknown: false,
        })
    }

    /// Word at a 1-based rank, clamped into the vocabulary
    pub fn word_at_rank(&self, rank: i64, day_index: i64, secret: &str) -> RankResult<&str> {
        let ranking = self.rankings_for(day_index, secret)?;
        let word = ranking
            .index_at_rank(rank)
            .and_then(|index| self.vocabulary.word(index))
            .unwrap_or_default();
        Ok(word)
    }

    /// The `count` closest words, secret first
    pub fn top_words(
        &self,
        day_index: i64,
        secret: &str,
        count: usize,
    ) -> RankResult<Vec<TopWord>> {
        let ranking = self.rankings_for(day_index, secret)?;
        Ok(ranking
            .top(count)
            .filter_map(|(rank, index)| {
                self.vocabulary.word(index).map(|word| TopWord {
                    rank,
                    word: word.to_string(),
                })
            })
            .collect())
    }
}

/// Pick the rank to reveal as a hint
///
/// Starts halfway to the player's best rank and walks away from the secret
/// past ranks already revealed. Rank 1 is never chosen. The walk stops at
/// `ceiling`.
///
/// # Errors
/// `InvalidHintRank` when `best_rank < 1`
pub fn hint_rank(best_rank: i64, used_ranks: &[i64], ceiling: usize) -> RankResult<i64> {
    if best_rank < 1 {
        return Err(RankError::InvalidHintRank(best_rank));
    }

    let mut used: HashSet<i64> = used_ranks.iter().copied().collect();
    used.insert(1);

    let ceiling = ceiling as i64;
    let mut rank = (best_rank / 2 + best_rank % 2).max(1);
    while used.contains(&rank) && rank < ceiling {
        rank += 1;
    }
    Ok(rank)
}
