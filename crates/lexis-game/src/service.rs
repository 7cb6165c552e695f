//! Game Service
//!
//! Composes the daily scheduler and the ranking engine behind one query
//! surface. Data is loaded once by [`GameService::initialize`]; every query
//! before that fails with [`GameError::NotInitialized`].

use lexis_core::LcgParams;
use lexis_rank::{
    hint_rank, normalize_word, CacheStats, GuessOutcome, RankingEngine, TopWord, Vocabulary,
};
use lexis_schedule::{DailyScheduler, WordPool};
use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::clock::DayClock;
use crate::config::GameConfig;
use crate::errors::{GameError, GameResult};
use crate::repository::{GameData, GameRepository};

/// Today's puzzle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPuzzle {
    /// Day index
    pub day_index: i64,
    /// The day's secret
    pub secret_word: String,
}

/// A revealed hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Rank of the revealed word
    pub rank: i64,
    /// The revealed word
    pub word: String,
}

/// Loaded state, immutable after initialization
#[derive(Debug)]
struct LoadedGame {
    scheduler: DailyScheduler,
    engine: RankingEngine,
    targets: Vec<String>,
}

/// The game's query surface
pub struct GameService<R> {
    /// Data source
    repository: R,
    /// Service settings
    config: GameConfig,
    /// Wall clock → day index
    clock: DayClock,
    /// Set once by `initialize`
    loaded: OnceCell<LoadedGame>,
}

impl<R: GameRepository> GameService<R> {
    /// Create an uninitialized service
    pub fn new(repository: R, config: GameConfig) -> Self {
        let clock = DayClock::new(config.epoch);
        Self {
            repository,
            config,
            clock,
            loaded: OnceCell::new(),
        }
    }

    /// Load data and build the scheduler and ranking engine
    ///
    /// Safe to call repeatedly or concurrently; the data is loaded once. A
    /// failed load leaves the service uninitialized so it can be retried.
    pub async fn initialize(&self) -> GameResult<()> {
        self.loaded.get_or_try_init(|| self.load()).await?;
        Ok(())
    }

    async fn load(&self) -> GameResult<LoadedGame> {
        let GameData {
            words,
            targets,
            vectors,
            history,
            pool,
        } = self.repository.load().await?;

        let scheduler = DailyScheduler::new(WordPool::new(history, pool))?;
        let vocabulary = Vocabulary::new(words, vectors)?;
        let engine =
            RankingEngine::with_cache_capacity(vocabulary, self.config.ranking_cache_capacity)?;

        info!(
            words = engine.vocabulary().size(),
            pool = scheduler.pool().remaining_pool_count(),
            history = scheduler.pool().history_count(),
            "game service initialized"
        );

        Ok(LoadedGame {
            scheduler,
            engine,
            targets,
        })
    }

    fn game(&self) -> GameResult<&LoadedGame> {
        self.loaded.get().ok_or(GameError::NotInitialized)
    }

    /// Whether `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.loaded.initialized()
    }

    /// The service configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The day clock
    pub fn clock(&self) -> &DayClock {
        &self.clock
    }

    /// Today's day index
    pub fn current_day_index(&self) -> i64 {
        self.clock.today()
    }

    /// Today's day index and secret
    pub fn daily_secret(&self) -> GameResult<DailyPuzzle> {
        let day_index = self.current_day_index();
        let secret_word = self.target_word(day_index)?;
        Ok(DailyPuzzle {
            day_index,
            secret_word,
        })
    }

    /// Secret for any day
    pub fn target_word(&self, day_index: i64) -> GameResult<String> {
        Ok(self.game()?.scheduler.secret_for_day(day_index)?.word)
    }

    /// Score a guess; `None` means today
    pub fn make_guess(&self, word: &str, day_index: Option<i64>) -> GameResult<GuessOutcome> {
        let game = self.game()?;

        // Unknown words are answered without resolving the day's secret
        if game.engine.vocabulary().index_of(word).is_none() {
            return Ok(GuessOutcome::unknown(normalize_word(word)));
        }

        let day_index = day_index.unwrap_or_else(|| self.current_day_index());
        let secret = game.scheduler.secret_for_day(day_index)?;
        Ok(game.engine.guess(word, day_index, &secret.word)?)
    }

    /// Word at a 1-based rank; `None` means today
    pub fn word_by_rank(&self, rank: i64, day_index: Option<i64>) -> GameResult<String> {
        let game = self.game()?;
        let day_index = day_index.unwrap_or_else(|| self.current_day_index());
        let secret = game.scheduler.secret_for_day(day_index)?;
        Ok(game.engine.word_at_rank(rank, day_index, &secret.word)?.to_string())
    }

    /// The `count` closest words for a day, secret first
    pub fn top_words(&self, day_index: i64, count: usize) -> GameResult<Vec<TopWord>> {
        let game = self.game()?;
        let secret = game.scheduler.secret_for_day(day_index)?;
        Ok(game.engine.top_words(day_index, &secret.word, count)?)
    }

    /// Pick and resolve a hint; `None` means today
    ///
    /// # Arguments
    /// * `best_rank` - The player's best rank so far, at least 1
    /// * `used_ranks` - Ranks already revealed
    pub fn hint(
        &self,
        best_rank: i64,
        used_ranks: &[i64],
        day_index: Option<i64>,
    ) -> GameResult<Hint> {
        if best_rank < 1 {
            return Err(GameError::InvalidParameter(format!(
                "best_rank must be at least 1, got {}",
                best_rank
            )));
        }

        let rank = hint_rank(best_rank, used_ranks, self.config.hint_rank_ceiling)?;
        let word = self.word_by_rank(rank, day_index)?;
        debug!(best_rank, rank, "hint selected");

        Ok(Hint { rank, word })
    }

    /// Hit and computation counters of the ranking cache
    pub fn ranking_stats(&self) -> GameResult<CacheStats> {
        Ok(self.game()?.engine.cache().stats())
    }

    /// Parameters of the pool rotation, if the pool rotates
    pub fn lcg_params(&self) -> GameResult<Option<LcgParams>> {
        Ok(self.game()?.scheduler.params().copied())
    }

    /// Number of words in rotation
    pub fn pool_size(&self) -> GameResult<usize> {
        Ok(self.game()?.scheduler.pool().remaining_pool_count())
    }

    /// Number of pinned history days
    pub fn history_size(&self) -> GameResult<usize> {
        Ok(self.game()?.scheduler.pool().history_count())
    }

    /// The curated target list
    pub fn targets(&self) -> GameResult<&[String]> {
        Ok(&self.game()?.targets)
    }

    /// Words dropped from the pool because history uses them
    pub fn removed_pool_words(&self) -> GameResult<&[String]> {
        Ok(&self.game()?.scheduler.pool().report().removed)
    }
}

impl<R> std::fmt::Debug for GameService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("config", &self.config)
            .field("initialized", &self.loaded.initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use lexis_rank::EMBEDDING_DIM;
    use lexis_schedule::ScheduleError;
    use std::collections::BTreeMap;

    /// Word `i` points along axis `i`, except "d" and "e" which lean toward "a"
    fn data() -> GameData {
        let words: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|w| w.to_string()).collect();
        let mut vectors = vec![0i8; words.len() * EMBEDDING_DIM];
        for i in 0..words.len() {
            vectors[i * EMBEDDING_DIM + i] = 100;
        }
        vectors[3 * EMBEDDING_DIM] = 90;
        vectors[4 * EMBEDDING_DIM] = 50;

        GameData {
            words,
            targets: Vec::new(),
            vectors,
            history: [(0, "d".to_string())].into_iter().collect(),
            pool: ["a", "b", "c", "e"].iter().map(|w| w.to_string()).collect(),
        }
    }

    fn service(data: GameData) -> GameService<InMemoryRepository> {
        GameService::new(InMemoryRepository::new(data), GameConfig::default())
    }

    #[tokio::test]
    async fn test_queries_before_initialize() {
        let s = service(data());
        assert!(!s.is_initialized());
        assert!(matches!(s.daily_secret(), Err(GameError::NotInitialized)));
        assert!(matches!(s.make_guess("a", Some(0)), Err(GameError::NotInitialized)));
        assert!(matches!(s.word_by_rank(1, Some(0)), Err(GameError::NotInitialized)));
        assert!(matches!(s.top_words(0, 5), Err(GameError::NotInitialized)));
        assert!(matches!(s.lcg_params(), Err(GameError::NotInitialized)));
        assert!(matches!(s.ranking_stats(), Err(GameError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let s = service(data());
        s.initialize().await.unwrap();
        s.initialize().await.unwrap();
        assert!(s.is_initialized());
        assert_eq!(s.target_word(0).unwrap(), "d");
    }

    #[tokio::test]
    async fn test_five_word_example() {
        let s = service(data());
        s.initialize().await.unwrap();

        assert_eq!(s.target_word(0).unwrap(), "d");
        let day2 = s.target_word(2).unwrap();
        assert!(["a", "b", "c", "e"].contains(&day2.as_str()));
        assert_eq!(s.target_word(2).unwrap(), day2);

        let params = s.lcg_params().unwrap().unwrap();
        assert_eq!(params.modulus(), 4);
        assert_eq!(s.pool_size().unwrap(), 4);
        assert_eq!(s.history_size().unwrap(), 1);
        assert_ne!(params.multiplier() % 4, 1);
    }

    #[tokio::test]
    async fn test_guess_against_history_day() {
        let s = service(data());
        s.initialize().await.unwrap();

        let hit = s.make_guess(" D ", Some(0)).unwrap();
        assert_eq!((hit.rank, hit.similarity, hit.is_unknown), (1, 1.0, false));

        // "a" and "e" lean toward "d"; "b" and "c" tie at zero in index order
        assert_eq!(s.make_guess("a", Some(0)).unwrap().rank, 2);
        assert_eq!(s.make_guess("e", Some(0)).unwrap().rank, 3);
        assert_eq!(s.make_guess("b", Some(0)).unwrap().rank, 4);
        assert_eq!(s.make_guess("c", Some(0)).unwrap().rank, 5);

        let unknown = s.make_guess("zebra", Some(0)).unwrap();
        assert!(unknown.is_unknown);
        assert_eq!(unknown.rank, -1);
    }

    #[tokio::test]
    async fn test_word_by_rank_and_top_words() {
        let s = service(data());
        s.initialize().await.unwrap();

        assert_eq!(s.word_by_rank(1, Some(0)).unwrap(), "d");
        assert_eq!(s.word_by_rank(99, Some(0)).unwrap(), "c");

        let top: Vec<String> = s.top_words(0, 3).unwrap().into_iter().map(|t| t.word).collect();
        assert_eq!(top, vec!["d", "a", "e"]);
    }

    #[tokio::test]
    async fn test_hint() {
        let s = service(data());
        s.initialize().await.unwrap();

        assert_eq!(
            s.hint(4, &[], Some(0)).unwrap(),
            Hint {
                rank: 2,
                word: "a".into()
            }
        );
        assert_eq!(s.hint(4, &[2], Some(0)).unwrap().rank, 3);
        assert_eq!(s.hint(50, &[], Some(0)).unwrap().word, "c");
        assert!(matches!(s.hint(0, &[], Some(0)), Err(GameError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_empty_pool_fails_only_that_request() {
        let mut d = data();
        d.pool = vec!["d".into()];
        let s = service(d);
        s.initialize().await.unwrap();

        assert_eq!(s.removed_pool_words().unwrap(), &["d".to_string()]);
        assert!(s.lcg_params().unwrap().is_none());
        assert!(matches!(
            s.target_word(1),
            Err(GameError::Schedule(ScheduleError::EmptyPool { day_index: 1 }))
        ));
        assert!(s.make_guess("zebra", Some(1)).unwrap().is_unknown);
        assert_eq!(s.target_word(0).unwrap(), "d");
    }

    #[tokio::test]
    async fn test_secret_missing_from_vocabulary() {
        let mut d = data();
        d.history = BTreeMap::from([(0, "ghost".to_string())]);
        let s = service(d);
        s.initialize().await.unwrap();

        assert!(matches!(
            s.make_guess("a", Some(0)),
            Err(GameError::Rank(lexis_rank::RankError::SecretNotInVocabulary(_)))
        ));
    }

    #[tokio::test]
    async fn test_bad_embeddings_fail_initialize() {
        let mut d = data();
        d.vectors.pop();
        let s = service(d);
        assert!(matches!(s.initialize().await, Err(GameError::Rank(_))));
        assert!(!s.is_initialized());
    }

    #[tokio::test]
    async fn test_targets_default_to_empty() {
        let s = service(data());
        s.initialize().await.unwrap();
        assert!(s.targets().unwrap().is_empty());
    }
}
