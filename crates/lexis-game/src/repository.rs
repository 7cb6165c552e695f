//! Game Data Repository
//!
//! Where the vocabulary, embeddings, history and pool come from.
//!
//! ## File Layout
//!
//! ```text
//! <data_dir>/
//!   words.json    ["w", ...]  or  {"words": ["w", ...]}
//!   targets.json  {"history": {"0": "w", ...}, "pool": [...], "targets": [...]?}
//!   vectors.bin   words × 384 signed bytes, row-major
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::errors::{GameError, GameResult};

/// Word list file name
pub const WORDS_FILE: &str = "words.json";
/// Targets, history and pool file name
pub const TARGETS_FILE: &str = "targets.json";
/// Embedding matrix file name
pub const VECTORS_FILE: &str = "vectors.bin";

/// Everything the game needs at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameData {
    /// Vocabulary in index order
    pub words: Vec<String>,
    /// Curated target list, informational
    pub targets: Vec<String>,
    /// Row-major embedding matrix
    pub vectors: Vec<i8>,
    /// Day index → pinned secret
    pub history: BTreeMap<i64, String>,
    /// Candidates for future days
    pub pool: Vec<String>,
}

/// Source of game data
pub trait GameRepository: Send + Sync {
    /// Load the full data bundle
    fn load(&self) -> impl Future<Output = GameResult<GameData>> + Send;
}

// ===== File Formats =====

#[derive(Deserialize)]
#[serde(untagged)]
enum WordsFile {
    List(Vec<String>),
    Wrapped { words: Vec<String> },
}

impl WordsFile {
    fn into_words(self) -> Vec<String> {
        match self {
            WordsFile::List(words) | WordsFile::Wrapped { words } => words,
        }
    }
}

#[derive(Deserialize)]
struct TargetsFile {
    #[serde(default)]
    history: BTreeMap<String, String>,
    #[serde(default)]
    pool: Vec<String>,
    #[serde(default)]
    targets: Option<Vec<String>>,
}

/// Parse history keys into day indices
///
/// Keys must be non-negative decimal integers.
pub fn parse_history(raw: BTreeMap<String, String>) -> GameResult<BTreeMap<i64, String>> {
    raw.into_iter()
        .map(|(key, word)| match key.trim().parse::<i64>() {
            Ok(day) if day >= 0 => Ok((day, word)),
            _ => Err(GameError::InvalidHistoryKey(key)),
        })
        .collect()
}

/// Build a bundle from the raw contents of the three data files
pub fn parse_game_data(
    words_json: &str,
    targets_json: &str,
    vectors: Vec<u8>,
    dir: &Path,
) -> GameResult<GameData> {
    let words = serde_json::from_str::<WordsFile>(words_json)
        .map_err(|source| GameError::Json {
            path: dir.join(WORDS_FILE),
            source,
        })?
        .into_words();

    let targets_file: TargetsFile =
        serde_json::from_str(targets_json).map_err(|source| GameError::Json {
            path: dir.join(TARGETS_FILE),
            source,
        })?;

    let history = parse_history(targets_file.history)?;
    let pool = targets_file.pool;
    let targets = targets_file.targets.unwrap_or_else(|| pool.clone());
    let vectors = vectors.into_iter().map(|b| b as i8).collect();

    Ok(GameData {
        words,
        targets,
        vectors,
        history,
        pool,
    })
}

// ===== Filesystem =====

/// Loads game data from a directory on disk
#[derive(Debug, Clone)]
pub struct FileRepository {
    /// Preferred directory
    data_dir: PathBuf,
    /// Tried in order when `data_dir` is missing
    fallbacks: Vec<PathBuf>,
}

impl FileRepository {
    /// Repository reading a single directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            fallbacks: Vec::new(),
        }
    }

    /// Repository with fallback directories
    pub fn with_fallbacks(data_dir: impl Into<PathBuf>, fallbacks: Vec<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            fallbacks,
        }
    }

    /// Repository using the configured directories
    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_fallbacks(config.data_dir.clone(), config.fallback_data_dirs.clone())
    }

    /// Preferred directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// First candidate directory that exists
    pub async fn resolve_data_dir(&self) -> GameResult<PathBuf> {
        if directory_exists(&self.data_dir).await {
            return Ok(self.data_dir.clone());
        }

        for candidate in &self.fallbacks {
            if directory_exists(candidate).await {
                info!(path = %candidate.display(), "using alternative data directory");
                return Ok(candidate.clone());
            }
        }

        let tried: Vec<String> = std::iter::once(&self.data_dir)
            .chain(&self.fallbacks)
            .map(|p| p.display().to_string())
            .collect();
        Err(GameError::DataSource(format!(
            "data directory not found, tried: {}",
            tried.join(", ")
        )))
    }
}

async fn directory_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}

async fn read_text(path: PathBuf) -> GameResult<String> {
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| GameError::Io { path, source })
}

async fn read_bytes(path: PathBuf) -> GameResult<Vec<u8>> {
    tokio::fs::read(&path).await.map_err(|source| GameError::Io { path, source })
}

impl GameRepository for FileRepository {
    async fn load(&self) -> GameResult<GameData> {
        let dir = self.resolve_data_dir().await?;
        debug!(path = %dir.display(), "loading game data");

        let (words_json, targets_json, vectors) = tokio::try_join!(
            read_text(dir.join(WORDS_FILE)),
            read_text(dir.join(TARGETS_FILE)),
            read_bytes(dir.join(VECTORS_FILE)),
        )?;

        let data = parse_game_data(&words_json, &targets_json, vectors, &dir)?;

        info!(
            words = data.words.len(),
            targets = data.targets.len(),
            pool = data.pool.len(),
            history = data.history.len(),
            path = %dir.display(),
            "loaded game data"
        );

        Ok(data)
    }
}

// ===== In Memory =====

/// Serves a fixed bundle, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    data: GameData,
}

impl InMemoryRepository {
    /// Wrap a bundle
    pub fn new(data: GameData) -> Self {
        Self { data }
    }
}

impl GameRepository for InMemoryRepository {
    async fn load(&self) -> GameResult<GameData> {
        Ok(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_data_dir(dir: &Path, words: &str, targets: &str, vectors: &[u8]) {
        std::fs::write(dir.join(WORDS_FILE), words).unwrap();
        std::fs::write(dir.join(TARGETS_FILE), targets).unwrap();
        std::fs::write(dir.join(VECTORS_FILE), vectors).unwrap();
    }

    #[test]
    fn test_parse_history() {
        let raw: BTreeMap<String, String> = [("0", "a"), ("12", "b")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let history = parse_history(raw).unwrap();
        assert_eq!(history.get(&0).map(String::as_str), Some("a"));
        assert_eq!(history.get(&12).map(String::as_str), Some("b"));
    }

    #[test]
    fn test_parse_history_rejects_bad_keys() {
        for key in ["-1", "x", "1.5", ""] {
            let raw: BTreeMap<String, String> =
                [(key.to_string(), "w".to_string())].into_iter().collect();
            assert!(matches!(
                parse_history(raw),
                Err(GameError::InvalidHistoryKey(k)) if k == key
            ));
        }
    }

    #[test]
    fn test_parse_both_word_formats() {
        let dir = Path::new("data");
        let targets = r#"{"pool":["a"]}"#;
        let list = parse_game_data(r#"["a","b"]"#, targets, vec![], dir).unwrap();
        let wrapped = parse_game_data(r#"{"words":["a","b"]}"#, targets, vec![], dir).unwrap();
        assert_eq!(list.words, wrapped.words);
        assert_eq!(list.targets, vec!["a".to_string()]);
        assert!(list.history.is_empty());
    }

    #[test]
    fn test_explicit_targets_and_signed_bytes() {
        let data = parse_game_data(
            r#"["a"]"#,
            r#"{"history":{"3":"a"},"pool":["b"],"targets":["t1","t2"]}"#,
            vec![0, 127, 128, 255],
            Path::new("data"),
        )
        .unwrap();
        assert_eq!(data.targets, vec!["t1".to_string(), "t2".to_string()]);
        assert_eq!(data.pool, vec!["b".to_string()]);
        assert_eq!(data.vectors, vec![0, 127, -128, -1]);
        assert_eq!(data.history.get(&3).map(String::as_str), Some("a"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_game_data("{", "{}", vec![], Path::new("d")).unwrap_err();
        assert!(matches!(
            err,
            GameError::Json { path, .. } if path == Path::new("d").join(WORDS_FILE)
        ));
    }

    #[tokio::test]
    async fn test_file_repository_load() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(
            dir.path(),
            r#"["x","y"]"#,
            r#"{"history":{"0":"x"},"pool":["y"]}"#,
            &[1, 2, 3],
        );

        let data = FileRepository::new(dir.path()).load().await.unwrap();
        assert_eq!(data.words.len(), 2);
        assert_eq!(data.vectors, vec![1, 2, 3]);
        assert_eq!(data.pool, vec!["y".to_string()]);
    }

    #[tokio::test]
    async fn test_fallback_directory() {
        let fallback = tempfile::tempdir().unwrap();
        write_data_dir(fallback.path(), r#"["x"]"#, r#"{"pool":["x"]}"#, &[]);

        let repo = FileRepository::with_fallbacks(
            "/nonexistent/lexis-data",
            vec![PathBuf::from("/nonexistent/other"), fallback.path().to_path_buf()],
        );
        assert_eq!(repo.resolve_data_dir().await.unwrap(), fallback.path());
        assert_eq!(repo.load().await.unwrap().words, vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let repo =
            FileRepository::with_fallbacks("/nonexistent/a", vec![PathBuf::from("/nonexistent/b")]);
        let err = repo.load().await.unwrap_err();
        assert!(matches!(
            err,
            GameError::DataSource(msg)
                if msg.contains("/nonexistent/a") && msg.contains("/nonexistent/b")
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(WORDS_FILE), "[]").unwrap();
        std::fs::write(dir.path().join(TARGETS_FILE), "{}").unwrap();

        let err = FileRepository::new(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, GameError::Io { path, .. } if path.ends_with(VECTORS_FILE)));
    }

    #[tokio::test]
    async fn test_in_memory_repository() {
        let data = GameData {
            words: vec!["a".into()],
            ..GameData::default()
        };
        let repo = InMemoryRepository::new(data.clone());
        assert_eq!(repo.load().await.unwrap(), data);
    }
}
