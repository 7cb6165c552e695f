//! Ranking Error Types

use thiserror::Error;

/// Ranking errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// Embedding dimension of zero
    #[error("Invalid embedding dimension: {0}")]
    InvalidDimension(usize),

    /// Embedding buffer is not a whole number of rows
    #[error("Embedding length {len} is not a multiple of dimension {dimension}")]
    DimensionMismatch { len: usize, dimension: usize },

    /// Embedding rows and vocabulary disagree
    #[error("Embedding matrix has {rows} rows but vocabulary has {words} words")]
    RowCountMismatch { rows: usize, words: usize },

    /// Vocabulary cannot be addressed with 32-bit indices
    #[error("Vocabulary too large: {0} words")]
    VocabularyTooLarge(usize),

    /// The day's secret is missing from the vocabulary
    #[error("Secret word '{0}' not found in vocabulary")]
    SecretNotInVocabulary(String),

    /// Hints need a best rank of at least 1
    #[error("Invalid best rank for hint: {0}")]
    InvalidHintRank(i64),

    /// Ranking cache must hold at least one day
    #[error("Invalid ranking cache capacity: {0}")]
    InvalidCacheCapacity(usize),
}

impl RankError {
    /// Whether the error comes from malformed data at load time
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            RankError::InvalidDimension(_)
                | RankError::DimensionMismatch { .. }
                | RankError::RowCountMismatch { .. }
                | RankError::VocabularyTooLarge(_)
        )
    }
}

/// Result type for ranking operations
pub type RankResult<T> = Result<T, RankError>;
