//! Vocabulary and Embedding Store
//!
//! Owns the word list, the normalized lookup index, the quantized embedding
//! matrix and per-word norms. Everything is computed once at load and never
//! changes afterwards, so the store is shared freely across threads.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::errors::{RankError, RankResult};

/// Dimension of every word embedding
pub const EMBEDDING_DIM: usize = 384;

/// Code points accepted as an apostrophe in guesses
const APOSTROPHE_VARIANTS: [char; 3] = ['\u{2019}', '\u{02BC}', '`'];

/// Normalize a word for lookup
///
/// Trims, lowercases and folds apostrophe look-alikes to `'`.
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .chars()
        .map(|c| if APOSTROPHE_VARIANTS.contains(&c) { '\'' } else { c })
        .collect()
}

/// Immutable vocabulary with embeddings
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Words in index order
    words: Vec<String>,
    /// Normalized word → index
    index: HashMap<String, u32>,
    /// Row-major `words × dimension` matrix
    vectors: Vec<i8>,
    /// Euclidean norm per row
    norms: Vec<f32>,
    /// Embedding dimension
    dimension: usize,
}

impl Vocabulary {
    /// Build a vocabulary with [`EMBEDDING_DIM`]-wide embeddings
    pub fn new(words: Vec<String>, vectors: Vec<i8>) -> RankResult<Self> {
        Self::with_dimension(words, vectors, EMBEDDING_DIM)
    }

    /// Build a vocabulary with a custom embedding width
    ///
    /// # Errors
    /// Fails if the buffer is not a whole number of rows, or if the row count
    /// differs from the word count.
    pub fn with_dimension(
        words: Vec<String>,
        vectors: Vec<i8>,
        dimension: usize,
    ) -> RankResult<Self> {
        if dimension == 0 {
            return Err(RankError::InvalidDimension(dimension));
        }
        if vectors.len() % dimension != 0 {
            return Err(RankError::DimensionMismatch {
                len: vectors.len(),
                dimension,
            });
        }

        let rows = vectors.len() / dimension;
        if rows != words.len() {
            return Err(RankError::RowCountMismatch {
                rows,
                words: words.len(),
            });
        }
        if u32::try_from(words.len()).is_err() {
            return Err(RankError::VocabularyTooLarge(words.len()));
        }

        let mut index = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            match index.entry(normalize_word(word)) {
                Entry::Vacant(slot) => {
                    slot.insert(i as u32);
                }
                Entry::Occupied(existing) => {
                    warn!(
                        word = %word,
                        kept = *existing.get(),
                        dropped = i,
                        "duplicate vocabulary entry after normalization"
                    );
                }
            }
        }

        let norms = vectors.chunks_exact(dimension).map(row_norm).collect();

        info!(words = words.len(), dimension, "vocabulary loaded");

        Ok(Self {
            words,
            index,
            vectors,
            norms,
            dimension,
        })
    }

    /// Number of words
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Embedding width
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Index of a word, after normalization
    pub fn index_of(&self, word: &str) -> Option<u32> {
        self.index.get(&normalize_word(word)).copied()
    }

    /// Index of an already-normalized word
    pub fn index_of_normalized(&self, normalized: &str) -> Option<u32> {
        self.index.get(normalized).copied()
    }

    /// Word at an index
    pub fn word(&self, index: u32) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    /// All words in index order
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Embedding row of a word
    ///
    /// # Panics
    /// If `index` is out of range
    pub fn vector_of(&self, index: u32) -> &[i8] {
        let start = index as usize * self.dimension;
        &self.vectors[start..start + self.dimension]
    }

    /// Euclidean norm of a word's embedding
    ///
    /// # Panics
    /// If `index` is out of range
    pub fn norm_of(&self, index: u32) -> f32 {
        self.norms[index as usize]
    }

    /// The whole embedding matrix, row-major
    pub fn vectors(&self) -> &[i8] {
        &self.vectors
    }

    /// All norms in index order
    pub fn norms(&self) -> &[f32] {
        &self.norms
    }
}

/// Exact integer dot product of two rows
#[inline]
pub fn dot(a: &[i8], b: &[i8]) -> i32 {
    a.iter().zip(b).map(|(&x, &y)| x as i32 * y as i32).sum()
}

fn row_norm(row: &[i8]) -> f32 {
    (dot(row, row) as f64).sqrt() as f32
}
