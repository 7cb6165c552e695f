//! Daily Ranking
//!
//! Orders the whole vocabulary by closeness to one secret word.
//!
//! ## Scoring
//!
//! ```text
//! score(i) = dot(v_i, v_secret) / |v_i|      (0 when |v_i| = 0)
//! ```
//!
//! The secret's norm is a common factor, so it is left out. The dot product
//! is exact in `i32`, the quotient is taken in `f64` and stored as `f32`.
//! Ties keep ascending vocabulary order, except that the secret always
//! takes rank 1.

use rayon::prelude::*;
use tracing::debug;

use crate::vocabulary::{dot, Vocabulary};

/// A full ordering of the vocabulary for one secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    /// Vocabulary index of the secret
    secret: u32,
    /// Position → vocabulary index, best first
    order: Vec<u32>,
    /// Vocabulary index → position
    positions: Vec<u32>,
}

impl Ranking {
    /// Score and sort every word against `secret`
    ///
    /// # Panics
    /// If `secret` is not a valid vocabulary index
    pub fn compute(vocabulary: &Vocabulary, secret: u32) -> Self {
        let secret_vector = vocabulary.vector_of(secret);
        let dimension = vocabulary.dimension();

        let scores: Vec<f32> = vocabulary
            .vectors()
            .par_chunks_exact(dimension)
            .zip(vocabulary.norms().par_iter())
            .map(|(row, &norm)| score(row, secret_vector, norm))
            .collect();

        let mut order: Vec<u32> = (0..scores.len() as u32).collect();
        // Stable, so equal scores stay in index order
        order.sort_by(|&a, &b| scores[b as usize].total_cmp(&scores[a as usize]));
        pin_secret_first(&mut order, secret);

        let mut positions = vec![0u32; order.len()];
        for (position, &index) in order.iter().enumerate() {
            positions[index as usize] = position as u32;
        }

        debug!(secret, words = order.len(), "ranking computed");

        Self {
            secret,
            order,
            positions,
        }
    }

    /// Vocabulary index of the secret this ranking was built for
    pub fn secret_index(&self) -> u32 {
        self.secret
    }

    /// Number of ranked words
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is ranked
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vocabulary indices, best first
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// 1-based rank of a vocabulary index
    pub fn rank_of(&self, index: u32) -> Option<usize> {
        self.positions.get(index as usize).map(|&p| p as usize + 1)
    }

    /// Vocabulary index at a 1-based rank
    ///
    /// Ranks below 1 give the best word, ranks past the end give the last.
    pub fn index_at_rank(&self, rank: i64) -> Option<u32> {
        let last = self.order.len().checked_sub(1)?;
        let position = rank.saturating_sub(1).clamp(0, last as i64) as usize;
        Some(self.order[position])
    }

    /// The first `count` entries as `(rank, index)` pairs
    pub fn top(&self, count: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.order
            .iter()
            .take(count)
            .enumerate()
            .map(|(position, &index)| (position + 1, index))
    }
}

/// Move the secret to the front, shifting the words that tied with it
fn pin_secret_first(order: &mut [u32], secret: u32) {
    if let Some(position) = order.iter().position(|&index| index == secret) {
        order[..=position].rotate_right(1);
    }
}

/// Ranking score of one row against the secret
#[inline]
pub fn score(row: &[i8], secret: &[i8], norm: f32) -> f32 {
    if norm > 0.0 {
        (dot(row, secret) as f64 / norm as f64) as f32
    } else {
        0.0
    }
}

/// Cosine similarity between two vocabulary entries
///
/// 0 when either embedding has zero norm.
pub fn cosine_similarity(vocabulary: &Vocabulary, a: u32, b: u32) -> f64 {
    let norms = vocabulary.norm_of(a) as f64 * vocabulary.norm_of(b) as f64;
    if norms > 0.0 {
        dot(vocabulary.vector_of(a), vocabulary.vector_of(b)) as f64 / norms
    } else {
        0.0
    }
}
