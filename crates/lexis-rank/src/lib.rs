//! # Lexis Rank
//!
//! Semantic ranking of the whole vocabulary against a daily secret word.
//!
//! ## Components
//!
//! - **Vocabulary**: word list, normalized lookup and `i8` embeddings
//! - **Ranking**: every word sorted by `dot(v, secret) / |v|`
//! - **Cache**: the last few days' rankings, each computed once
//! - **Engine**: guess → rank, rank → word, top words, hints

pub mod cache;
pub mod engine;
pub mod errors;
pub mod ranking;
pub mod vocabulary;

pub use cache::*;
pub use engine::*;
pub use errors::*;
pub use ranking::*;
pub use vocabulary::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::*;
    pub use crate::errors::*;
    pub use crate::vocabulary::*;
}
