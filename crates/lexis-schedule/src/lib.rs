//! # Lexis Schedule
//!
//! Spoiler-resistant selection of the daily secret word.
//!
//! ## Features
//!
//! - **Word pool**: fixed history plus a rotating pool, kept disjoint
//! - **Daily scheduler**: day index → word through a non-trivial LCG
//!
//! ## Why not just `pool[day % N]`?
//!
//! Walking the pool in order lets anyone who has seen the pool file predict
//! tomorrow's word. The LCG keeps the guarantee that matters (no repeats
//! within N days) while breaking the obvious progression.

pub mod errors;
pub mod pool;
pub mod scheduler;

pub use errors::*;
pub use pool::*;
pub use scheduler::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::pool::*;
    pub use crate::scheduler::*;
}
