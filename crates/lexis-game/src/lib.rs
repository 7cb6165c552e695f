//! # Lexis Game
//!
//! The daily semantic word game: data loading, day clock, configuration and
//! the query surface that ties scheduling and ranking together.
//!
//! ## Architecture
//!
//! ```text
//!  GameRepository ──load──▶ GameData
//!                             │
//!          ┌──────────────────┴──────────────────┐
//!          ▼                                     ▼
//!   DailyScheduler                        RankingEngine
//!   (history + LCG pool)                  (vocabulary + cache)
//!          │         day → secret                │
//!          └────────────────▶ GameService ◀──────┘
//!                                 ▲
//!                              DayClock
//! ```

pub mod clock;
pub mod config;
pub mod errors;
pub mod repository;
pub mod service;

pub use clock::*;
pub use config::*;
pub use errors::*;
pub use repository::*;
pub use service::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::*;
    pub use crate::config::*;
    pub use crate::errors::*;
    pub use crate::repository::*;
    pub use crate::service::*;
}
