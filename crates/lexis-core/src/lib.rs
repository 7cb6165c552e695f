//! # Lexis Core
//!
//! Integer mathematics behind the daily word rotation.
//!
//! ## Components
//!
//! - **Number theory**: gcd, coprimality, distinct prime factors,
//!   multiplicative order
//! - **Hull–Dobell**: full-period validation for linear congruential sequences
//! - **LCG optimizer**: picks (A, B) for a pool of size N so that
//!   `(A·day + B) mod N` visits every pool slot once per N days without
//!   stepping through the pool in order
//!
//! ## Mathematical Properties
//!
//! ```text
//! Direct mapping:  slot(i) = (A·i + B) mod N
//! Bijective over any N consecutive i  ⇔  gcd(A, N) = 1
//! Non-trivial:     A mod N ≠ 1
//! ```

pub mod constants;
pub mod errors;
pub mod lcg;
pub mod number_theory;

pub use constants::*;
pub use errors::*;
pub use lcg::*;
pub use number_theory::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::errors::*;
    pub use crate::lcg::*;
    pub use crate::number_theory::*;
}
