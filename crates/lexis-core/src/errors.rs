//! LCG Errors
//!
//! Error types for parameter optimization.

use thiserror::Error;

/// Result type for LCG operations
pub type LcgResult<T> = Result<T, LcgError>;

/// LCG parameter errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LcgError {
    /// Modulus too small to permute anything
    #[error("Invalid modulus N={0}, must be at least 2")]
    InvalidModulus(u64),

    /// No multiplier coprime with the modulus was found
    #[error("No valid LCG parameters found for N={0}")]
    NoValidParameters(u64),
}
