//! Rotation Constants
//!
//! Fixed parameters of the LCG search used to rotate the active word pool.
//!
//! These constants control:
//! - Which multipliers are tried first
//! - How far the exhaustive search is allowed to go
//! - How candidate parameters are weighted against each other

// =============================================================================
// WELL-KNOWN MULTIPLIERS
// =============================================================================

/// Multipliers with a long record in random number generation.
///
/// - 16807 = 7^5, the Park–Miller "minimal standard"
/// - 48271, the revised Park–Miller multiplier
/// - 69621, an alternative 31-bit multiplier
/// - 630360016, a large multiplier from the same family
///
/// Tried before the exhaustive search for every modulus.
pub const WELL_KNOWN_MULTIPLIERS: [u64; 4] = [16807, 48271, 69621, 630360016];

// =============================================================================
// SEARCH BOUNDS
// =============================================================================

/// Exclusive upper bound for the increment search: B < min(this, N)
pub const MAX_INCREMENT_SEARCH: u64 = 100;

/// Exclusive upper bound for the multiplier scan: A < min(this, 10·N)
pub const MAX_MULTIPLIER_SEARCH: u64 = 10_000;

/// Factor applied to N when bounding the multiplier scan
pub const MULTIPLIER_SEARCH_FACTOR: u64 = 10;

/// Smallest multiplier considered by the exhaustive scan
pub const MIN_SEARCH_MULTIPLIER: u64 = 2;

/// The exhaustive scan stops once this many candidates exist
pub const MAX_CANDIDATES: usize = 10;

/// Smallest modulus the optimizer accepts
pub const MIN_MODULUS: u64 = 2;

// =============================================================================
// SCORING WEIGHTS
// =============================================================================

/// Weight (percent) of Hull–Dobell compliance in the overall score
pub const HULL_DOBELL_WEIGHT: f64 = 40.0;

/// Weight (percent) of the spectral placeholder in the overall score
pub const SPECTRAL_WEIGHT: f64 = 30.0;

/// Weight (percent) of multiplier quality in the overall score
pub const MULTIPLIER_WEIGHT: f64 = 30.0;

/// Spectral placeholder for Hull–Dobell compliant parameters
pub const SPECTRAL_COMPLIANT: f64 = 90.0;

/// Spectral placeholder for parameters that are only coprime
pub const SPECTRAL_COPRIME: f64 = 70.0;

/// Spectral placeholder for everything else
pub const SPECTRAL_OTHER: f64 = 30.0;

/// Multiplier score for a well-known, compliant multiplier
pub const WELL_KNOWN_SCORE: f64 = 100.0;

/// Multiplier score for a coprime multiplier without full compliance
pub const COPRIME_ONLY_SCORE: f64 = 20.0;

/// Penalty per distinct prime factor of the multiplier
pub const FACTOR_PENALTY: f64 = 5.0;

/// Scale applied to order/N when scoring a multiplier
pub const ORDER_RATIO_SCALE: f64 = 80.0;

/// Offset added to every order-based multiplier score
pub const ORDER_SCORE_OFFSET: f64 = 20.0;

/// Upper bound of any single quality component
pub const MAX_COMPONENT_SCORE: f64 = 100.0;

// =============================================================================
// VERIFICATION
// =============================================================================

/// Verify the score weights add up to 100%
pub fn verify_weights() -> bool {
    (HULL_DOBELL_WEIGHT + SPECTRAL_WEIGHT + MULTIPLIER_WEIGHT - 100.0).abs() < 1e-12
}
