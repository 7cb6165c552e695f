//! Number Theory
//!
//! The handful of integer functions needed to reason about linear
//! congruential sequences:
//! - gcd and coprimality
//! - distinct prime factors
//! - Hull–Dobell full-period validation
//! - multiplicative order and LCG period

// =============================================================================
// GCD
// =============================================================================

/// Greatest common divisor (Euclidean algorithm)
///
/// Operates on absolute values, so signs are ignored.
///
/// # Returns
/// `gcd(a, b)`, with `gcd(0, 0) = 0` and `gcd(0, n) = |n|`
pub fn gcd(a: i64, b: i64) -> u64 {
    let mut a = a.unsigned_abs();
    let mut b = b.unsigned_abs();
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

/// Check whether `a` and `b` share no common factor
///
/// `is_coprime(0, n)` is true only for `n = ±1`.
#[inline]
pub fn is_coprime(a: i64, b: i64) -> bool {
    gcd(a, b) == 1
}

/// [`gcd`] for unsigned operands
pub(crate) fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let rem = a % b;
        a = b;
        b = rem;
    }
    a
}

// =============================================================================
// PRIME FACTORS
// =============================================================================

/// Distinct prime factors of |n| in ascending order
///
/// Trial division up to √n. Multiplicity is dropped: `prime_factors(12)` is
/// `[2, 3]`, not `[2, 2, 3]`.
///
/// # Returns
/// An empty vector for 0 and ±1
pub fn prime_factors(n: i64) -> Vec<u64> {
    prime_factors_u64(n.unsigned_abs())
}

/// [`prime_factors`] over the full `u64` range
pub(crate) fn prime_factors_u64(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    if n % 2 == 0 {
        factors.push(2);
        n >>= n.trailing_zeros();
    }

    let mut p = 3u64;
    while p <= n / p {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 2;
    }

    // Whatever remains is a prime larger than √n
    if n > 1 {
        factors.push(n);
    }

    factors
}

// =============================================================================
// HULL–DOBELL
// =============================================================================

/// Validate LCG parameters against the Hull–Dobell theorem
///
/// The iterative generator `x ← (A·x + B) mod N` has full period N iff:
/// 1. B and N are coprime
/// 2. A ≡ 1 (mod p) for every prime p dividing N
/// 3. A ≡ 1 (mod 4) if 4 divides N
pub fn hull_dobell_validate(n: u64, a: u64, b: u64) -> bool {
    if n == 0 || gcd_u64(b, n) != 1 {
        return false;
    }

    // (A − 1) mod p == 0  ⇔  A mod p == 1 for p ≥ 2
    if prime_factors_u64(n).into_iter().any(|p| a % p != 1) {
        return false;
    }

    if n % 4 == 0 && a % 4 != 1 {
        return false;
    }

    true
}

// =============================================================================
// ORDER & PERIOD
// =============================================================================

/// Multiplicative order of A modulo N
///
/// The least k > 0 with A^k ≡ 1 (mod N).
///
/// # Returns
/// `None` if A and N are not coprime (or N is 0), `Some(1)` for N = 1
pub fn multiplicative_order(a: u64, n: u64) -> Option<u64> {
    if n == 0 || gcd_u64(a, n) != 1 {
        return None;
    }
    if n == 1 {
        return Some(1);
    }

    let base = a % n;
    let mut current = base;
    let mut order = 1u64;
    while current != 1 {
        current = ((current as u128 * base as u128) % n as u128) as u64;
        order += 1;
        // The order divides φ(N) < N, so this only trips on a logic error
        if order > n {
            return None;
        }
    }

    Some(order)
}

/// Period of the iterative LCG `x ← (A·x + B) mod N`
///
/// # Returns
/// `Some(N)` when Hull–Dobell holds. `None` means "not analyzed", which is
/// not the same as "not full".
pub fn lcg_period(n: u64, a: u64, b: u64) -> Option<u64> {
    if hull_dobell_validate(n, a, b) {
        Some(n)
    } else {
        None
    }
}

// =============================================================================
// TESTS
// =============================================================================
