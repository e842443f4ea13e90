//! Exact integer and rational arithmetic shared by the closed forms.
//!
//! Every formula is accumulated as a [`BigRational`] or [`BigInt`] and only
//! converted to a count through [`exact_count`], which refuses anything that
//! is not a non-negative integer instead of rounding it.

use crate::error::DfoError;
use num_bigint::{BigInt, BigUint, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// k! for k ≥ 0.
pub fn factorial(k: u64) -> BigInt {
    (1..=k).fold(BigInt::one(), |acc, i| acc * i)
}

/// k!, failing with `FormulaDomain` for negative k.
pub fn checked_factorial(formula: &'static str, k: i64) -> Result<BigInt, DfoError> {
    u64::try_from(k)
        .map(factorial)
        .map_err(|_| DfoError::FormulaDomain {
            formula,
            description: format!("factorial of {k}"),
        })
}

/// C(n, k), zero outside 0 ≤ k ≤ n.
pub fn binomial(n: i64, k: i64) -> BigInt {
    if n < 0 || k < 0 || k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    // Each partial product C(n−k+i, i) is integral, so the division is exact.
    (1..=k).fold(BigInt::one(), |acc, i| acc * (n - k + i) / i)
}

/// Rising factorial z·(z+1)·…·(z+i−1) over the rationals.
pub fn rising_factorial(z: &BigRational, i: u32) -> BigRational {
    (0..i).fold(BigRational::one(), |acc, j| {
        acc * (z + BigRational::from_integer(BigInt::from(j)))
    })
}

/// Convert an exact rational into a count.
pub fn exact_count(formula: &'static str, value: BigRational) -> Result<BigUint, DfoError> {
    if !value.is_integer() {
        return Err(DfoError::NonIntegralResult {
            formula,
            value: value.to_string(),
        });
    }
    natural(formula, value.to_integer())
}

/// Convert an exact integer into a count.
pub fn natural(formula: &'static str, value: BigInt) -> Result<BigUint, DfoError> {
    if value.is_negative() {
        return Err(DfoError::NegativeCount {
            formula,
            value: value.to_string(),
        });
    }
    let (_, magnitude) = value.into_parts();
    Ok(magnitude)
}

/// Lift a count back into signed arithmetic.
pub fn signed(value: &BigUint) -> BigInt {
    BigInt::from_biguint(Sign::Plus, value.clone())
}

/// Determinant of a square integer matrix by fraction-free (Bareiss)
/// elimination. Every intermediate division is exact.
pub fn determinant(mut matrix: Vec<Vec<BigInt>>) -> BigInt {
    let size = matrix.len();
    if size == 0 {
        return BigInt::one();
    }

    let mut negate = false;
    let mut previous_pivot = BigInt::one();
    for k in 0..size - 1 {
        if matrix[k][k].is_zero() {
            let Some(swap) = (k + 1..size).find(|&r| !matrix[r][k].is_zero()) else {
                return BigInt::zero();
            };
            matrix.swap(k, swap);
            negate = !negate;
        }
        for i in k + 1..size {
            for j in k + 1..size {
                let cross = &matrix[i][j] * &matrix[k][k] - &matrix[i][k] * &matrix[k][j];
                let updated = cross / &previous_pivot;
                matrix[i][j] = updated;
            }
        }
        previous_pivot = matrix[k][k].clone();
    }

    let det = matrix[size - 1][size - 1].clone();
    if negate { -det } else { det }
}
