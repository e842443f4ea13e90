//! Exact plane-partition counts.
//!
//! Plane partitions inside an a×b box with parts at most c are in bijection
//! with increasing a×b value tables over {0, …, c}, so these closed forms
//! count operator classes without building a single matrix:
//!
//! ```text
//! plane_partition_count(a, b, c)          MacMahon's box formula
//! symmetric_plane_partition_count(a, c)   transpose-symmetric partitions
//! staircase_plane_partition_count(r,l,k,m) partitions of a staircase shape
//! bounded_plane_partition_count(n, S)     first column entrywise ≤ S
//! smooth_operator_count(n)                unit-step value tables
//! ```
//!
//! Products are accumulated as exact rationals and converted with
//! [`exact_count`]; a fractional or negative result is an error, never
//! rounded away. A negative part bound `c` admits no partition and counts 0.

use crate::error::DfoError;
use crate::exact::{
    binomial, checked_factorial, determinant, exact_count, natural, rising_factorial,
};
use crate::sequence::DecreasingSequence;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::{One, Pow, Zero};

fn ratio(numerator: i64, denominator: i64) -> BigRational {
    BigRational::new(BigInt::from(numerator), BigInt::from(denominator))
}

/// ∏_{i≤a} ∏_{j≤b} ∏_{k≤c} (i+j+k−1)/(i+j+k−2).
pub fn plane_partition_count(a: u32, b: u32, c: i64) -> Result<BigUint, DfoError> {
    if c < 0 {
        return Ok(BigUint::zero());
    }
    let mut product = BigRational::one();
    for i in 1..=i64::from(a) {
        for j in 1..=i64::from(b) {
            for k in 1..=c {
                product *= ratio(i + j + k - 1, i + j + k - 2);
            }
        }
    }
    exact_count("plane_partition_count", product)
}

/// ∏_{i≤a} [(2i+c−1)/(2i−1) · ∏_{i<j≤a} (i+j+c−1)/(i+j−1)].
pub fn symmetric_plane_partition_count(a: u32, c: i64) -> Result<BigUint, DfoError> {
    if c < 0 {
        return Ok(BigUint::zero());
    }
    let a = i64::from(a);
    let mut product = BigRational::one();
    for i in 1..=a {
        product *= ratio(2 * i + c - 1, 2 * i - 1);
        for j in i + 1..=a {
            product *= ratio(i + j + c - 1, i + j - 1);
        }
    }
    exact_count("symmetric_plane_partition_count", product)
}

/// Plane partitions of a staircase shape with `r` rows, first row of length
/// `l`, each row `k` shorter than the previous, parts at most `m`.
///
/// Fails with `FormulaDomain` when a factorial argument turns negative.
pub fn staircase_plane_partition_count(
    r: u32,
    l: u32,
    k: u32,
    m: u32,
) -> Result<BigUint, DfoError> {
    const FORMULA: &str = "staircase_plane_partition_count";
    let (r, l, k, m) = (i64::from(r), i64::from(l), i64::from(k), i64::from(m));

    let mut factorials = BigRational::one();
    for i in 1..=r {
        let numerator = checked_factorial(FORMULA, m + l - k * i - 1)?;
        let denominator = checked_factorial(FORMULA, m + i - 2)?;
        factorials *= BigRational::new(numerator, denominator);
    }

    let mut rising = BigRational::one();
    for i in 1..=r {
        let z = BigRational::from_integer(BigInt::from(m)) + ratio(l - k * i, k + 1);
        let steps = u32::try_from(i - 1).map_err(|_| DfoError::FormulaDomain {
            formula: FORMULA,
            description: format!("rising factorial of length {}", i - 1),
        })?;
        let denominator = checked_factorial(FORMULA, r + l - i * (k + 1))?;
        rising *= rising_factorial(&z, steps) / BigRational::from_integer(denominator);
    }

    let pairs = u32::try_from(r * (r - 1) / 2).unwrap_or(0);
    let power = BigInt::from(k + 1).pow(pairs);

    let mut superfactorial = BigInt::one();
    for i in 2..r {
        let exponent = u32::try_from(r - i).unwrap_or(0);
        superfactorial *= BigInt::from(i).pow(exponent);
    }

    let total = factorials * rising * BigRational::from_integer(power * superfactorial);
    exact_count(FORMULA, total)
}

/// Plane partitions with n rows whose first column is entrywise at most
/// `restrictions`: det [C(n + S_t, n − s + t)]_{s,t=1..n}.
pub fn bounded_plane_partition_count(
    n: u32,
    restrictions: &DecreasingSequence,
) -> Result<BigUint, DfoError> {
    if restrictions.len() != n as usize {
        return Err(DfoError::DimensionMismatch {
            expected: n as usize,
            actual: restrictions.len(),
        });
    }
    let n = i64::from(n);
    let matrix = (1..=n)
        .map(|s| {
            restrictions
                .as_slice()
                .iter()
                .zip(1..=n)
                .map(|(&bound, t)| binomial(n + i64::from(bound), n - s + t))
                .collect()
        })
        .collect();
    natural("bounded_plane_partition_count", determinant(matrix))
}

/// ∏_{k=0}^{n−1} (3k+1)!/(n+k)!: increasing tables with unit steps.
pub fn smooth_operator_count(n: u32) -> Result<BigUint, DfoError> {
    const FORMULA: &str = "smooth_operator_count";
    let n = i64::from(n);
    let mut product = BigRational::one();
    for k in 0..n {
        product *= BigRational::new(
            checked_factorial(FORMULA, 3 * k + 1)?,
            checked_factorial(FORMULA, n + k)?,
        );
    }
    exact_count(FORMULA, product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::FiniteChain;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn macmahon_box_values() {
        assert_eq!(plane_partition_count(1, 1, 1).unwrap(), big(2));
        assert_eq!(plane_partition_count(2, 2, 2).unwrap(), big(20));
        assert_eq!(plane_partition_count(3, 3, 3).unwrap(), big(980));
        assert_eq!(plane_partition_count(2, 3, 0).unwrap(), big(1));
        assert_eq!(plane_partition_count(2, 3, -1).unwrap(), big(0));
    }

    #[test]
    fn box_counts_are_integral_up_to_six() {
        for a in 1..=6 {
            for b in 1..=6 {
                for c in 1..=6 {
                    let count = plane_partition_count(a, b, c).unwrap();
                    assert!(count > BigUint::zero(), "PP({a},{b},{c})");
                }
            }
        }
    }

    #[test]
    fn box_count_is_symmetric_in_its_dimensions() {
        assert_eq!(
            plane_partition_count(2, 5, 3).unwrap(),
            plane_partition_count(5, 2, 3).unwrap()
        );
        assert_eq!(
            plane_partition_count(2, 5, 3).unwrap(),
            plane_partition_count(3, 5, 2).unwrap()
        );
    }

    #[test]
    fn symmetric_values() {
        assert_eq!(symmetric_plane_partition_count(1, 3).unwrap(), big(4));
        assert_eq!(symmetric_plane_partition_count(2, 1).unwrap(), big(4));
        assert_eq!(symmetric_plane_partition_count(3, 3).unwrap(), big(112));
        assert_eq!(symmetric_plane_partition_count(3, -1).unwrap(), big(0));
    }

    #[test]
    fn staircase_values() {
        assert_eq!(staircase_plane_partition_count(1, 2, 1, 1).unwrap(), big(1));
        assert_eq!(staircase_plane_partition_count(1, 2, 1, 2).unwrap(), big(2));
        assert_eq!(staircase_plane_partition_count(2, 3, 1, 2).unwrap(), big(5));
        assert_eq!(staircase_plane_partition_count(2, 3, 1, 3).unwrap(), big(14));
    }

    #[test]
    fn staircase_out_of_domain() {
        // m + i − 2 < 0 at r = 1, m = 0.
        assert!(matches!(
            staircase_plane_partition_count(1, 2, 1, 0),
            Err(DfoError::FormulaDomain { .. })
        ));
    }

    #[test]
    fn bounded_count_with_full_column_is_the_box_count() {
        for n in 1..=4u32 {
            let chain = FiniteChain::new(n).unwrap();
            let full = DecreasingSequence::new(chain, vec![n; n as usize]).unwrap();
            assert_eq!(
                bounded_plane_partition_count(n, &full).unwrap(),
                plane_partition_count(n, n, i64::from(n)).unwrap(),
                "n = {n}"
            );
        }
    }

    #[test]
    fn bounded_count_small_cases() {
        let chain = FiniteChain::new(2).unwrap();
        let zero = DecreasingSequence::new(chain, vec![0, 0]).unwrap();
        assert_eq!(bounded_plane_partition_count(2, &zero).unwrap(), big(1));
        let one = DecreasingSequence::new(chain, vec![1, 0]).unwrap();
        assert_eq!(bounded_plane_partition_count(2, &one).unwrap(), big(3));
        let staircase = DecreasingSequence::staircase(chain);
        assert_eq!(bounded_plane_partition_count(2, &staircase).unwrap(), big(14));
    }

    #[test]
    fn bounded_count_rejects_wrong_length() {
        let chain = FiniteChain::new(2).unwrap();
        let seq = DecreasingSequence::new(chain, vec![1, 0]).unwrap();
        assert!(matches!(
            bounded_plane_partition_count(3, &seq),
            Err(DfoError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn smooth_values() {
        let values: Vec<BigUint> = (1..=4).map(|n| smooth_operator_count(n).unwrap()).collect();
        assert_eq!(values, vec![big(1), big(2), big(7), big(42)]);
    }
}
