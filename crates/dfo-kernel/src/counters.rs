//! Exact cardinalities of the operator classes.
//!
//! Each class count is a fixed combination of the plane-partition closed
//! forms, chosen by inclusion–exclusion over the class's boundary rules:
//!
//! | class | count |
//! |---|---|
//! | aggregation | PP(n+1,n+1,n) − 2·PP(n+1,n+1,n−1) + PP(n+1,n+1,n−2) |
//! | commutative aggregation | same with SPP(n+1, ·) |
//! | conjunction | PP(n,n,n) − PP(n,n,n−1) |
//! | commutative conjunction | SPP(n,n) − SPP(n,n−1) |
//! | smooth | ∏ (3k+1)!/(n+k)! |
//! | NP | fixed column (n, n−1, …, 1) |
//! | CB | NP + partial fixed columns starting at n |
//! | IP | staircase(n,n+1,1,n+1) − staircase(n,n+1,1,n) |
//! | OP | staircase(n,n+1,1,n) − staircase(n,n+1,1,n−1) |
//! | copula | n! |
//! | t-norm | grown from the t-norms on L_{n−1} |
//! | negation | C(2n−1, n) |
//!
//! Implication classes and t-conorms share the count of their dual
//! conjunction class. Copulas on L_n correspond to n×n permutation matrices
//! through their unit-square volumes.

use crate::budget::SearchBudget;
use crate::chain::FiniteChain;
use crate::class::OperatorClass;
use crate::enumerate::enumerate_operators;
use crate::error::DfoError;
use crate::exact::{binomial, factorial, natural, signed};
use crate::fixed_column::fixed_column_count;
use crate::negation::enumerate_negations;
use crate::plane_partition::{
    plane_partition_count, smooth_operator_count, staircase_plane_partition_count,
    symmetric_plane_partition_count,
};
use crate::sequence::DecreasingSequence;
use crate::t_norm::count_t_norms_by_extension;
use num_bigint::{BigInt, BigUint};
use tracing::{debug, info};

/// Exact number of operators of `class` on L_n, without a search budget.
pub fn count_operators(n: u32, class: OperatorClass) -> Result<BigUint, DfoError> {
    count_operators_within(n, class, SearchBudget::UNLIMITED)
}

/// Exact number of operators of `class` on L_n.
///
/// Product formulas are charged [`closed_form_factors`] nodes before they
/// run; the NP, CB and t-norm counts are metered by their own searches.
pub fn count_operators_within(
    n: u32,
    class: OperatorClass,
    budget: SearchBudget,
) -> Result<BigUint, DfoError> {
    let chain = FiniteChain::new(n)?;
    let searched = class.conjunction_dual().unwrap_or(class);
    budget.meter().charge(closed_form_factors(searched, n))?;
    let counted = match class.conjunction_dual() {
        Some(dual) => {
            debug!(class = %class, dual = %dual, "counting through the dual conjunction class");
            count_class(chain, dual, budget)?
        }
        None => count_class(chain, class, budget)?,
    };
    info!(class = %class, n, count = %counted, "counted operators");
    Ok(counted)
}

fn count_class(
    chain: FiniteChain,
    class: OperatorClass,
    budget: SearchBudget,
) -> Result<BigUint, DfoError> {
    let n = chain.n();
    let c = i64::from(n);
    match class {
        OperatorClass::Aggregation => {
            let pp = |bound| plane_partition_count(n + 1, n + 1, bound).map(|v| signed(&v));
            let value = pp(c)? - BigInt::from(2) * pp(c - 1)? + pp(c - 2)?;
            natural("aggregation_count", value)
        }
        OperatorClass::CommutativeAggregation => {
            let spp = |bound| symmetric_plane_partition_count(n + 1, bound).map(|v| signed(&v));
            let value = spp(c)? - BigInt::from(2) * spp(c - 1)? + spp(c - 2)?;
            natural("commutative_aggregation_count", value)
        }
        OperatorClass::Conjunction => {
            let value = signed(&plane_partition_count(n, n, c)?)
                - signed(&plane_partition_count(n, n, c - 1)?);
            natural("conjunction_count", value)
        }
        OperatorClass::CommutativeConjunction => {
            let value = signed(&symmetric_plane_partition_count(n, c)?)
                - signed(&symmetric_plane_partition_count(n, c - 1)?);
            natural("commutative_conjunction_count", value)
        }
        OperatorClass::SmoothConjunction => smooth_operator_count(n),
        OperatorClass::NpConjunction => {
            Ok(fixed_column_count(n, &DecreasingSequence::staircase(chain), budget)?.count)
        }
        OperatorClass::CbConjunction => {
            let np = fixed_column_count(n, &DecreasingSequence::staircase(chain), budget)?;
            let topped: BigUint = np
                .partials
                .iter()
                .filter(|(sequence, _)| sequence.as_slice().first() == Some(&n))
                .map(|(_, count)| count)
                .sum();
            Ok(np.count + topped)
        }
        OperatorClass::IpConjunction => {
            let value = signed(&staircase_plane_partition_count(n, n + 1, 1, n + 1)?)
                - signed(&staircase_plane_partition_count(n, n + 1, 1, n)?);
            natural("ip_conjunction_count", value)
        }
        // The staircase with parts at most n − 1 leaves its domain at n = 1,
        // where the only conjunction is the drastic one.
        OperatorClass::OpConjunction if n == 1 => Ok(BigUint::from(1u32)),
        OperatorClass::OpConjunction => {
            let value = signed(&staircase_plane_partition_count(n, n + 1, 1, n)?)
                - signed(&staircase_plane_partition_count(n, n + 1, 1, n - 1)?);
            natural("op_conjunction_count", value)
        }
        OperatorClass::Copula => natural("copula_count", factorial(u64::from(n))),
        OperatorClass::TNorm => {
            Ok(count_t_norms_by_extension(n, budget)?.pop().unwrap_or_default())
        }
        OperatorClass::Negation => natural("negation_count", binomial(2 * c - 1, c)),
        derived => match derived.conjunction_dual() {
            Some(dual) => count_class(chain, dual, budget),
            None => Err(DfoError::NotEnumerable {
                class: derived.to_string(),
            }),
        },
    }
}

/// Number of exact factors the product formula for `class` multiplies on
/// L_n; zero for classes counted by a metered search.
pub fn closed_form_factors(class: OperatorClass, n: u32) -> u64 {
    let n = u64::from(n);
    let box_factors = |a: u64, b: u64, c: u64| a.saturating_mul(b).saturating_mul(c);
    let triangle = |a: u64| a.saturating_mul(a + 1) / 2;
    match class {
        OperatorClass::Aggregation => box_factors(n + 1, n + 1, n)
            .saturating_add(box_factors(n + 1, n + 1, n.saturating_sub(1)))
            .saturating_add(box_factors(n + 1, n + 1, n.saturating_sub(2))),
        OperatorClass::CommutativeAggregation => triangle(n + 1).saturating_mul(3),
        OperatorClass::Conjunction => {
            box_factors(n, n, n).saturating_add(box_factors(n, n, n.saturating_sub(1)))
        }
        OperatorClass::CommutativeConjunction => triangle(n).saturating_mul(2),
        OperatorClass::IpConjunction | OperatorClass::OpConjunction => n.saturating_mul(4),
        OperatorClass::SmoothConjunction | OperatorClass::Copula | OperatorClass::Negation => n,
        _ => 0,
    }
}

/// Count by running the search to completion: the brute-force oracle every
/// closed form is checked against.
pub fn count_exhaustive(
    n: u32,
    class: OperatorClass,
    budget: SearchBudget,
) -> Result<BigUint, DfoError> {
    let mut total: u64 = 0;
    if class.is_binary() {
        for operator in enumerate_operators(n, class, budget)? {
            operator?;
            total += 1;
        }
    } else {
        for negation in enumerate_negations(n, budget)? {
            negation?;
            total += 1;
        }
    }
    debug!(class = %class, n, count = total, "exhaustive count");
    Ok(BigUint::from(total))
}
