//! Counting t-norms by growing them one element at a time.
//!
//! A t-norm T on L_{m+1} restricted to {0, …, m−1}² is the corresponding
//! block of a t-norm on L_m, so every t-norm on L_{m+1} arises from one on
//! L_m by choosing the row (and, by symmetry, the column) of the new
//! penultimate element m:
//!
//! ```text
//! row m:  0 ≤ T(m,1) ≤ … ≤ T(m,m),   T(m−1,y) ≤ T(m,y) ≤ y
//! ```
//!
//! The candidate rows are exactly the restriction vectors with those
//! bounds, and only candidates passing the associativity check are kept.
//! The tree of t-norms is walked depth first, so no whole level is ever
//! held in memory.

use crate::budget::{NodeMeter, SearchBudget};
use crate::chain::FiniteChain;
use crate::error::DfoError;
use crate::matrix::OperatorMatrix;
use crate::restriction::RestrictionGenerator;
use num_bigint::BigUint;
use tracing::debug;

/// Number of t-norms on L_1, …, L_max_n; entry i holds the count for
/// n = i + 1.
pub fn count_t_norms_by_extension(
    max_n: u32,
    budget: SearchBudget,
) -> Result<Vec<BigUint>, DfoError> {
    let top = FiniteChain::new(max_n)?;
    let mut meter = budget.meter();
    let mut counts = vec![0u64; top.len() - 1];

    // The only t-norm on L_1 is the table [[0, 0], [0, 1]].
    let seed = OperatorMatrix::from_values(FiniteChain::new(1)?, vec![0, 0, 0, 1]);
    counts[0] = 1;
    let mut pending = vec![seed];
    while let Some(t_norm) = pending.pop() {
        if t_norm.n() == max_n {
            continue;
        }
        for extension in extensions(&t_norm, &mut meter)? {
            counts[extension.n() as usize - 1] += 1;
            pending.push(extension);
        }
    }

    debug!(max_n, counts = ?counts, visited = meter.visited(), "t-norm tree complete");
    Ok(counts.into_iter().map(BigUint::from).collect())
}

/// Every t-norm on L_{m+1} whose lower block agrees with `t_norm` on L_m.
fn extensions(
    t_norm: &OperatorMatrix,
    meter: &mut NodeMeter,
) -> Result<Vec<OperatorMatrix>, DfoError> {
    let m = t_norm.n();
    let chain = FiniteChain::new(m + 1)?;
    let side = chain.len();

    let mut lower = vec![0; m as usize + 1];
    for y in 1..m {
        lower[y as usize] = t_norm.evaluate(m - 1, y);
    }
    let upper: Vec<u32> = (0..=m).collect();

    let mut found = Vec::new();
    let mut rows = RestrictionGenerator::new(lower, upper)?;
    while let Some(row) = rows.next_within(meter)? {
        let mut values = vec![0; side * side];
        for x in 0..m {
            for y in 0..m {
                values[x as usize * side + y as usize] = t_norm.evaluate(x, y);
            }
        }
        for (y, &value) in row.iter().enumerate() {
            values[m as usize * side + y] = value;
            values[y * side + m as usize] = value;
        }
        for a in chain.elements() {
            values[(m as usize + 1) * side + a as usize] = a;
            values[a as usize * side + m as usize + 1] = a;
        }
        let candidate = OperatorMatrix::from_values(chain, values);
        if candidate.is_associative() {
            found.push(candidate);
        }
    }
    Ok(found)
}
