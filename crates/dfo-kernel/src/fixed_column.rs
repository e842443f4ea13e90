//! Fixed-column counting.
//!
//! [`bounded_plane_partition_count`] counts plane partitions whose first
//! column is *at most* a decreasing sequence S. The number whose first column
//! is *exactly* S follows by Möbius inversion over the dominance order:
//!
//! ```text
//! exact(S) = bounded(S) − Σ_{T < S} exact(T)
//! ```
//!
//! Every strictly dominated T is produced by the restriction generator in
//! its increasing form. Lexicographic order on increasing forms is a linear
//! extension of dominance, so filling the table in generation order computes
//! every dependency before it is read. Sequences (i, 0, …, 0) are seeded with
//! the closed form C(n+i−1, i).
//!
//! The [`PartialCountTable`] belongs to one call and is handed back with the
//! result; nothing is cached across calls.

use crate::budget::SearchBudget;
use crate::error::DfoError;
use crate::exact::{binomial, natural, signed};
use crate::plane_partition::bounded_plane_partition_count;
use crate::restriction::RestrictionGenerator;
use crate::sequence::DecreasingSequence;
use num_bigint::{BigInt, BigUint};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Exact counts of every strictly dominated sequence, in fill order.
#[derive(Debug, Clone, Default)]
pub struct PartialCountTable {
    order: Vec<DecreasingSequence>,
    counts: HashMap<DecreasingSequence, BigUint>,
}

impl PartialCountTable {
    fn insert(&mut self, sequence: DecreasingSequence, count: BigUint) {
        self.order.push(sequence.clone());
        self.counts.insert(sequence, count);
    }

    pub fn get(&self, sequence: &DecreasingSequence) -> Option<&BigUint> {
        self.counts.get(sequence)
    }

    /// Entries in the order they were filled.
    pub fn iter(&self) -> impl Iterator<Item = (&DecreasingSequence, &BigUint)> {
        self.order
            .iter()
            .filter_map(|sequence| self.counts.get(sequence).map(|count| (sequence, count)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn total(&self) -> BigUint {
        self.counts.values().sum()
    }
}

/// Result of one fixed-column query.
#[derive(Debug, Clone)]
pub struct FixedColumnCount {
    pub sequence: DecreasingSequence,
    pub count: BigUint,
    pub partials: PartialCountTable,
}

/// Number of plane partitions with n rows whose first column equals
/// `sequence` exactly.
pub fn fixed_column_count(
    n: u32,
    sequence: &DecreasingSequence,
    budget: SearchBudget,
) -> Result<FixedColumnCount, DfoError> {
    if sequence.len() != n as usize {
        return Err(DfoError::DimensionMismatch {
            expected: n as usize,
            actual: sequence.len(),
        });
    }

    let target = sequence.increasing();
    let mut meter = budget.meter();
    let mut generator = RestrictionGenerator::bounded_by(target.clone());
    let mut candidates: Vec<Vec<u32>> = Vec::new();
    while let Some(candidate) = generator.next_within(&mut meter)? {
        if candidate != target.as_slice() {
            candidates.push(candidate.to_vec());
        }
    }
    debug!(
        n,
        sequence = %sequence,
        candidates = candidates.len(),
        "filling fixed-column table"
    );

    let mut filled: Vec<(Vec<u32>, BigInt)> = Vec::with_capacity(candidates.len());
    let mut partials = PartialCountTable::default();
    for candidate in candidates {
        meter.tick()?;
        let key = DecreasingSequence::from_increasing(candidate.clone());
        let count = match candidate.split_last() {
            Some((&last, rest)) if rest.iter().all(|&v| v == 0) => {
                binomial(i64::from(n) + i64::from(last) - 1, i64::from(last))
            }
            _ => {
                let bounded = signed(&bounded_plane_partition_count(n, &key)?);
                filled
                    .iter()
                    .filter(|(earlier, _)| dominates(&candidate, earlier))
                    .fold(bounded, |acc, (_, count)| acc - count)
            }
        };
        trace!(sequence = %key, count = %count, "fixed-column entry");
        partials.insert(key, natural("fixed_column_count", count.clone())?);
        filled.push((candidate, count));
    }

    let bounded = signed(&bounded_plane_partition_count(n, sequence)?);
    let exact = filled.iter().fold(bounded, |acc, (_, count)| acc - count);
    let count = natural("fixed_column_count", exact)?;
    debug!(
        n,
        sequence = %sequence,
        count = %count,
        visited = meter.visited(),
        "fixed-column count"
    );

    Ok(FixedColumnCount {
        sequence: sequence.clone(),
        count,
        partials,
    })
}

/// Whether `lower` is entrywise ≤ `upper`.
fn dominates(upper: &[u32], lower: &[u32]) -> bool {
    upper.iter().zip(lower).all(|(u, l)| l <= u)
}
