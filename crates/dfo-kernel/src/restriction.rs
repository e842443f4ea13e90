//! Restriction-vector generation: the combinatorial leaf of every search.
//!
//! A restriction vector of length k is a nondecreasing integer sequence `v`
//! with `lower[i] ≤ v[i] ≤ upper[i]` for every position, and optionally
//! `v[i] ≤ v[i−1] + step`. The generator walks the tree of such vectors depth
//! first on an explicit stack (the vector itself), pruning every branch whose
//! admissible range `[max(v[i−1], lower[i]), upper[i]]` is empty. Vectors are
//! produced in lexicographic order.
//!
//! The same generator grows operator rows in the enumerator and produces
//! the dominated sequences of the fixed-column counter.

use crate::budget::NodeMeter;
use crate::error::DfoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Running,
    Exhausted,
}

/// Depth-first generator of bounded nondecreasing vectors.
#[derive(Debug, Clone)]
pub struct RestrictionGenerator {
    lower: Vec<u32>,
    upper: Vec<u32>,
    step: Option<u32>,
    current: Vec<u32>,
    phase: Phase,
}

impl RestrictionGenerator {
    /// Vectors with `lower[i] ≤ v[i] ≤ upper[i]`.
    pub fn new(lower: Vec<u32>, upper: Vec<u32>) -> Result<Self, DfoError> {
        if lower.len() != upper.len() {
            return Err(DfoError::DimensionMismatch {
                expected: upper.len(),
                actual: lower.len(),
            });
        }
        let capacity = upper.len();
        Ok(Self {
            lower,
            upper,
            step: None,
            current: Vec::with_capacity(capacity),
            phase: Phase::Fresh,
        })
    }

    /// Vectors bounded above by `upper` and below by zero.
    pub fn bounded_by(upper: Vec<u32>) -> Self {
        let lower = vec![0; upper.len()];
        let capacity = upper.len();
        Self {
            lower,
            upper,
            step: None,
            current: Vec::with_capacity(capacity),
            phase: Phase::Fresh,
        }
    }

    /// Raise the floor of the first entry to `seed`.
    pub fn with_seed(mut self, seed: u32) -> Self {
        if let Some(first) = self.lower.first_mut() {
            *first = (*first).max(seed);
        }
        self
    }

    /// Require `v[i] ≤ v[i−1] + step`.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn len(&self) -> usize {
        self.upper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }

    /// Admissible range at position `i` given the entries already placed.
    fn range(&self, i: usize) -> (u32, u32) {
        match i.checked_sub(1).map(|prev| self.current[prev]) {
            None => (self.lower[0], self.upper[0]),
            Some(prev) => {
                let hi = match self.step {
                    Some(step) => self.upper[i].min(prev.saturating_add(step)),
                    None => self.upper[i],
                };
                (self.lower[i].max(prev), hi)
            }
        }
    }

    /// Extend the partial vector with minimal admissible entries, backtracking
    /// over dead ends. Returns false once the tree is exhausted.
    fn descend(&mut self, meter: &mut NodeMeter) -> Result<bool, DfoError> {
        while self.current.len() < self.upper.len() {
            let (lo, hi) = self.range(self.current.len());
            if lo <= hi {
                meter.tick()?;
                self.current.push(lo);
            } else if !self.backtrack(meter)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Increment the deepest entry that still has room, dropping everything
    /// after it.
    fn backtrack(&mut self, meter: &mut NodeMeter) -> Result<bool, DfoError> {
        while let Some(last) = self.current.pop() {
            let (_, hi) = self.range(self.current.len());
            if last < hi {
                meter.tick()?;
                self.current.push(last + 1);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The next vector, charging every placed entry to `meter`.
    pub fn next_within(&mut self, meter: &mut NodeMeter) -> Result<Option<&[u32]>, DfoError> {
        let found = match self.phase {
            Phase::Exhausted => false,
            Phase::Fresh => {
                self.phase = Phase::Running;
                self.descend(meter)?
            }
            Phase::Running => self.backtrack(meter)? && self.descend(meter)?,
        };
        if found {
            Ok(Some(&self.current))
        } else {
            self.phase = Phase::Exhausted;
            Ok(None)
        }
    }
}

impl Iterator for RestrictionGenerator {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut meter = NodeMeter::unlimited();
        match self.next_within(&mut meter) {
            Ok(found) => found.map(<[u32]>::to_vec),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::SearchBudget;

    #[test]
    fn bounded_vectors_in_lexicographic_order() {
        let all: Vec<Vec<u32>> = RestrictionGenerator::bounded_by(vec![1, 2]).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2]
            ]
        );
    }

    #[test]
    fn counts_match_binomial() {
        // Nondecreasing vectors of length k over {0..m}: C(m+k, k).
        let count = RestrictionGenerator::bounded_by(vec![3; 4]).count();
        assert_eq!(count, 35);
    }

    #[test]
    fn lower_bounds_and_seed_prune() {
        let generator = RestrictionGenerator::new(vec![0, 2, 0], vec![2, 2, 3])
            .unwrap()
            .with_seed(1);
        let all: Vec<Vec<u32>> = generator.collect();
        assert_eq!(
            all,
            vec![vec![1, 2, 2], vec![1, 2, 3], vec![2, 2, 2], vec![2, 2, 3]]
        );
    }

    #[test]
    fn empty_range_yields_nothing() {
        let generator = RestrictionGenerator::new(vec![0, 3], vec![3, 2]).unwrap();
        assert_eq!(generator.count(), 0);
    }

    #[test]
    fn dead_ends_deeper_in_the_tree_backtrack() {
        // v[0] ∈ {2, 3} leaves no room at position 1.
        let generator = RestrictionGenerator::new(vec![0, 0, 0], vec![3, 1, 3]).unwrap();
        let all: Vec<Vec<u32>> = generator.collect();
        assert_eq!(all.len(), 4 + 3 + 3);
        assert!(all.iter().all(|v| v[0] <= 1 && v[1] <= 1));
    }

    #[test]
    fn step_bound_limits_jumps() {
        let all: Vec<Vec<u32>> = RestrictionGenerator::new(vec![0, 0, 2], vec![0, 2, 2])
            .unwrap()
            .with_step(1)
            .collect();
        assert_eq!(all, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn zero_length_yields_single_empty_vector() {
        let all: Vec<Vec<u32>> = RestrictionGenerator::bounded_by(vec![]).collect();
        assert_eq!(all, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn mismatched_bounds_rejected() {
        assert_eq!(
            RestrictionGenerator::new(vec![0], vec![1, 1]).unwrap_err(),
            DfoError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn budget_interrupts_generation() {
        let mut generator = RestrictionGenerator::bounded_by(vec![5; 5]);
        let mut meter = SearchBudget::nodes(8).meter();
        let mut produced = 0;
        let outcome = loop {
            match generator.next_within(&mut meter) {
                Ok(Some(_)) => produced += 1,
                Ok(None) => break Ok(()),
                Err(err) => break Err(err),
            }
        };
        assert!(matches!(outcome, Err(DfoError::BudgetExhausted { .. })));
        assert!(produced > 0);
    }
}
