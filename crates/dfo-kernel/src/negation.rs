//! Discrete negations: nonincreasing N: L_n → L_n with N(0) = n, N(n) = 0.
//!
//! Reading N from n down to 0 gives a nondecreasing vector pinned to 0 and n
//! at its ends, so the restriction generator enumerates negations directly.
//! There are C(2n−1, n) of them.

use crate::budget::{NodeMeter, SearchBudget};
use crate::chain::FiniteChain;
use crate::error::DfoError;
use crate::restriction::RestrictionGenerator;
use tracing::{info, warn};

/// A negation on L_n, stored as its values N(0), …, N(n).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize)]
pub struct DiscreteNegation {
    chain: FiniteChain,
    values: Vec<u32>,
}

impl DiscreteNegation {
    pub fn new(n: u32, values: Vec<i64>) -> Result<Self, DfoError> {
        let chain = FiniteChain::new(n)?;
        if values.len() != chain.len() {
            return Err(DfoError::DimensionMismatch {
                expected: chain.len(),
                actual: values.len(),
            });
        }
        if let Some((x, &value)) = values.iter().enumerate().find(|(_, v)| !chain.contains(**v)) {
            return Err(DfoError::UnaryRange {
                x: x as u32,
                value,
                n,
            });
        }
        let values: Vec<u32> = values.into_iter().map(|v| v as u32).collect();
        if values.windows(2).any(|w| w[0] < w[1]) {
            return Err(DfoError::InvalidSequence {
                sequence: values,
                reason: "a negation must be nonincreasing".into(),
            });
        }
        if values.first() != Some(&n) || values.last() != Some(&0) {
            return Err(DfoError::InvalidSequence {
                sequence: values,
                reason: format!("a negation must map 0 to {n} and {n} to 0"),
            });
        }
        Ok(Self { chain, values })
    }

    /// The strong negation x ↦ n − x.
    pub fn strong(chain: FiniteChain) -> Self {
        Self {
            chain,
            values: chain.elements().map(|x| chain.complement(x)).collect(),
        }
    }

    pub fn chain(&self) -> FiniteChain {
        self.chain
    }

    pub fn evaluate(&self, x: u32) -> Option<u32> {
        self.values.get(x as usize).copied()
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// N(N(x)) = x for every x.
    pub fn is_involutive(&self) -> bool {
        self.values
            .iter()
            .enumerate()
            .all(|(x, &image)| self.values[image as usize] as usize == x)
    }
}

/// A single-pass search over every negation on L_n.
#[derive(Debug)]
pub struct NegationEnumerator {
    chain: FiniteChain,
    generator: RestrictionGenerator,
    meter: NodeMeter,
    done: bool,
    emitted: u64,
}

impl NegationEnumerator {
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Iterator for NegationEnumerator {
    type Item = Result<DiscreteNegation, DfoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.generator.next_within(&mut self.meter) {
            Ok(Some(reversed)) => {
                self.emitted += 1;
                let values = reversed.iter().rev().copied().collect();
                Some(Ok(DiscreteNegation {
                    chain: self.chain,
                    values,
                }))
            }
            Ok(None) => {
                self.done = true;
                info!(
                    n = self.chain.n(),
                    negations = self.emitted,
                    "negation enumeration finished"
                );
                None
            }
            Err(err) => {
                self.done = true;
                warn!(n = self.chain.n(), error = %err, "negation enumeration aborted");
                Some(Err(err))
            }
        }
    }
}

/// Start a fresh search over every negation on L_n.
pub fn enumerate_negations(n: u32, budget: SearchBudget) -> Result<NegationEnumerator, DfoError> {
    let chain = FiniteChain::new(n)?;
    let side = chain.len();
    let mut lower = vec![0; side];
    let mut upper = vec![n; side];
    upper[0] = 0;
    lower[side - 1] = n;
    Ok(NegationEnumerator {
        chain,
        generator: RestrictionGenerator::new(lower, upper)?,
        meter: budget.meter(),
        done: false,
        emitted: 0,
    })
}
