//! Decreasing sequences: the first columns of plane partitions.

use crate::chain::FiniteChain;
use crate::error::DfoError;
use std::fmt;

/// A nonincreasing sequence of length n with entries in [0, n].
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DecreasingSequence(Vec<u32>);

impl DecreasingSequence {
    pub fn new(chain: FiniteChain, values: Vec<u32>) -> Result<Self, DfoError> {
        let n = chain.n();
        if values.len() != n as usize {
            return Err(DfoError::DimensionMismatch {
                expected: n as usize,
                actual: values.len(),
            });
        }
        if values.windows(2).any(|w| w[0] < w[1]) {
            return Err(DfoError::InvalidSequence {
                sequence: values,
                reason: "entries must be nonincreasing".into(),
            });
        }
        if values.iter().any(|&v| v > n) {
            return Err(DfoError::InvalidSequence {
                sequence: values,
                reason: format!("entries must not exceed {n}"),
            });
        }
        Ok(Self(values))
    }

    /// (n, n−1, …, 1): the first column forced by the neutrality principle.
    pub fn staircase(chain: FiniteChain) -> Self {
        Self((1..=chain.n()).rev().collect())
    }

    /// Build from a nondecreasing vector by reversing it.
    pub(crate) fn from_increasing(mut increasing: Vec<u32>) -> Self {
        increasing.reverse();
        Self(increasing)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The same entries in nondecreasing order.
    pub fn increasing(&self) -> Vec<u32> {
        self.0.iter().rev().copied().collect()
    }

    /// Entrywise ≤.
    pub fn dominated_by(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a <= b)
    }
}

impl fmt::Display for DecreasingSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "({})", parts.join(","))
    }
}
