//! The finite chain L_n = {0, 1, …, n}.

use crate::error::DfoError;
use std::ops::RangeInclusive;

/// The totally ordered set {0, …, n} with n ≥ 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct FiniteChain(u32);

impl FiniteChain {
    pub fn new(n: u32) -> Result<Self, DfoError> {
        if n == 0 {
            return Err(DfoError::InvalidChain { n });
        }
        Ok(Self(n))
    }

    /// The top element n.
    pub fn n(self) -> u32 {
        self.0
    }

    /// Number of elements, n + 1.
    pub fn len(self) -> usize {
        self.0 as usize + 1
    }

    /// Always false: a chain holds at least {0, 1}.
    pub fn is_empty(self) -> bool {
        false
    }

    pub fn elements(self) -> RangeInclusive<u32> {
        0..=self.0
    }

    pub fn contains(self, value: i64) -> bool {
        (0..=i64::from(self.0)).contains(&value)
    }

    /// The strong negation x ↦ n − x.
    pub fn complement(self, x: u32) -> u32 {
        self.0 - x
    }
}

impl TryFrom<u32> for FiniteChain {
    type Error = DfoError;

    fn try_from(n: u32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<FiniteChain> for u32 {
    fn from(chain: FiniteChain) -> Self {
        chain.0
    }
}

impl std::fmt::Display for FiniteChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "L_{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_trivial_chain() {
        assert_eq!(
            FiniteChain::new(0).unwrap_err(),
            DfoError::InvalidChain { n: 0 }
        );
    }

    #[test]
    fn elements_and_membership() {
        let chain = FiniteChain::new(3).unwrap();
        assert_eq!(chain.len(), 4);
        assert_eq!(chain.elements().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert!(chain.contains(3));
        assert!(!chain.contains(4));
        assert!(!chain.contains(-1));
        assert_eq!(chain.complement(1), 2);
        assert_eq!(chain.to_string(), "L_3");
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<FiniteChain>("0").is_err());
        assert_eq!(
            serde_json::from_str::<FiniteChain>("2").unwrap(),
            FiniteChain::new(2).unwrap()
        );
    }
}
