//! Order-sensitive fingerprints of enumerated operator sets.

use crate::matrix::OperatorMatrix;
use sha2::{Digest, Sha256};

/// Folds every operator of a search into one SHA-256 digest, so two runs
/// can be compared without keeping either set around.
#[derive(Clone, Default)]
pub struct OperatorSetDigest {
    hasher: Sha256,
    count: u64,
}

impl OperatorSetDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operator: &OperatorMatrix) {
        operator.feed(&mut self.hasher);
        self.hasher.update([0xff]);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finish(self) -> String {
        let mut hasher = self.hasher;
        hasher.update(self.count.to_le_bytes());
        format!("dfos1_{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for OperatorSetDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorSetDigest")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<'a> Extend<&'a OperatorMatrix> for OperatorSetDigest {
    fn extend<I: IntoIterator<Item = &'a OperatorMatrix>>(&mut self, iter: I) {
        for operator in iter {
            self.push(operator);
        }
    }
}
