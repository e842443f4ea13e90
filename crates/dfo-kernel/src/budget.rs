//! Search-node budgets for the combinatorially explosive computations.
//!
//! Both full enumeration and the fixed-column recursion grow
//! super-exponentially in n. A [`SearchBudget`] caps the number of search
//! nodes (restriction-vector entries placed) a single invocation may visit,
//! so callers can abort gracefully instead of exhausting memory or time.
//! Closed forms are charged one node per exact factor they multiply, up
//! front, before any arithmetic runs.

use crate::error::DfoError;

/// Caller-facing budget configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchBudget {
    /// Maximum number of search nodes; `None` is unbounded.
    pub max_nodes: Option<u64>,
}

impl SearchBudget {
    pub const UNLIMITED: Self = Self { max_nodes: None };

    pub fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }

    /// Start metering one invocation against this budget.
    pub fn meter(self) -> NodeMeter {
        NodeMeter {
            limit: self.max_nodes,
            visited: 0,
        }
    }
}

/// Running node count for one invocation.
#[derive(Debug, Clone)]
pub struct NodeMeter {
    limit: Option<u64>,
    visited: u64,
}

impl NodeMeter {
    pub fn unlimited() -> Self {
        SearchBudget::UNLIMITED.meter()
    }

    /// Record one visited node, failing once the limit is exceeded.
    pub fn tick(&mut self) -> Result<(), DfoError> {
        self.charge(1)
    }

    /// Record `nodes` visited nodes at once.
    pub fn charge(&mut self, nodes: u64) -> Result<(), DfoError> {
        self.visited = self.visited.saturating_add(nodes);
        match self.limit {
            Some(limit) if self.visited > limit => Err(DfoError::BudgetExhausted {
                visited: self.visited,
                limit,
            }),
            _ => Ok(()),
        }
    }

    pub fn visited(&self) -> u64 {
        self.visited
    }
}
