//! Error types for dfo kernel operations.

use std::fmt;

/// Errors arising from malformed input, exhausted budgets, or formula bugs.
///
/// `ConstraintViolation` is the only recoverable kind: construction reports
/// violations as data first (see [`crate::matrix::Construction`]) and only
/// raises this variant when a caller insists on a conforming operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DfoError {
    /// The chain size is not admissible (n must be at least 1).
    #[error("invalid chain: n must be >= 1, got {n}")]
    InvalidChain { n: u32 },

    /// A matrix does not have (n+1)×(n+1) entries.
    #[error("shape error: expected {expected_rows}x{expected_cols}, got {description}")]
    Shape {
        expected_rows: usize,
        expected_cols: usize,
        description: String,
    },

    /// A matrix entry lies outside [0, n].
    #[error("range error: F({x},{y}) = {value} lies outside [0,{n}]")]
    Range { x: u32, y: u32, value: i64, n: u32 },

    /// An entry of a unary operator lies outside [0, n].
    #[error("range error: N({x}) = {value} lies outside [0,{n}]")]
    UnaryRange { x: u32, value: i64, n: u32 },

    /// An operator fails the constraints of its requested class.
    #[error("constraint violation for {class}: {}", summarize(.violations))]
    ConstraintViolation {
        class: String,
        violations: Vec<Violation>,
    },

    /// A restriction vector does not have the length the call requires.
    #[error("dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A restriction or decreasing sequence is not monotone or exceeds n.
    #[error("invalid sequence {sequence:?}: {reason}")]
    InvalidSequence { sequence: Vec<u32>, reason: String },

    /// A closed form produced a non-integral exact rational.
    #[error("non-integral result from {formula}: {value}")]
    NonIntegralResult { formula: &'static str, value: String },

    /// A closed form produced a negative exact integer.
    #[error("negative count from {formula}: {value}")]
    NegativeCount { formula: &'static str, value: String },

    /// A closed form was evaluated outside the parameters it is defined on.
    #[error("{formula} is undefined for {description}")]
    FormulaDomain {
        formula: &'static str,
        description: String,
    },

    /// The search-node budget ran out before the computation finished.
    #[error("search budget exhausted after {visited} nodes (limit {limit})")]
    BudgetExhausted { visited: u64, limit: u64 },

    /// A matrix operation was requested for a class that is not binary.
    #[error("class {class} has no operator-matrix form")]
    NotEnumerable { class: String },
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no violations".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

/// Which family of class constraints was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Monotonicity,
    Boundary,
    Symmetry,
    Smoothness,
    Associativity,
    TwoIncreasing,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monotonicity => write!(f, "monotonicity"),
            Self::Boundary => write!(f, "boundary"),
            Self::Symmetry => write!(f, "symmetry"),
            Self::Smoothness => write!(f, "smoothness"),
            Self::Associativity => write!(f, "associativity"),
            Self::TwoIncreasing => write!(f, "two_increasing"),
        }
    }
}

/// Severity of a violation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A concrete failure of one class constraint at one cell.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    pub constraint: Constraint,
    pub severity: Severity,
    /// The offending cell (x, y), when the failure is local to one entry.
    pub cell: Option<(u32, u32)>,
    pub description: String,
}

impl Violation {
    pub fn at(constraint: Constraint, x: u32, y: u32, description: impl Into<String>) -> Self {
        Self {
            constraint,
            severity: Severity::Error,
            cell: Some((x, y)),
            description: description.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell {
            Some((x, y)) => write!(f, "{} at ({x},{y}): {}", self.constraint, self.description),
            None => write!(f, "{}: {}", self.constraint, self.description),
        }
    }
}
