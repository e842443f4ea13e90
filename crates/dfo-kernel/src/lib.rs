//! # DFO Kernel
//!
//! Discrete fuzzy operators on the finite chain L_n = {0, …, n}: binary
//! functions F: L_n × L_n → L_n constrained by monotonicity, boundary values
//! and symmetry.
//!
//! The kernel answers two questions about a class of operators. Which
//! operators does it contain? (constrained backtracking enumeration.) How
//! many are there? (exact plane-partition formulas, without building a
//! single operator.) Both answers are exact; no count ever passes through
//! floating point.
//!
//! ## Architecture
//!
//! ```text
//! FiniteChain / ClassSpec    ← L_n and the constraints naming a class
//!     │
//! OperatorMatrix             ← Value table, validated construction
//!     │
//! RestrictionGenerator       ← Bounded nondecreasing vectors (search leaf)
//!     │
//! OperatorEnumerator         ← Row-by-row search on an explicit frame stack
//!
//! plane_partition            ← MacMahon, symmetric, staircase, bounded
//!     │
//! fixed_column               ← Möbius inversion over the dominance order
//!     │
//! counters                   ← Per-class inclusion–exclusion
//!     │
//! t_norm                     ← T-norms grown from L_{n−1} to L_n
//! ```
//!
//! Enumeration and counting never depend on each other; the exhaustive
//! counter in [`counters`] bridges them for cross-checking.

pub mod budget;
pub mod chain;
pub mod class;
pub mod counters;
pub mod digest;
pub mod enumerate;
pub mod error;
pub mod exact;
pub mod fixed_column;
pub mod matrix;
pub mod negation;
pub mod plane_partition;
pub mod restriction;
pub mod sequence;
pub mod t_norm;

pub use budget::{NodeMeter, SearchBudget};
pub use chain::FiniteChain;
pub use class::{
    BoundaryRule, ClassSpec, Direction, Duality, Law, Monotonicity, OperatorClass, Symmetry,
};
pub use counters::{
    closed_form_factors, count_exhaustive, count_operators, count_operators_within,
};
pub use digest::OperatorSetDigest;
pub use enumerate::{OperatorEnumerator, enumerate_operators};
pub use error::{Constraint, DfoError, Severity, Violation};
pub use fixed_column::{FixedColumnCount, PartialCountTable, fixed_column_count};
pub use matrix::{Construction, OperatorMatrix, build_operator};
pub use negation::{DiscreteNegation, NegationEnumerator, enumerate_negations};
pub use plane_partition::{
    bounded_plane_partition_count, plane_partition_count, smooth_operator_count,
    staircase_plane_partition_count, symmetric_plane_partition_count,
};
pub use restriction::RestrictionGenerator;
pub use sequence::DecreasingSequence;
pub use t_norm::count_t_norms_by_extension;

pub use num_bigint::BigUint;
