//! Operator matrices and validated construction.
//!
//! An [`OperatorMatrix`] stores F: L_n × L_n → L_n as an (n+1)×(n+1) grid,
//! row-major, so `F(x, y)` sits at `x·(n+1) + y`. Shape and range are hard
//! invariants: no matrix with a wrong shape or an entry outside [0, n] is ever
//! constructed. Class constraints are soft: [`build_operator`] returns a
//! [`Construction`] carrying the matrix together with every constraint it
//! breaks, and the caller decides whether a non-conforming operator is usable.

use crate::chain::FiniteChain;
use crate::class::{ClassSpec, Direction, Duality, Law};
use crate::error::{Constraint, DfoError, Severity, Violation};
use sha2::{Digest, Sha256};
use std::fmt;

/// A binary operator on a finite chain, as a full value table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "MatrixRepr", into = "MatrixRepr")]
pub struct OperatorMatrix {
    chain: FiniteChain,
    values: Vec<u32>,
}

impl OperatorMatrix {
    /// Build from rows `F(x, ·)`, checking shape and range only.
    pub fn from_rows(chain: FiniteChain, rows: Vec<Vec<i64>>) -> Result<Self, DfoError> {
        let side = chain.len();
        if rows.len() != side {
            return Err(DfoError::Shape {
                expected_rows: side,
                expected_cols: side,
                description: format!("{} rows", rows.len()),
            });
        }
        if let Some((x, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != side) {
            return Err(DfoError::Shape {
                expected_rows: side,
                expected_cols: side,
                description: format!("row {x} with {} entries", row.len()),
            });
        }

        let mut values = Vec::with_capacity(side * side);
        for (x, row) in rows.iter().enumerate() {
            for (y, &value) in row.iter().enumerate() {
                if !chain.contains(value) {
                    return Err(DfoError::Range {
                        x: x as u32,
                        y: y as u32,
                        value,
                        n: chain.n(),
                    });
                }
                values.push(value as u32);
            }
        }
        Ok(Self { chain, values })
    }

    /// Wrap a row-major table the caller has already range-checked.
    pub(crate) fn from_values(chain: FiniteChain, values: Vec<u32>) -> Self {
        debug_assert_eq!(values.len(), chain.len() * chain.len());
        Self { chain, values }
    }

    pub fn chain(&self) -> FiniteChain {
        self.chain
    }

    pub fn n(&self) -> u32 {
        self.chain.n()
    }

    /// F(x, y).
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` exceeds n.
    pub fn evaluate(&self, x: u32, y: u32) -> u32 {
        let n = self.chain.n();
        assert!(x <= n && y <= n, "F({x},{y}) is outside L_{n}");
        self.values[self.index(x, y)]
    }

    /// F(x, y), or `None` outside the chain.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        let n = self.chain.n();
        (x <= n && y <= n).then(|| self.values[self.index(x, y)])
    }

    pub fn row(&self, x: u32) -> &[u32] {
        let side = self.chain.len();
        let start = x as usize * side;
        &self.values[start..start + side]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.values.chunks(self.chain.len())
    }

    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.chain.len() + y as usize
    }

    /// The operator D(x, y) = n − F(x, n − y). An involution that maps
    /// conjunctions onto implications and back.
    pub fn dual(&self) -> Self {
        let n = self.chain.n();
        let mut values = Vec::with_capacity(self.values.len());
        for x in self.chain.elements() {
            for y in self.chain.elements() {
                values.push(n - self.evaluate(x, n - y));
            }
        }
        Self {
            chain: self.chain,
            values,
        }
    }

    /// The operator D(x, y) = n − F(n − x, n − y). An involution that maps
    /// t-norms onto t-conorms and back.
    pub fn conorm_dual(&self) -> Self {
        let n = self.chain.n();
        let values = self
            .values
            .iter()
            .rev()
            .map(|&value| n - value)
            .collect();
        Self {
            chain: self.chain,
            values,
        }
    }

    /// Apply `duality` to this table.
    pub fn apply(&self, duality: Duality) -> Self {
        match duality {
            Duality::Residual => self.dual(),
            Duality::Conorm => self.conorm_dual(),
        }
    }

    /// The first triple (x, y, z) with F(F(x,y),z) ≠ F(x,F(y,z)), if any.
    pub fn associativity_failure(&self) -> Option<(u32, u32, u32)> {
        let elements = self.chain.elements();
        for x in elements.clone() {
            for y in elements.clone() {
                let xy = self.evaluate(x, y);
                for z in elements.clone() {
                    if self.evaluate(xy, z) != self.evaluate(x, self.evaluate(y, z)) {
                        return Some((x, y, z));
                    }
                }
            }
        }
        None
    }

    pub fn is_associative(&self) -> bool {
        self.associativity_failure().is_none()
    }

    /// The 2-increasing inequality on the unit square whose upper corner is
    /// (x, y). Needs x, y ≥ 1.
    fn unit_square_volume(&self, x: u32, y: u32) -> i64 {
        let cell = |a, b| i64::from(self.evaluate(a, b));
        cell(x, y) - cell(x - 1, y) - cell(x, y - 1) + cell(x - 1, y - 1)
    }

    /// Every unit square carries a nonnegative volume, so every rectangle
    /// does.
    pub fn is_two_increasing(&self) -> bool {
        let n = self.chain.n();
        (1..=n).all(|x| (1..=n).all(|y| self.unit_square_volume(x, y) >= 0))
    }

    /// Every constraint of `spec` this operator breaks, in cell order.
    pub fn violations(&self, spec: &ClassSpec) -> Vec<Violation> {
        let mut violations = Vec::new();
        self.check_monotonicity(spec, &mut violations);
        self.check_boundary(spec, &mut violations);
        self.check_symmetry(spec, &mut violations);
        self.check_smoothness(spec, &mut violations);
        self.check_law(spec, &mut violations);
        violations
    }

    fn check_monotonicity(&self, spec: &ClassSpec, out: &mut Vec<Violation>) {
        let monotonicity = spec.monotonicity();
        for x in self.chain.elements() {
            for y in self.chain.elements() {
                let here = self.evaluate(x, y);
                if x > 0 {
                    let above = self.evaluate(x - 1, y);
                    if !ordered(monotonicity.first, above, here) {
                        out.push(Violation::at(
                            Constraint::Monotonicity,
                            x,
                            y,
                            format!(
                                "F({x},{y}) = {here} breaks {} order against F({},{y}) = {above}",
                                direction_name(monotonicity.first),
                                x - 1
                            ),
                        ));
                    }
                }
                if y > 0 {
                    let left = self.evaluate(x, y - 1);
                    if !ordered(monotonicity.second, left, here) {
                        out.push(Violation::at(
                            Constraint::Monotonicity,
                            x,
                            y,
                            format!(
                                "F({x},{y}) = {here} breaks {} order against F({x},{}) = {left}",
                                direction_name(monotonicity.second),
                                y - 1
                            ),
                        ));
                    }
                }
            }
        }
    }

    fn check_boundary(&self, spec: &ClassSpec, out: &mut Vec<Violation>) {
        for x in self.chain.elements() {
            for y in self.chain.elements() {
                let value = self.evaluate(x, y);
                if let Some(rule) = spec.violated_rule(self.chain, x, y, value) {
                    let (lo, hi) = rule.cell_bounds(self.chain.n(), x, y);
                    out.push(Violation::at(
                        Constraint::Boundary,
                        x,
                        y,
                        format!(
                            "{} requires a value in [{lo},{hi}], found {value}",
                            rule.describe()
                        ),
                    ));
                }
            }
        }
    }

    fn check_symmetry(&self, spec: &ClassSpec, out: &mut Vec<Violation>) {
        let n = self.chain.n();
        for x in self.chain.elements() {
            for y in self.chain.elements() {
                let Some((mx, my)) = spec.symmetry().mirror(n, x, y) else {
                    return;
                };
                // Report each unordered pair once.
                if (mx, my) <= (x, y) {
                    continue;
                }
                let (here, there) = (self.evaluate(x, y), self.evaluate(mx, my));
                if here != there {
                    out.push(Violation::at(
                        Constraint::Symmetry,
                        x,
                        y,
                        format!("F({x},{y}) = {here} differs from F({mx},{my}) = {there}"),
                    ));
                }
            }
        }
    }

    fn check_smoothness(&self, spec: &ClassSpec, out: &mut Vec<Violation>) {
        let Some(step) = spec.smoothness() else {
            return;
        };
        for x in self.chain.elements() {
            for y in self.chain.elements() {
                let here = self.evaluate(x, y);
                let neighbours = [
                    (x > 0).then(|| (x - 1, y)),
                    (y > 0).then(|| (x, y - 1)),
                ];
                for (px, py) in neighbours.into_iter().flatten() {
                    let jump = here.abs_diff(self.evaluate(px, py));
                    if jump > step {
                        out.push(Violation::at(
                            Constraint::Smoothness,
                            x,
                            y,
                            format!(
                                "F({x},{y}) jumps by {jump} from F({px},{py}), \
                                 at most {step} allowed"
                            ),
                        ));
                    }
                }
            }
        }
    }

    fn check_law(&self, spec: &ClassSpec, out: &mut Vec<Violation>) {
        match spec.law() {
            None => {}
            // One failing triple is reported; the table may have many.
            Some(Law::Associative) => {
                if let Some((x, y, z)) = self.associativity_failure() {
                    let left = self.evaluate(self.evaluate(x, y), z);
                    let right = self.evaluate(x, self.evaluate(y, z));
                    out.push(Violation {
                        constraint: Constraint::Associativity,
                        severity: Severity::Error,
                        cell: None,
                        description: format!(
                            "F(F({x},{y}),{z}) = {left} differs from F({x},F({y},{z})) = {right}"
                        ),
                    });
                }
            }
            Some(Law::TwoIncreasing) => {
                let n = self.chain.n();
                for x in 1..=n {
                    for y in 1..=n {
                        let volume = self.unit_square_volume(x, y);
                        if volume < 0 {
                            out.push(Violation::at(
                                Constraint::TwoIncreasing,
                                x,
                                y,
                                format!(
                                    "the square [{},{x}]x[{},{y}] has volume {volume}",
                                    x - 1,
                                    y - 1
                                ),
                            ));
                        }
                    }
                }
            }
        }
    }

    /// Deterministic SHA-256 fingerprint of the value table.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        self.feed(&mut hasher);
        format!("dfo1_{:x}", hasher.finalize())
    }

    pub(crate) fn feed(&self, hasher: &mut Sha256) {
        hasher.update(self.chain.n().to_le_bytes());
        for value in &self.values {
            hasher.update(value.to_le_bytes());
        }
    }
}

fn ordered(direction: Direction, before: u32, after: u32) -> bool {
    match direction {
        Direction::Increasing => before <= after,
        Direction::Decreasing => before >= after,
    }
}

fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Increasing => "increasing",
        Direction::Decreasing => "decreasing",
    }
}

impl fmt::Display for OperatorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (x, row) in self.rows().enumerate() {
            if x > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(u32::to_string).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct MatrixRepr {
    n: FiniteChain,
    rows: Vec<Vec<u32>>,
}

impl TryFrom<MatrixRepr> for OperatorMatrix {
    type Error = DfoError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        let rows = repr
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(i64::from).collect())
            .collect();
        Self::from_rows(repr.n, rows)
    }
}

impl From<OperatorMatrix> for MatrixRepr {
    fn from(matrix: OperatorMatrix) -> Self {
        Self {
            n: matrix.chain,
            rows: matrix.to_rows(),
        }
    }
}

/// Outcome of validated construction: the operator plus every constraint of
/// the requested class it breaks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Construction {
    pub operator: OperatorMatrix,
    pub class: crate::class::OperatorClass,
    pub violations: Vec<Violation>,
}

impl Construction {
    pub fn is_conforming(&self) -> bool {
        self.violations.is_empty()
    }

    /// The operator, or `ConstraintViolation` if any check failed.
    pub fn into_conforming(self) -> Result<OperatorMatrix, DfoError> {
        if self.violations.is_empty() {
            Ok(self.operator)
        } else {
            Err(DfoError::ConstraintViolation {
                class: self.class.to_string(),
                violations: self.violations,
            })
        }
    }
}

/// Construct an operator of class `spec` from rows `F(x, ·)`.
///
/// Shape and range failures are fatal. Class-constraint failures are returned
/// inside the [`Construction`].
pub fn build_operator(
    n: u32,
    spec: &ClassSpec,
    rows: Vec<Vec<i64>>,
) -> Result<Construction, DfoError> {
    if !spec.class().is_binary() {
        return Err(DfoError::NotEnumerable {
            class: spec.class().to_string(),
        });
    }
    let chain = FiniteChain::new(n)?;
    let operator = OperatorMatrix::from_rows(chain, rows)?;
    let violations = operator.violations(spec);
    Ok(Construction {
        operator,
        class: spec.class(),
        violations,
    })
}
