//! Lazy enumeration of every operator in a class.
//!
//! The search grows a matrix one row at a time. Each row is a restriction
//! vector: nondecreasing along the row, bounded below by the row above, and
//! confined to the per-cell intervals of the class's boundary rules. One
//! [`RestrictionGenerator`] per fixed row forms an explicit frame stack, so
//! the depth of the search never touches the native call stack.
//!
//! ```text
//! Seeding ──► Growing ──► Done
//!               │  ▲
//!               └──┘ push frame for row x+1 / pop exhausted frame
//! ```
//!
//! Symmetric classes mirror cells fixed in earlier rows instead of searching
//! them. Implication classes and t-conorms are enumerated through their dual
//! conjunction class and mapped back with [`OperatorMatrix::apply`].
//!
//! Only the rows fixed so far are held in memory, and cell intervals are
//! computed for one row at a time, so the first budget check happens after
//! O(n) work whatever the chain size. A 2-increasing law is checked as soon
//! as a row is fixed; associativity once the table is complete.

use crate::budget::{NodeMeter, SearchBudget};
use crate::chain::FiniteChain;
use crate::class::{ClassSpec, Duality, Law, OperatorClass};
use crate::error::DfoError;
use crate::matrix::OperatorMatrix;
use crate::restriction::RestrictionGenerator;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Seeding,
    Growing,
    Done,
}

/// A single-pass search over one operator class.
///
/// Yields `Ok(matrix)` for every operator, in lexicographic order of the
/// searched value table. A tripped budget yields one `Err` and ends the
/// sequence.
#[derive(Debug)]
pub struct OperatorEnumerator {
    class: OperatorClass,
    chain: FiniteChain,
    spec: ClassSpec,
    duality: Option<Duality>,
    /// Rows fixed so far, row-major.
    values: Vec<u32>,
    frames: Vec<RestrictionGenerator>,
    meter: NodeMeter,
    state: State,
    emitted: u64,
}

impl OperatorEnumerator {
    fn new(chain: FiniteChain, class: OperatorClass, budget: SearchBudget) -> Self {
        let (searched, duality) = match class.dual_search() {
            Some((conjunction, duality)) => (conjunction, Some(duality)),
            None => (class, None),
        };
        Self {
            class,
            chain,
            spec: searched.spec(),
            duality,
            values: Vec::new(),
            frames: Vec::new(),
            meter: budget.meter(),
            state: State::Seeding,
            emitted: 0,
        }
    }

    pub fn class(&self) -> OperatorClass {
        self.class
    }

    /// Operators yielded so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Search nodes visited so far.
    pub fn visited(&self) -> u64 {
        self.meter.visited()
    }

    fn seed(&self) {
        debug!(
            class = %self.class,
            searched = %self.spec.class(),
            n = self.chain.n(),
            "seeded operator search"
        );
    }

    /// Generator for row `x`, given rows `0..x` already fixed.
    fn row_frame(&self, x: usize) -> Result<RestrictionGenerator, DfoError> {
        let side = self.chain.len();
        let n = self.chain.n();
        let step = self.spec.smoothness();
        let mut lower = Vec::with_capacity(side);
        let mut upper = Vec::with_capacity(side);

        for y in 0..side {
            let (mut lo, mut hi) = self.spec.cell_bounds(self.chain, x as u32, y as u32);
            if x > 0 {
                let above = self.values[(x - 1) * side + y];
                lo = lo.max(above);
                if let Some(step) = step {
                    hi = hi.min(above.saturating_add(step));
                }
            }
            // A mirror cell in an earlier row pins this one.
            if let Some((mx, my)) = self.spec.symmetry().mirror(n, x as u32, y as u32) {
                if (mx as usize) < x {
                    let pinned = self.values[mx as usize * side + my as usize];
                    lo = lo.max(pinned);
                    hi = hi.min(pinned);
                }
            }
            lower.push(lo);
            upper.push(hi);
        }

        let generator = RestrictionGenerator::new(lower, upper)?;
        Ok(match step {
            Some(step) => generator.with_step(step),
            None => generator,
        })
    }

    /// Whether the freshly fixed row `x` keeps every unit square between it
    /// and row x − 1 at nonnegative volume.
    fn row_admissible(&self, x: usize) -> bool {
        if x == 0 || self.spec.law() != Some(Law::TwoIncreasing) {
            return true;
        }
        let side = self.chain.len();
        let (above, here) = self.values[(x - 1) * side..(x + 1) * side].split_at(side);
        (1..side).all(|y| here[y] + above[y - 1] >= above[y] + here[y - 1])
    }

    /// The completed table, unless it breaks a whole-table law.
    fn complete(&mut self) -> Option<OperatorMatrix> {
        let matrix = OperatorMatrix::from_values(self.chain, self.values.clone());
        if self.spec.law() == Some(Law::Associative) && !matrix.is_associative() {
            return None;
        }
        self.emitted += 1;
        Some(match self.duality {
            Some(duality) => matrix.apply(duality),
            None => matrix,
        })
    }

    fn finish(&mut self) {
        self.state = State::Done;
        self.frames.clear();
        info!(
            class = %self.class,
            n = self.chain.n(),
            operators = self.emitted,
            visited = self.meter.visited(),
            "enumeration finished"
        );
    }

    fn fail(&mut self, err: DfoError) -> Option<Result<OperatorMatrix, DfoError>> {
        self.state = State::Done;
        self.frames.clear();
        warn!(class = %self.class, n = self.chain.n(), error = %err, "enumeration aborted");
        Some(Err(err))
    }
}

impl Iterator for OperatorEnumerator {
    type Item = Result<OperatorMatrix, DfoError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Seeding => {
                    self.seed();
                    match self.row_frame(0) {
                        Ok(frame) => self.frames.push(frame),
                        Err(err) => return self.fail(err),
                    }
                    self.state = State::Growing;
                }
                State::Growing => {
                    let Some(x) = self.frames.len().checked_sub(1) else {
                        self.finish();
                        return None;
                    };
                    let side = self.chain.len();
                    let advanced = match self.frames[x].next_within(&mut self.meter) {
                        Ok(Some(row)) => {
                            self.values.truncate(x * side);
                            self.values.extend_from_slice(row);
                            true
                        }
                        Ok(None) => false,
                        Err(err) => return self.fail(err),
                    };

                    if !advanced {
                        self.frames.pop();
                    } else if !self.row_admissible(x) {
                        // Rejected; the same frame proposes the next row.
                    } else if x + 1 == side {
                        if let Some(matrix) = self.complete() {
                            return Some(Ok(matrix));
                        }
                    } else {
                        match self.row_frame(x + 1) {
                            Ok(frame) => self.frames.push(frame),
                            Err(err) => return self.fail(err),
                        }
                    }
                }
            }
        }
    }
}

/// Start a fresh search over every operator of `class` on L_n.
///
/// Fails up front for n = 0 and for classes without a matrix form.
pub fn enumerate_operators(
    n: u32,
    class: OperatorClass,
    budget: SearchBudget,
) -> Result<OperatorEnumerator, DfoError> {
    let chain = FiniteChain::new(n)?;
    if !class.is_binary() {
        return Err(DfoError::NotEnumerable {
            class: class.to_string(),
        });
    }
    Ok(OperatorEnumerator::new(chain, class, budget))
}
