//! Operator classes and their constraint descriptors.
//!
//! Every class is described by a [`ClassSpec`]: the monotonicity direction in
//! each argument, a list of [`BoundaryRule`]s, a [`Symmetry`] requirement and
//! an optional smoothness step. Each boundary rule restricts a cell F(x,y) to
//! an interval, so the admissible values of any cell are the intersection of
//! the intervals of all rules. The enumerator seeds its search from exactly
//! these intervals.
//!
//! Conjunction classes and implication classes are linked by the duality
//!
//! ```text
//! I(x, y) = n − C(x, n − y)
//! ```
//!
//! which maps NP ↔ NP, IP ↔ IP, OP ↔ OP, CB ↔ CB, commutativity ↔
//! contrapositive symmetry, and smoothness ↔ smoothness. T-norms and
//! t-conorms are linked by S(x, y) = n − T(n − x, n − y) instead.
//!
//! Associativity and the 2-increasing property are not interval rules; a
//! class carrying one names it as its [`Law`].

use crate::chain::FiniteChain;

/// Direction of monotonicity in one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Increasing,
    Decreasing,
}

/// Monotonicity requirement in each argument of a binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Monotonicity {
    pub first: Direction,
    pub second: Direction,
}

impl Monotonicity {
    pub const INCREASING: Self = Self {
        first: Direction::Increasing,
        second: Direction::Increasing,
    };

    /// Decreasing in the antecedent, increasing in the consequent.
    pub const IMPLICATIVE: Self = Self {
        first: Direction::Decreasing,
        second: Direction::Increasing,
    };
}

/// Symmetry requirement of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    None,
    /// F(x, y) = F(y, x).
    Commutative,
    /// F(x, y) = F(n − y, n − x).
    Contrapositive,
}

impl Symmetry {
    /// The cell that must carry the same value as (x, y), if any.
    pub fn mirror(self, n: u32, x: u32, y: u32) -> Option<(u32, u32)> {
        match self {
            Self::None => None,
            Self::Commutative => Some((y, x)),
            Self::Contrapositive => Some((n - y, n - x)),
        }
    }
}

/// A boundary axiom, expressed as an interval restriction per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryRule {
    /// F(0, 0) = 0.
    LowerCorner,
    /// F(n, n) = n.
    UpperCorner,
    /// F(0, y) = F(x, 0) = 0.
    AbsorbingZero,
    /// NP: F(n, y) = y.
    NeutralityPrinciple,
    /// IP for conjunctions: F(x, n − x) = 0.
    IdentityPrinciple,
    /// OP for conjunctions: F(x, y) = 0 ⇔ x ≤ n − y.
    OrderingPrinciple,
    /// CB for conjunctions: F(x, y) ≤ y.
    ConsequentBoundary,
    /// I(0, y) = I(x, n) = n and I(n, 0) = 0. Under the implicative
    /// monotonicity this is equivalent to I(0,0) = I(n,n) = n, I(n,0) = 0.
    ImplicationCorners,
    /// IP for implications: I(x, x) = n.
    ImplicationIdentity,
    /// OP for implications: I(x, y) = n ⇔ x ≤ y.
    ImplicationOrdering,
    /// CB for implications: I(x, y) ≥ y.
    ImplicationConsequent,
    /// F(x, n) = x.
    SecondNeutrality,
    /// F(x, n) = F(n, y) = n.
    AbsorbingTop,
    /// F(0, y) = y and F(x, 0) = x.
    ZeroNeutrality,
}

impl BoundaryRule {
    /// Interval `(lo, hi)` this rule imposes on F(x, y); `(0, n)` when the
    /// rule says nothing about the cell.
    pub fn cell_bounds(self, n: u32, x: u32, y: u32) -> (u32, u32) {
        let free = (0, n);
        match self {
            Self::LowerCorner if x == 0 && y == 0 => (0, 0),
            Self::UpperCorner if x == n && y == n => (n, n),
            Self::AbsorbingZero if x == 0 || y == 0 => (0, 0),
            Self::NeutralityPrinciple if x == n => (y, y),
            Self::IdentityPrinciple if x + y == n => (0, 0),
            Self::OrderingPrinciple => {
                if x + y <= n {
                    (0, 0)
                } else {
                    (1, n)
                }
            }
            Self::ConsequentBoundary => (0, y),
            Self::ImplicationCorners if x == 0 || y == n => (n, n),
            Self::ImplicationCorners if x == n && y == 0 => (0, 0),
            Self::ImplicationIdentity if x == y => (n, n),
            Self::ImplicationOrdering => {
                if x <= y {
                    (n, n)
                } else {
                    (0, n - 1)
                }
            }
            Self::ImplicationConsequent => (y, n),
            Self::SecondNeutrality if y == n => (x, x),
            Self::AbsorbingTop if x == n || y == n => (n, n),
            Self::ZeroNeutrality if x == 0 => (y, y),
            Self::ZeroNeutrality if y == 0 => (x, x),
            _ => free,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Self::LowerCorner => "F(0,0)=0",
            Self::UpperCorner => "F(n,n)=n",
            Self::AbsorbingZero => "F(0,y)=F(x,0)=0",
            Self::NeutralityPrinciple => "F(n,y)=y",
            Self::IdentityPrinciple => "F(x,n-x)=0",
            Self::OrderingPrinciple => "F(x,y)=0 iff x<=n-y",
            Self::ConsequentBoundary => "F(x,y)<=y",
            Self::ImplicationCorners => "I(0,y)=I(x,n)=n, I(n,0)=0",
            Self::ImplicationIdentity => "I(x,x)=n",
            Self::ImplicationOrdering => "I(x,y)=n iff x<=y",
            Self::ImplicationConsequent => "I(x,y)>=y",
            Self::SecondNeutrality => "F(x,n)=x",
            Self::AbsorbingTop => "F(x,n)=F(n,y)=n",
            Self::ZeroNeutrality => "F(0,y)=y, F(x,0)=x",
        }
    }
}

/// A global law checked on whole value tables rather than per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Law {
    /// F(F(x, y), z) = F(x, F(y, z)).
    Associative,
    /// F(x', y') − F(x, y') − F(x', y) + F(x, y) ≥ 0 for x ≤ x', y ≤ y'.
    TwoIncreasing,
}

/// How a class is obtained from the conjunction class it is searched as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Duality {
    /// I(x, y) = n − C(x, n − y).
    Residual,
    /// S(x, y) = n − T(n − x, n − y).
    Conorm,
}

impl Duality {
    /// The conjunction cell whose value determines cell (x, y).
    pub fn source_cell(self, n: u32, x: u32, y: u32) -> (u32, u32) {
        match self {
            Self::Residual => (x, n - y),
            Self::Conorm => (n - x, n - y),
        }
    }
}

/// The named operator classes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OperatorClass {
    Aggregation,
    CommutativeAggregation,
    Conjunction,
    CommutativeConjunction,
    SmoothConjunction,
    NpConjunction,
    IpConjunction,
    OpConjunction,
    CbConjunction,
    Implication,
    NpImplication,
    IpImplication,
    OpImplication,
    CbImplication,
    CpImplication,
    SmoothImplication,
    TNorm,
    TConorm,
    Copula,
    Negation,
}

impl OperatorClass {
    pub const ALL: [OperatorClass; 20] = [
        Self::Aggregation,
        Self::CommutativeAggregation,
        Self::Conjunction,
        Self::CommutativeConjunction,
        Self::SmoothConjunction,
        Self::NpConjunction,
        Self::IpConjunction,
        Self::OpConjunction,
        Self::CbConjunction,
        Self::Implication,
        Self::NpImplication,
        Self::IpImplication,
        Self::OpImplication,
        Self::CbImplication,
        Self::CpImplication,
        Self::SmoothImplication,
        Self::TNorm,
        Self::TConorm,
        Self::Copula,
        Self::Negation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Aggregation => "aggregation",
            Self::CommutativeAggregation => "commutative_aggregation",
            Self::Conjunction => "conjunction",
            Self::CommutativeConjunction => "commutative_conjunction",
            Self::SmoothConjunction => "smooth_conjunction",
            Self::NpConjunction => "np_conjunction",
            Self::IpConjunction => "ip_conjunction",
            Self::OpConjunction => "op_conjunction",
            Self::CbConjunction => "cb_conjunction",
            Self::Implication => "implication",
            Self::NpImplication => "np_implication",
            Self::IpImplication => "ip_implication",
            Self::OpImplication => "op_implication",
            Self::CbImplication => "cb_implication",
            Self::CpImplication => "cp_implication",
            Self::SmoothImplication => "smooth_implication",
            Self::TNorm => "t_norm",
            Self::TConorm => "t_conorm",
            Self::Copula => "copula",
            Self::Negation => "negation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Aggregation => "increasing, F(0,0)=0, F(n,n)=n",
            Self::CommutativeAggregation => "commutative aggregation functions",
            Self::Conjunction => "increasing, F(0,y)=F(x,0)=0, F(n,n)=n",
            Self::CommutativeConjunction => "commutative conjunctions",
            Self::SmoothConjunction => "conjunctions with unit steps in each argument",
            Self::NpConjunction => "conjunctions with F(n,y)=y",
            Self::IpConjunction => "conjunctions with F(x,n-x)=0",
            Self::OpConjunction => "conjunctions with F(x,y)=0 iff x<=n-y",
            Self::CbConjunction => "conjunctions with F(x,y)<=y",
            Self::Implication => "decreasing in x, increasing in y, I(0,0)=I(n,n)=n, I(n,0)=0",
            Self::NpImplication => "implications with I(n,y)=y",
            Self::IpImplication => "implications with I(x,x)=n",
            Self::OpImplication => "implications with I(x,y)=n iff x<=y",
            Self::CbImplication => "implications with I(x,y)>=y",
            Self::CpImplication => "implications with I(x,y)=I(n-y,n-x)",
            Self::SmoothImplication => "implications with unit steps in each argument",
            Self::TNorm => "associative commutative conjunctions with neutral element n",
            Self::TConorm => "associative commutative increasing F with neutral element 0",
            Self::Copula => "2-increasing conjunctions with F(n,y)=y, F(x,n)=x",
            Self::Negation => "nonincreasing N with N(0)=n, N(n)=0",
        }
    }

    /// Whether the class consists of binary operators (matrices).
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Negation)
    }

    /// The conjunction class this class is dual to, and the duality.
    pub fn dual_search(self) -> Option<(OperatorClass, Duality)> {
        let residual = |class| Some((class, Duality::Residual));
        match self {
            Self::Implication => residual(Self::Conjunction),
            Self::NpImplication => residual(Self::NpConjunction),
            Self::IpImplication => residual(Self::IpConjunction),
            Self::OpImplication => residual(Self::OpConjunction),
            Self::CbImplication => residual(Self::CbConjunction),
            Self::CpImplication => residual(Self::CommutativeConjunction),
            Self::SmoothImplication => residual(Self::SmoothConjunction),
            Self::TConorm => Some((Self::TNorm, Duality::Conorm)),
            _ => None,
        }
    }

    /// The conjunction class this class is dual to.
    pub fn conjunction_dual(self) -> Option<OperatorClass> {
        self.dual_search().map(|(class, _)| class)
    }

    /// Whether the class has a product formula for its cardinality. T-norms
    /// and t-conorms are counted by growing t-norms one element at a time.
    pub fn has_closed_form(self) -> bool {
        !matches!(self, Self::TNorm | Self::TConorm)
    }

    pub fn spec(self) -> ClassSpec {
        use BoundaryRule::*;

        let conjunction = |extra: &[BoundaryRule]| {
            let mut rules = vec![AbsorbingZero, UpperCorner];
            rules.extend_from_slice(extra);
            rules
        };
        let implication = |extra: &[BoundaryRule]| {
            let mut rules = vec![ImplicationCorners];
            rules.extend_from_slice(extra);
            rules
        };

        let (monotonicity, boundary, symmetry, smoothness) = match self {
            Self::Aggregation => (
                Monotonicity::INCREASING,
                vec![LowerCorner, UpperCorner],
                Symmetry::None,
                None,
            ),
            Self::CommutativeAggregation => (
                Monotonicity::INCREASING,
                vec![LowerCorner, UpperCorner],
                Symmetry::Commutative,
                None,
            ),
            Self::Conjunction => (Monotonicity::INCREASING, conjunction(&[]), Symmetry::None, None),
            Self::CommutativeConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[]),
                Symmetry::Commutative,
                None,
            ),
            Self::SmoothConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[]),
                Symmetry::None,
                Some(1),
            ),
            Self::NpConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[NeutralityPrinciple]),
                Symmetry::None,
                None,
            ),
            Self::IpConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[IdentityPrinciple]),
                Symmetry::None,
                None,
            ),
            Self::OpConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[OrderingPrinciple]),
                Symmetry::None,
                None,
            ),
            Self::CbConjunction => (
                Monotonicity::INCREASING,
                conjunction(&[ConsequentBoundary]),
                Symmetry::None,
                None,
            ),
            Self::Implication => (
                Monotonicity::IMPLICATIVE,
                implication(&[]),
                Symmetry::None,
                None,
            ),
            Self::NpImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[NeutralityPrinciple]),
                Symmetry::None,
                None,
            ),
            Self::IpImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[ImplicationIdentity]),
                Symmetry::None,
                None,
            ),
            Self::OpImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[ImplicationOrdering]),
                Symmetry::None,
                None,
            ),
            Self::CbImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[ImplicationConsequent]),
                Symmetry::None,
                None,
            ),
            Self::CpImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[]),
                Symmetry::Contrapositive,
                None,
            ),
            Self::SmoothImplication => (
                Monotonicity::IMPLICATIVE,
                implication(&[]),
                Symmetry::None,
                Some(1),
            ),
            Self::TNorm => (
                Monotonicity::INCREASING,
                conjunction(&[NeutralityPrinciple, SecondNeutrality]),
                Symmetry::Commutative,
                None,
            ),
            Self::TConorm => (
                Monotonicity::INCREASING,
                vec![ZeroNeutrality, AbsorbingTop],
                Symmetry::Commutative,
                None,
            ),
            Self::Copula => (
                Monotonicity::INCREASING,
                conjunction(&[NeutralityPrinciple, SecondNeutrality]),
                Symmetry::None,
                None,
            ),
            // Unary: the matrix-level fields are unused.
            Self::Negation => (
                Monotonicity {
                    first: Direction::Decreasing,
                    second: Direction::Decreasing,
                },
                Vec::new(),
                Symmetry::None,
                None,
            ),
        };
        let law = match self {
            Self::TNorm | Self::TConorm => Some(Law::Associative),
            Self::Copula => Some(Law::TwoIncreasing),
            _ => None,
        };

        ClassSpec {
            class: self,
            monotonicity,
            boundary,
            symmetry,
            smoothness,
            law,
        }
    }
}

impl std::fmt::Display for OperatorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OperatorClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|class| class.name() == normalized)
            .ok_or_else(|| format!("unknown operator class: {s}"))
    }
}

/// Immutable descriptor of the constraints defining a class.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClassSpec {
    class: OperatorClass,
    monotonicity: Monotonicity,
    boundary: Vec<BoundaryRule>,
    symmetry: Symmetry,
    smoothness: Option<u32>,
    law: Option<Law>,
}

impl ClassSpec {
    pub fn class(&self) -> OperatorClass {
        self.class
    }

    pub fn monotonicity(&self) -> Monotonicity {
        self.monotonicity
    }

    pub fn boundary(&self) -> &[BoundaryRule] {
        &self.boundary
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Maximal step |F(x+1,y) − F(x,y)| and |F(x,y+1) − F(x,y)|, if bounded.
    pub fn smoothness(&self) -> Option<u32> {
        self.smoothness
    }

    pub fn law(&self) -> Option<Law> {
        self.law
    }

    /// Admissible interval for F(x, y): the intersection of every boundary
    /// rule's interval. Returns `lo > hi` when the rules contradict.
    pub fn cell_bounds(&self, chain: FiniteChain, x: u32, y: u32) -> (u32, u32) {
        let n = chain.n();
        self.boundary.iter().fold((0, n), |(lo, hi), rule| {
            let (rule_lo, rule_hi) = rule.cell_bounds(n, x, y);
            (lo.max(rule_lo), hi.min(rule_hi))
        })
    }

    /// The first boundary rule whose interval excludes `value` at (x, y).
    pub fn violated_rule(
        &self,
        chain: FiniteChain,
        x: u32,
        y: u32,
        value: u32,
    ) -> Option<BoundaryRule> {
        self.boundary.iter().copied().find(|rule| {
            let (lo, hi) = rule.cell_bounds(chain.n(), x, y);
            value < lo || value > hi
        })
    }
}
