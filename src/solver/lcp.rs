//! Linear complementarity problem model.
//!
//! An [`Lcp`] owns a variable-name table, a set of plain linear equations,
//! a list of complementary equation pairs and a set of objectives. Each
//! complementary pair encodes one best-response complementary-slackness
//! condition: in any equilibrium, exactly one of "the strategy's
//! probability is zero" or "its best-response condition is tight" holds.
//!
//! Which side of each pair (and which objective, if any) participates in a
//! particular solve is not stored on the Lcp. It travels as an immutable
//! [`SolveRequest`] value into the LP adapter, so a selection can never be
//! half-updated between solves and "exactly one active side per pair"
//! holds by construction of [`PairSide`].

use std::fmt;

use super::equation::{Equation, Objective, VarId};

/// Id of a complementary pair within an [`Lcp`].
pub type PairId = usize;

/// Id of an objective within an [`Lcp`].
pub type ObjectiveId = usize;

/// The side of a complementary pair that participates in a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    /// The "probability = 0" side: the strategy is outside the support.
    ZeroSide,
    /// The "best-response tight" side: the strategy is in the support.
    TightSide,
}

/// One complementary-slackness pair.
#[derive(Debug, Clone)]
pub struct ComplPair {
    zero: Equation,
    tight: Equation,
}

impl ComplPair {
    /// The equation selected by `side`.
    pub fn side(&self, side: PairSide) -> &Equation {
        match side {
            PairSide::ZeroSide => &self.zero,
            PairSide::TightSide => &self.tight,
        }
    }
}

/// A built LCP: variables, plain equations, complementary pairs and
/// objectives. Read-only once the builder is done with it.
#[derive(Debug, Clone, Default)]
pub struct Lcp {
    variables: Vec<String>,
    equations: Vec<Equation>,
    pairs: Vec<ComplPair>,
    objectives: Vec<Objective>,
}

impl Lcp {
    /// Create an empty LCP.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable name; returns its id.
    pub fn add_variable(&mut self, name: impl Into<String>) -> VarId {
        self.variables.push(name.into());
        self.variables.len() - 1
    }

    /// Add a plain linear equation; returns its index.
    pub fn add_equation(&mut self, equation: Equation) -> usize {
        self.equations.push(equation);
        self.equations.len() - 1
    }

    /// Add a complementary pair; returns its pair id.
    pub fn add_compl_pair(&mut self, zero: Equation, tight: Equation) -> PairId {
        self.pairs.push(ComplPair { zero, tight });
        self.pairs.len() - 1
    }

    /// Add an objective; returns its id.
    pub fn add_objective(&mut self, objective: Objective) -> ObjectiveId {
        self.objectives.push(objective);
        self.objectives.len() - 1
    }

    /// A variable name by id.
    pub fn variable(&self, var_id: VarId) -> &str {
        assert!(var_id < self.variables.len(), "variable id out of range");
        &self.variables[var_id]
    }

    /// A plain equation by index.
    pub fn equation(&self, index: usize) -> &Equation {
        assert!(index < self.equations.len(), "equation index out of range");
        &self.equations[index]
    }

    /// A complementary pair by id.
    pub fn pair(&self, pair_id: PairId) -> &ComplPair {
        assert!(pair_id < self.pairs.len(), "pair id out of range");
        &self.pairs[pair_id]
    }

    /// An objective by id.
    pub fn objective(&self, objective_id: ObjectiveId) -> &Objective {
        assert!(
            objective_id < self.objectives.len(),
            "objective id out of range"
        );
        &self.objectives[objective_id]
    }

    /// Number of plain linear equations.
    pub fn num_linear(&self) -> usize {
        self.equations.len()
    }

    /// Number of complementary pairs.
    pub fn num_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Number of objectives.
    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Number of variables.
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Render the system as selected by `request` (for diagnostics).
    pub fn display<'a>(&'a self, request: &'a SolveRequest) -> LcpDisplay<'a> {
        LcpDisplay { lcp: self, request }
    }
}

/// An immutable selection of what to solve: an optional objective plus one
/// chosen side per complementary pair.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    objective: Option<ObjectiveId>,
    sides: Vec<PairSide>,
}

impl SolveRequest {
    /// A pure feasibility check with the given pair sides.
    pub fn feasibility(sides: Vec<PairSide>) -> Self {
        Self {
            objective: None,
            sides,
        }
    }

    /// An optimization pass for one objective with the given pair sides.
    pub fn optimize(objective: ObjectiveId, sides: Vec<PairSide>) -> Self {
        Self {
            objective: Some(objective),
            sides,
        }
    }

    /// The selected objective, if any.
    pub fn objective(&self) -> Option<ObjectiveId> {
        self.objective
    }

    /// The selected side for each pair, indexed by pair id.
    pub fn sides(&self) -> &[PairSide] {
        &self.sides
    }
}

/// Display adapter returned by [`Lcp::display`].
pub struct LcpDisplay<'a> {
    lcp: &'a Lcp,
    request: &'a SolveRequest,
}

impl fmt::Display for LcpDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.request.objective() {
            Some(id) => writeln!(f, "{}", self.lcp.objective(id))?,
            None => writeln!(f, "min: ;")?,
        }
        for equation in &self.lcp.equations {
            writeln!(f, "{}", equation)?;
        }
        for (pair, &side) in self.lcp.pairs.iter().zip(self.request.sides()) {
            writeln!(f, "{}", pair.side(side))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::equation::{Direction, Relation};

    fn simple_pair() -> (Equation, Equation) {
        let mut zero = Equation::new(Relation::Equal, 0);
        zero.add_summand(1, 1);
        let mut tight = Equation::new(Relation::Equal, 0);
        tight.add_summand(1, 0);
        tight.add_summand(-2, 1);
        (zero, tight)
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut lcp = Lcp::new();
        assert_eq!(lcp.add_variable("A"), 0);
        assert_eq!(lcp.add_variable("a0"), 1);
        let (zero, tight) = simple_pair();
        assert_eq!(lcp.add_compl_pair(zero, tight), 0);
        let mut obj = Objective::new(Direction::Minimize);
        obj.add_summand(1, 0);
        assert_eq!(lcp.add_objective(obj), 0);
        assert_eq!(lcp.num_variables(), 2);
        assert_eq!(lcp.num_pairs(), 1);
        assert_eq!(lcp.num_objectives(), 1);
        assert_eq!(lcp.variable(1), "a0");
    }

    #[test]
    fn test_pair_side_selection() {
        let mut lcp = Lcp::new();
        lcp.add_variable("A");
        lcp.add_variable("a0");
        let (zero, tight) = simple_pair();
        let pair_id = lcp.add_compl_pair(zero, tight);
        let pair = lcp.pair(pair_id);
        assert_eq!(pair.side(PairSide::ZeroSide).to_string(), "+v1 = 0;");
        assert_eq!(pair.side(PairSide::TightSide).to_string(), "+v0 -2*v1 = 0;");
    }

    #[test]
    fn test_display_follows_request() {
        let mut lcp = Lcp::new();
        lcp.add_variable("A");
        lcp.add_variable("a0");
        let mut norm = Equation::new(Relation::Equal, 1);
        norm.add_summand(1, 1);
        lcp.add_equation(norm);
        let (zero, tight) = simple_pair();
        lcp.add_compl_pair(zero, tight);

        let request = SolveRequest::feasibility(vec![PairSide::TightSide]);
        let rendered = lcp.display(&request).to_string();
        assert!(rendered.contains("min: ;"));
        assert!(rendered.contains("+v1 = 1;"));
        assert!(rendered.contains("+v0 -2*v1 = 0;"));
        assert!(!rendered.contains("+v1 = 0;"));
    }
}
