//! Linear equations and objectives over interned variables.
//!
//! Both [`Equation`] and [`Objective`] share the same summand storage: an
//! ordered list of `(coefficient, variable id)` pairs. A constraint adds a
//! relation kind and a constant right-hand side; an objective adds an
//! optimization direction instead. Duplicate variable ids within one
//! equation are allowed and are not merged here; summation happens when
//! the LP adapter densifies the coefficients.

use std::fmt;

/// Variable id into an [`Lcp`](super::lcp::Lcp) variable table.
pub type VarId = usize;

/// Relation kind of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `lhs = constant`
    Equal,
    /// `lhs <= constant`
    LessEqual,
    /// `lhs < constant` (representable, but not accepted by the LP adapter)
    Less,
    /// `lhs >= constant`
    GreaterEqual,
    /// `lhs > constant` (representable, but not accepted by the LP adapter)
    Greater,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Relation::Equal => "=",
            Relation::LessEqual => "<=",
            Relation::Less => "<",
            Relation::GreaterEqual => ">=",
            Relation::Greater => ">",
        };
        write!(f, "{}", symbol)
    }
}

/// Optimization direction of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Minimize the objective function.
    Minimize,
    /// Maximize the objective function.
    Maximize,
}

fn write_terms(f: &mut fmt::Formatter<'_>, terms: &[(i32, VarId)]) -> fmt::Result {
    for (i, &(coefficient, var_id)) in terms.iter().enumerate() {
        if i != 0 {
            write!(f, " ")?;
        }
        if coefficient >= 0 {
            write!(f, "+")?;
        }
        if coefficient != 1 {
            write!(f, "{}*", coefficient)?;
        }
        write!(f, "v{}", var_id)?;
    }
    Ok(())
}

/// A linear constraint: `Σ coefficient·variable  relation  constant`.
#[derive(Debug, Clone)]
pub struct Equation {
    relation: Relation,
    constant: i32,
    terms: Vec<(i32, VarId)>,
}

impl Equation {
    /// Create a constraint with no summands yet.
    pub fn new(relation: Relation, constant: i32) -> Self {
        Self {
            relation,
            constant,
            terms: Vec::new(),
        }
    }

    /// Append a `(coefficient, variable)` summand; returns its position.
    pub fn add_summand(&mut self, coefficient: i32, var_id: VarId) -> usize {
        self.terms.push((coefficient, var_id));
        self.terms.len() - 1
    }

    /// Replace the relation kind (used to turn the builder's inequalities
    /// into the equality sides of a complementary pair).
    pub fn set_relation(&mut self, relation: Relation) {
        self.relation = relation;
    }

    /// The relation kind.
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// The right-hand-side constant.
    pub fn constant(&self) -> i32 {
        self.constant
    }

    /// The ordered summand list.
    pub fn terms(&self) -> &[(i32, VarId)] {
        &self.terms
    }

    /// Number of summands.
    pub fn size(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(f, &self.terms)?;
        write!(f, " {} {};", self.relation, self.constant)
    }
}

/// An objective function: `min:`/`max:` plus a summand list.
///
/// The constant term the original formulation carried is always zero and
/// never evaluated, so it is not stored.
#[derive(Debug, Clone)]
pub struct Objective {
    direction: Direction,
    terms: Vec<(i32, VarId)>,
}

impl Objective {
    /// Create an objective with no summands yet.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            terms: Vec::new(),
        }
    }

    /// Append a `(coefficient, variable)` summand; returns its position.
    pub fn add_summand(&mut self, coefficient: i32, var_id: VarId) -> usize {
        self.terms.push((coefficient, var_id));
        self.terms.len() - 1
    }

    /// The optimization direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The ordered summand list.
    pub fn terms(&self) -> &[(i32, VarId)] {
        &self.terms
    }

    /// Number of summands.
    pub fn size(&self) -> usize {
        self.terms.len()
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Minimize => write!(f, "min: ")?,
            Direction::Maximize => write!(f, "max: ")?,
        }
        write_terms(f, &self.terms)?;
        write!(f, ";")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equation_display() {
        let mut e = Equation::new(Relation::GreaterEqual, 0);
        e.add_summand(1, 0);
        e.add_summand(-2, 3);
        assert_eq!(e.to_string(), "+v0 -2*v3 >= 0;");
    }

    #[test]
    fn test_equation_allows_duplicate_variables() {
        let mut e = Equation::new(Relation::Equal, 1);
        e.add_summand(1, 2);
        e.add_summand(1, 2);
        assert_eq!(e.size(), 2);
        assert_eq!(e.terms(), &[(1, 2), (1, 2)]);
    }

    #[test]
    fn test_relation_swap() {
        let mut e = Equation::new(Relation::GreaterEqual, 0);
        e.set_relation(Relation::Equal);
        assert_eq!(e.relation(), Relation::Equal);
    }

    #[test]
    fn test_objective_display() {
        let mut o = Objective::new(Direction::Minimize);
        o.add_summand(1, 0);
        assert_eq!(o.to_string(), "min: +v0;");
    }
}
