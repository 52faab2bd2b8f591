//! LP solver adapter.
//!
//! Translates a built [`Lcp`] plus one [`SolveRequest`] into a single
//! linear program for the external engine (`minilp`) and extracts one
//! value per declared variable on success.
//!
//! The translation is mechanical: every plain equation and the selected
//! side of every complementary pair becomes one constraint. Coefficients
//! are densified per equation, which merges duplicate variable ids and
//! drops zero coefficients before they reach the engine. Variables are
//! unbounded at the engine level; non-negativity of probabilities is an
//! explicit row emitted by the builder.
//!
//! A clean "infeasible" determination is an expected outcome during
//! support enumeration and is reported separately from an engine failure
//! such as an unbounded program.

use std::time::{Duration, Instant};

use minilp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use super::equation::{Direction, Equation, Relation};
use super::lcp::{Lcp, SolveRequest};

/// Outcome of one LP pass.
#[derive(Debug, Clone)]
pub enum LpStatus {
    /// The engine reported an optimal solution; one value per variable,
    /// in variable-id order.
    Optimal(Vec<f64>),
    /// The selected system has no solution.
    Infeasible,
    /// The engine failed for another reason (e.g. unbounded objective).
    Failed(String),
}

/// One LP pass result: the status plus how long the native solve took,
/// excluding problem setup.
#[derive(Debug, Clone)]
pub struct LpResult {
    /// Solve status.
    pub status: LpStatus,
    /// Wall time of the engine's solve call only.
    pub solve_time: Duration,
}

/// Adapter from an [`Lcp`] selection to the LP engine.
pub struct LpSolver<'a> {
    lcp: &'a Lcp,
}

impl<'a> LpSolver<'a> {
    /// Create an adapter for a built LCP.
    pub fn new(lcp: &'a Lcp) -> Self {
        Self { lcp }
    }

    /// Solve the system selected by `request`.
    ///
    /// The request must choose one side for every complementary pair of
    /// the LCP; anything else is a caller bug and aborts.
    pub fn solve(&self, request: &SolveRequest) -> LpResult {
        assert_eq!(
            request.sides().len(),
            self.lcp.num_pairs(),
            "request must select one side per complementary pair"
        );

        let num_vars = self.lcp.num_variables();
        let mut objective_coeffs = vec![0.0; num_vars];
        let direction = match request.objective() {
            Some(id) => {
                let objective = self.lcp.objective(id);
                for &(coefficient, var_id) in objective.terms() {
                    objective_coeffs[var_id] += coefficient as f64;
                }
                match objective.direction() {
                    Direction::Minimize => OptimizationDirection::Minimize,
                    Direction::Maximize => OptimizationDirection::Maximize,
                }
            }
            // Pure feasibility check: all-zero objective.
            None => OptimizationDirection::Minimize,
        };

        let mut problem = Problem::new(direction);
        let vars: Vec<Variable> = objective_coeffs
            .iter()
            .map(|&c| problem.add_var(c, (f64::NEG_INFINITY, f64::INFINITY)))
            .collect();

        for i in 0..self.lcp.num_linear() {
            add_constraint(&mut problem, &vars, self.lcp.equation(i));
        }
        for (pair_id, &side) in request.sides().iter().enumerate() {
            add_constraint(&mut problem, &vars, self.lcp.pair(pair_id).side(side));
        }

        let begin = Instant::now();
        let outcome = problem.solve();
        let solve_time = begin.elapsed();

        let status = match outcome {
            Ok(solution) => LpStatus::Optimal(vars.iter().map(|&v| solution[v]).collect()),
            Err(minilp::Error::Infeasible) => LpStatus::Infeasible,
            Err(error) => LpStatus::Failed(error.to_string()),
        };
        LpResult { status, solve_time }
    }
}

fn comparison_op(relation: Relation) -> ComparisonOp {
    match relation {
        Relation::Equal => ComparisonOp::Eq,
        Relation::LessEqual => ComparisonOp::Le,
        Relation::GreaterEqual => ComparisonOp::Ge,
        Relation::Less | Relation::Greater => {
            panic!("strict relations are not supported by the LP engine")
        }
    }
}

fn add_constraint(problem: &mut Problem, vars: &[Variable], equation: &Equation) {
    let mut coefficients = vec![0.0; vars.len()];
    for &(coefficient, var_id) in equation.terms() {
        coefficients[var_id] += coefficient as f64;
    }
    let expr: Vec<(Variable, f64)> = coefficients
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != 0.0)
        .map(|(i, &c)| (vars[i], c))
        .collect();
    problem.add_constraint(
        expr,
        comparison_op(equation.relation()),
        equation.constant() as f64,
    );
}
