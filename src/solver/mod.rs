//! Equilibrium-computation pipeline for normal-form games.
//!
//! This is the core module. Given a [`Game`], it finds:
//!
//! 1. **Pure equilibria** by exhaustive best-response checking: a profile
//!    survives when no player can strictly improve their payoff with a
//!    unilateral strategy switch.
//! 2. **Mixed equilibria** by encoding the equilibrium conditions as a
//!    linear complementarity problem (LCP) and solving it by case
//!    enumeration over strategy supports, one LP solve per case.
//!
//! # Pipeline
//!
//! ```text
//! Game ──► builder::build ──► Lcp + lookup tables
//!                                │
//!            EquilibriaFinder ───┤  per support / objective:
//!                                ▼
//!                          SolveRequest ──► LpSolver ──► LP engine
//! ```
//!
//! # LCP encoding
//!
//! Per player `p`: a payoff variable `A_p` and one probability variable
//! per strategy. The constraints are non-negativity, per-player
//! normalization to 1, and one best-response condition per strategy. For
//! general-sum games each best-response condition becomes a complementary
//! pair: in any equilibrium either the strategy's probability is zero or
//! its best-response condition is tight. For zero-sum games the pairs are
//! replaced by per-player `min A_p` objectives plus the chained
//! equalities `A_0 = A_1 = ... = A_{n-1}` for the common game value.

pub mod builder;
pub mod equation;
pub mod finder;
pub mod game;
pub mod lcp;
pub mod lp;

// Re-export main types for convenient access
pub use builder::{build, LcpBuild};
pub use equation::{Direction, Equation, Objective, Relation, VarId};
pub use finder::{EquilibriaFinder, FinderConfig, MixedProgress, SearchStats};
pub use game::{Game, MixedStrategyProfile, Outcome, Player, StrategyProfile};
pub use lcp::{Lcp, ObjectiveId, PairId, PairSide, SolveRequest};
pub use lp::{LpResult, LpSolver, LpStatus};
