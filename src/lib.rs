//! # Nash Solver
//!
//! A Nash equilibrium solver for finite games in normal (strategic) form.
//!
//! ## Features
//!
//! - **Pure equilibria**: Exhaustive best-response search over all
//!   strategy profiles
//! - **Mixed equilibria**: Linear complementarity formulation solved by
//!   support enumeration, one LP feasibility solve per support
//! - **Zero-sum fast path**: One optimizing LP solve per player instead
//!   of support enumeration
//! - **Gambit .nfg input**: Reads the outcome variant of the strategic
//!   game format
//! - **JSON reports**: Export equilibria and search statistics
//!
//! ## Quick Start
//!
//! ```ignore
//! use nash_solver::nfg::{self, Parser};
//! use nash_solver::solver::EquilibriaFinder;
//!
//! // 1. Parse a game file and build the game model
//! let parsed = Parser::parse_file("game.nfg")?;
//! let game = nfg::build_game(&parsed);
//!
//! // 2. Search for equilibria
//! let mut finder = EquilibriaFinder::new(&game);
//! finder.find_pure();
//! finder.find_mixed();
//!
//! // 3. Inspect the results
//! for profile in finder.equilibria() {
//!     println!("{}", profile.describe(&game));
//! }
//! ```
//!
//! ## Modules
//!
//! - [`solver`]: Game model, LCP formulation, and equilibrium search
//! - [`nfg`]: Gambit .nfg parsing and game construction
//! - [`output`]: JSON report export
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       EquilibriaFinder                          │
//! │  - Pure best-response search   - Support enumeration            │
//! │  - Zero-sum LP fast path       - Search statistics              │
//! └─────────────────────────────────────────────────────────────────┘
//!          │                      │                      │
//!          ▼                      ▼                      ▼
//!    ┌───────────┐         ┌───────────┐          ┌───────────┐
//!    │   Game    │         │  builder  │          │ LpSolver  │
//!    │   model   │────────►│  (LCP)    │─────────►│ (minilp)  │
//!    └───────────┘         └───────────┘          └───────────┘
//! ```

#![warn(missing_docs)]

/// Equilibrium-computation module.
///
/// This is the core module containing the game model and the search
/// algorithms.
pub mod solver;

/// Gambit .nfg format support.
///
/// Parses strategic-game files and builds [`solver::Game`] values.
pub mod nfg;

/// JSON report export.
pub mod output;

// Re-export commonly used types at crate root for convenience
pub use solver::{
    EquilibriaFinder, FinderConfig, Game, MixedStrategyProfile, Outcome, Player, SearchStats,
    StrategyProfile,
};
