//! Equilibria search over a game.
//!
//! Two passes, both driven by [`EquilibriaFinder`]:
//!
//! - **Pure search**: brute force over every strategy profile. A profile
//!   survives when no player has a strictly improving unilateral
//!   deviation, which is exactly the pure Nash equilibrium condition.
//! - **Mixed search**: builds the LCP once, then either runs one
//!   minimization pass per player (zero-sum games) or enumerates strategy
//!   supports with one LP feasibility solve per support combination
//!   (general-sum games). An infeasible support is not an error; it
//!   simply is not an equilibrium.
//!
//! The whole search is single-threaded and synchronous; the only external
//! call boundary is the LP engine, once per mixed-search iteration.

use std::time::{Duration, Instant};

use super::builder::{self, LcpBuild};
use super::game::{Game, MixedStrategyProfile, StrategyProfile};
use super::lcp::{PairSide, SolveRequest};
use super::lp::{LpSolver, LpStatus};

/// Probabilities closer than this are considered the same equilibrium.
const DUPLICATE_EPSILON: f64 = 1e-6;

/// Configuration for the equilibria search.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    // Kept private so the cap-at-least-1 clamp cannot be bypassed.
    max_equilibria: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            max_equilibria: usize::MAX,
        }
    }
}

impl FinderConfig {
    /// Create a config with default settings (no result cap).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the result cap. A cap of 0 is treated as 1.
    pub fn with_max_equilibria(mut self, max: usize) -> Self {
        self.max_equilibria = max.max(1);
        self
    }

    /// Stop searching once this many equilibria were found (per pass).
    /// Always at least 1.
    pub fn max_equilibria(&self) -> usize {
        self.max_equilibria
    }
}

/// Counters and wall-clock timings collected during a search.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Wall time of the whole pure pass.
    pub pure_duration: Duration,
    /// Wall time of the whole mixed pass.
    pub mixed_duration: Duration,
    /// Time spent constructing the LCP (once per mixed pass).
    pub lcp_duration: Duration,
    /// Cumulative native LP solve time across all LP calls.
    pub lp_duration: Duration,
    /// Profiles visited by the pure pass (shows early termination).
    pub profiles_scanned: usize,
    /// Support combinations visited by the general-sum mixed pass.
    pub supports_visited: u64,
    /// Total LP solves attempted.
    pub lp_solves: u64,
    /// LP solves that came back cleanly infeasible.
    pub lp_infeasible: u64,
    /// LP solves that failed for another engine reason.
    pub lp_failures: u64,
}

/// Progress snapshot passed to the mixed-search callback after each
/// support combination.
#[derive(Debug, Clone)]
pub struct MixedProgress {
    /// Support combinations visited so far.
    pub supports_visited: u64,
    /// Total number of support combinations.
    pub total_supports: u64,
    /// Mixed equilibria recorded so far.
    pub equilibria_found: usize,
}

/// Searches a game for pure and mixed Nash equilibria.
pub struct EquilibriaFinder<'a> {
    game: &'a Game,
    config: FinderConfig,
    equilibria: Vec<StrategyProfile>,
    mixed_equilibria: Vec<MixedStrategyProfile>,
    stats: SearchStats,
}

impl<'a> EquilibriaFinder<'a> {
    /// Create a finder with default configuration.
    pub fn new(game: &'a Game) -> Self {
        Self::with_config(game, FinderConfig::default())
    }

    /// Create a finder with an explicit configuration.
    pub fn with_config(game: &'a Game, config: FinderConfig) -> Self {
        Self {
            game,
            config,
            equilibria: Vec::new(),
            mixed_equilibria: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Find all pure-strategy Nash equilibria, in profile-id order.
    ///
    /// Returns the number found. Stops early once the configured result
    /// cap is reached.
    pub fn find_pure(&mut self) -> usize {
        let begin = Instant::now();
        self.equilibria.clear();
        self.stats.profiles_scanned = 0;
        self.stats.pure_duration = Duration::ZERO;

        let game = self.game;
        let num_players = game.num_players();
        for sp in 0..game.num_strategy_profiles() {
            self.stats.profiles_scanned += 1;
            let mut profile = game.create_profile(sp);
            let payoff = game.payoff(&profile);
            let mut equilibrium = true;
            for p in 0..num_players {
                // Remember the original strategy played.
                let original = profile.strategy(p);
                for s in 0..game.num_player_strategies(p) {
                    // Switch the strategy for one player.
                    profile.set_strategy(p, s);
                    if game.payoff(&profile)[p] > payoff[p] {
                        // Player p gains by switching to s, so the profile
                        // is not a Nash equilibrium.
                        equilibrium = false;
                        break;
                    }
                }
                // Revert the tested strategy for player p.
                profile.set_strategy(p, original);
                if !equilibrium {
                    break;
                }
            }
            if equilibrium {
                self.equilibria.push(profile);
                if self.equilibria.len() >= self.config.max_equilibria {
                    break;
                }
            }
        }
        self.stats.pure_duration = begin.elapsed();
        self.equilibria.len()
    }

    /// Find mixed-strategy Nash equilibria. Returns the number found.
    pub fn find_mixed(&mut self) -> usize {
        self.find_mixed_with_callback(|_| {})
    }

    /// Like [`EquilibriaFinder::find_mixed`], invoking `callback` after
    /// each visited support combination (general-sum games only).
    pub fn find_mixed_with_callback<F>(&mut self, mut callback: F) -> usize
    where
        F: FnMut(&MixedProgress),
    {
        let begin = Instant::now();
        self.mixed_equilibria.clear();
        self.stats.lcp_duration = Duration::ZERO;
        self.stats.lp_duration = Duration::ZERO;
        self.stats.mixed_duration = Duration::ZERO;
        self.stats.supports_visited = 0;
        self.stats.lp_solves = 0;
        self.stats.lp_infeasible = 0;
        self.stats.lp_failures = 0;

        let lcp_begin = Instant::now();
        let build = builder::build(self.game);
        self.stats.lcp_duration = lcp_begin.elapsed();
        let solver = LpSolver::new(&build.lcp);

        if self.game.zero_sum() {
            // One minimization pass per player; all solutions share the
            // common game value.
            for p in 0..self.game.num_players() {
                let request = SolveRequest::optimize(p, Vec::new());
                if self.run_solve(&solver, &request, &build) {
                    break;
                }
            }
        } else {
            let total = self.num_support_combinations();
            let counts: Vec<usize> = (0..self.game.num_players())
                .map(|p| self.game.num_player_strategies(p))
                .collect();
            let mut masks = vec![1u32; counts.len()];
            loop {
                self.stats.supports_visited += 1;
                let request = self.support_request(&build, &masks);
                let cap_hit = self.run_solve(&solver, &request, &build);
                callback(&MixedProgress {
                    supports_visited: self.stats.supports_visited,
                    total_supports: total,
                    equilibria_found: self.mixed_equilibria.len(),
                });
                if cap_hit || !next_support(&mut masks, &counts) {
                    break;
                }
            }
        }
        self.stats.mixed_duration = begin.elapsed();
        self.mixed_equilibria.len()
    }

    /// Total number of support combinations, `Π (2^k − 1)` over the
    /// players' strategy counts `k`.
    pub fn num_support_combinations(&self) -> u64 {
        (0..self.game.num_players())
            .map(|p| (1u64 << self.game.num_player_strategies(p)) - 1)
            .product()
    }

    /// The game under search.
    pub fn game(&self) -> &Game {
        self.game
    }

    /// Pure equilibria found by the last [`EquilibriaFinder::find_pure`].
    pub fn equilibria(&self) -> &[StrategyProfile] {
        &self.equilibria
    }

    /// Mixed equilibria found by the last mixed pass.
    pub fn mixed_equilibria(&self) -> &[MixedStrategyProfile] {
        &self.mixed_equilibria
    }

    /// Counters and timings of the last passes.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Build the solve request selecting, per strategy, the tight side for
    /// in-support strategies and the zero side for the rest.
    fn support_request(&self, build: &LcpBuild, masks: &[u32]) -> SolveRequest {
        let mut sides = vec![PairSide::ZeroSide; build.lcp.num_pairs()];
        for (p, &mask) in masks.iter().enumerate() {
            for s in 0..self.game.num_player_strategies(p) {
                let pair_id = build.pair_ids[p][s]
                    .expect("general-sum build must have a pair per strategy");
                sides[pair_id] = if mask & (1 << s) != 0 {
                    PairSide::TightSide
                } else {
                    PairSide::ZeroSide
                };
            }
        }
        SolveRequest::feasibility(sides)
    }

    /// Run one LP pass and record its outcome. Returns true when the
    /// result cap has been reached.
    fn run_solve(&mut self, solver: &LpSolver, request: &SolveRequest, build: &LcpBuild) -> bool {
        let result = solver.solve(request);
        self.stats.lp_solves += 1;
        self.stats.lp_duration += result.solve_time;
        match result.status {
            LpStatus::Optimal(values) => {
                self.add_mixed_equilibrium(&values, &build.prob_vars);
                self.mixed_equilibria.len() >= self.config.max_equilibria
            }
            LpStatus::Infeasible => {
                self.stats.lp_infeasible += 1;
                false
            }
            LpStatus::Failed(_) => {
                self.stats.lp_failures += 1;
                false
            }
        }
    }

    /// Read the probability variables out of a solution vector and record
    /// the mixed profile, unless an equal one is already present.
    fn add_mixed_equilibrium(&mut self, values: &[f64], prob_vars: &[Vec<usize>]) {
        let mut mixed = MixedStrategyProfile::new(self.game.num_players());
        for (p, vars) in prob_vars.iter().enumerate() {
            mixed.set_num_strategies(p, vars.len());
            for (s, &var_id) in vars.iter().enumerate() {
                mixed.add_probability(p, s, values[var_id]);
            }
        }
        let duplicate = self
            .mixed_equilibria
            .iter()
            .any(|existing| existing.approx_eq(&mixed, DUPLICATE_EPSILON));
        if !duplicate {
            self.mixed_equilibria.push(mixed);
        }
    }
}

/// Advance the per-player support masks like a mixed-radix odometer with
/// digits in `[1, 2^k − 1]`. Returns false once every combination has
/// been visited.
pub(crate) fn next_support(masks: &mut [u32], strategy_counts: &[usize]) -> bool {
    for (mask, &count) in masks.iter_mut().zip(strategy_counts.iter()) {
        let limit = (1u32 << count) - 1;
        *mask += 1;
        if *mask <= limit {
            return true;
        }
        *mask = 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::game::{Outcome, Player};
    use std::collections::HashSet;

    fn two_by_two(name: &str, payoffs_by_profile: [[i32; 2]; 4]) -> Game {
        let mut game = Game::new(name);
        for (player_name, strategy_names) in
            [("Row", ["heads", "tails"]), ("Col", ["heads", "tails"])]
        {
            let mut player = Player::new(player_name);
            for strategy_name in strategy_names {
                let id = game.add_strategy(format!("{}-{}", player_name, strategy_name));
                player.add_strategy(id);
            }
            game.add_player(player);
        }
        for (i, payoff) in payoffs_by_profile.into_iter().enumerate() {
            let id = game.add_outcome(Outcome::new(format!("o{}", i), payoff.to_vec()));
            game.set_payoff(i, id);
        }
        game
    }

    /// Strategy 0 = defect. Payoffs in profile-id order:
    /// (d,d), (c,d), (d,c), (c,c).
    fn prisoners_dilemma() -> Game {
        two_by_two("Prisoner's Dilemma", [[1, 1], [0, 5], [5, 0], [3, 3]])
    }

    fn matching_pennies() -> Game {
        two_by_two("Matching Pennies", [[1, -1], [-1, 1], [-1, 1], [1, -1]])
    }

    /// Two pure equilibria at (0,0) and (1,1), one mixed.
    fn battle_of_the_sexes() -> Game {
        two_by_two("Battle of the Sexes", [[2, 1], [0, 0], [0, 0], [1, 2]])
    }

    #[test]
    fn test_prisoners_dilemma_pure() {
        let game = prisoners_dilemma();
        let mut finder = EquilibriaFinder::new(&game);
        assert_eq!(finder.find_pure(), 1);
        let profile = &finder.equilibria()[0];
        assert_eq!(profile.strategy(0), 0);
        assert_eq!(profile.strategy(1), 0);
        assert_eq!(finder.stats().profiles_scanned, 4);
    }

    #[test]
    fn test_matching_pennies_has_no_pure_equilibrium() {
        let game = matching_pennies();
        let mut finder = EquilibriaFinder::new(&game);
        assert_eq!(finder.find_pure(), 0);
    }

    #[test]
    fn test_matching_pennies_mixed() {
        let game = matching_pennies();
        assert!(game.zero_sum());
        let mut finder = EquilibriaFinder::new(&game);
        assert_eq!(finder.find_mixed(), 1, "duplicate per-player solutions collapse");
        let mixed = &finder.mixed_equilibria()[0];
        for p in 0..2 {
            for s in 0..2 {
                assert!(
                    (mixed.probability(p, s) - 0.5).abs() < 1e-6,
                    "player {} strategy {} should mix 50/50, got {}",
                    p,
                    s,
                    mixed.probability(p, s)
                );
            }
        }
        // Two objective passes (one per player), no support enumeration.
        assert_eq!(finder.stats().lp_solves, 2);
        assert_eq!(finder.stats().supports_visited, 0);
    }

    #[test]
    fn test_battle_of_the_sexes_pure_and_mixed() {
        let game = battle_of_the_sexes();
        assert!(!game.zero_sum());
        let mut finder = EquilibriaFinder::new(&game);
        assert_eq!(finder.find_pure(), 2);

        assert_eq!(finder.find_mixed(), 3);
        assert_eq!(finder.stats().supports_visited, 9);
        assert_eq!(finder.stats().lp_solves, 9);
        assert_eq!(finder.stats().lp_infeasible, 6);
        assert_eq!(finder.stats().lp_failures, 0);

        // The fully mixed equilibrium is (2/3, 1/3) vs (1/3, 2/3).
        let mixed = finder.mixed_equilibria().iter().find(|e| {
            (0..2).all(|p| (0..2).all(|s| e.probability(p, s) > 1e-6))
        });
        let mixed = mixed.expect("fully mixed equilibrium not found");
        assert!((mixed.probability(0, 0) - 2.0 / 3.0).abs() < 1e-6);
        assert!((mixed.probability(0, 1) - 1.0 / 3.0).abs() < 1e-6);
        assert!((mixed.probability(1, 0) - 1.0 / 3.0).abs() < 1e-6);
        assert!((mixed.probability(1, 1) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_result_cap_stops_pure_search_early() {
        let game = battle_of_the_sexes();
        let config = FinderConfig::new().with_max_equilibria(1);
        let mut finder = EquilibriaFinder::with_config(&game, config);
        assert_eq!(finder.find_pure(), 1);
        // (0, 0) is profile id 0, so the scan must stop after one profile.
        assert!(
            finder.stats().profiles_scanned < game.num_strategy_profiles(),
            "search should stop before scanning all profiles"
        );
    }

    #[test]
    fn test_result_cap_stops_mixed_search_early() {
        let game = battle_of_the_sexes();
        let config = FinderConfig::new().with_max_equilibria(1);
        let mut finder = EquilibriaFinder::with_config(&game, config);
        assert_eq!(finder.find_mixed(), 1);
        assert!(finder.stats().supports_visited < 9);
    }

    #[test]
    fn test_zero_result_cap_is_clamped_to_one() {
        let config = FinderConfig::new().with_max_equilibria(0);
        assert_eq!(config.max_equilibria(), 1);
        assert_eq!(FinderConfig::new().max_equilibria(), usize::MAX);
    }

    #[test]
    fn test_support_odometer_single_player() {
        let counts = [2usize];
        let mut masks = vec![1u32];
        let mut seen = vec![masks.clone()];
        while next_support(&mut masks, &counts) {
            seen.push(masks.clone());
        }
        assert_eq!(seen, vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_support_odometer_visits_every_combination_once() {
        let counts = [2usize, 3, 2];
        let expected = (0..counts.len())
            .map(|i| (1u64 << counts[i]) - 1)
            .product::<u64>();
        let mut masks = vec![1u32; counts.len()];
        let mut seen = HashSet::new();
        assert!(seen.insert(masks.clone()));
        let mut guard = 0;
        while next_support(&mut masks, &counts) {
            assert!(seen.insert(masks.clone()), "combination visited twice");
            guard += 1;
            assert!(guard < 1000, "odometer does not terminate");
        }
        assert_eq!(seen.len() as u64, expected);
    }

    #[test]
    fn test_mixed_progress_callback() {
        let game = battle_of_the_sexes();
        let mut finder = EquilibriaFinder::new(&game);
        let mut calls = 0u64;
        let mut last_total = 0;
        finder.find_mixed_with_callback(|progress| {
            calls += 1;
            assert_eq!(progress.supports_visited, calls);
            last_total = progress.total_supports;
        });
        assert_eq!(calls, 9);
        assert_eq!(last_total, 9);
    }
}
