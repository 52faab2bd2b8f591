//! Game model for finite normal-form strategic games.
//!
//! A [`Game`] owns its players, a global strategy-name table, an outcome
//! table and a flattened payoff-index table that maps every strategy
//! profile to one of the outcomes. Strategy profiles are encoded with a
//! mixed-radix scheme where player 0 is the least significant digit and
//! the base at position `i` is player `i`'s strategy count:
//!
//! ```text
//! profile_id = Σ profile[i] · Π_{j<i} num_strategies(j)
//! ```
//!
//! [`Game::profile_id`] and [`Game::create_profile`] are exact inverses of
//! each other for every valid profile.
//!
//! Structural violations (size mismatches, out-of-range indices, missing
//! outcome assignments) indicate a corrupt game description and abort via
//! assertion; they are never recoverable errors.

use std::cmp;
use std::fmt;

/// A player with a name and an ordered list of strategies.
///
/// Each entry in the strategy list is a global id into the owning game's
/// strategy-name table; the position within the list is the player-local
/// strategy index used by [`StrategyProfile`].
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    strategies: Vec<usize>,
}

impl Player {
    /// Create a player with no strategies yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strategies: Vec::new(),
        }
    }

    /// Append a global strategy id; returns the player-local index.
    pub fn add_strategy(&mut self, strategy_id: usize) -> usize {
        self.strategies.push(strategy_id);
        self.strategies.len() - 1
    }

    /// Global strategy id for a player-local index.
    pub fn strategy(&self, index: usize) -> usize {
        assert!(index < self.strategies.len(), "strategy index out of range");
        self.strategies[index]
    }

    /// Number of strategies this player has.
    pub fn num_strategies(&self) -> usize {
        self.strategies.len()
    }

    /// The player's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An outcome: a name plus one integer payoff per player.
#[derive(Debug, Clone)]
pub struct Outcome {
    name: String,
    payoffs: Vec<i32>,
}

impl Outcome {
    /// Create an outcome from a name and a payoff vector.
    pub fn new(name: impl Into<String>, payoffs: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            payoffs,
        }
    }

    /// Payoff vector, one entry per player.
    pub fn payoffs(&self) -> &[i32] {
        &self.payoffs
    }

    /// The outcome's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One chosen strategy per player (a joint action).
///
/// Entries are player-local strategy indices. The profile is mutable in
/// place via [`StrategyProfile::set_strategy`] so the pure-equilibrium
/// search can test unilateral deviations without reallocating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyProfile {
    strategies: Vec<usize>,
}

impl StrategyProfile {
    /// Create a profile from explicit per-player strategy indices.
    pub fn new(strategies: Vec<usize>) -> Self {
        Self { strategies }
    }

    /// Create a profile where every player picks the same strategy index.
    pub fn uniform(num_players: usize, strategy_index: usize) -> Self {
        Self {
            strategies: vec![strategy_index; num_players],
        }
    }

    /// The chosen strategy index of one player.
    pub fn strategy(&self, player_id: usize) -> usize {
        assert!(player_id < self.strategies.len(), "player id out of range");
        self.strategies[player_id]
    }

    /// Replace one player's chosen strategy index.
    pub fn set_strategy(&mut self, player_id: usize, strategy_index: usize) {
        assert!(player_id < self.strategies.len(), "player id out of range");
        self.strategies[player_id] = strategy_index;
    }

    /// Number of players covered by this profile.
    pub fn size(&self) -> usize {
        self.strategies.len()
    }

    /// Human-readable form with player and strategy names from the game.
    pub fn describe(&self, game: &Game) -> String {
        let parts: Vec<String> = self
            .strategies
            .iter()
            .enumerate()
            .map(|(p, &s)| {
                let player = game.player(p);
                format!("{}: {}", player.name(), game.strategy_name(player.strategy(s)))
            })
            .collect();
        format!("({})", parts.join(", "))
    }
}

impl std::ops::Index<usize> for StrategyProfile {
    type Output = usize;

    fn index(&self, player_id: usize) -> &usize {
        &self.strategies[player_id]
    }
}

impl fmt::Display for StrategyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.strategies.iter().map(|s| s.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

/// A probability distribution per player over their strategies.
///
/// Probabilities default to 0 and are filled in via
/// [`MixedStrategyProfile::add_probability`]; each player's entries are
/// expected to sum to 1 but that is not enforced here.
#[derive(Debug, Clone)]
pub struct MixedStrategyProfile {
    probs: Vec<Vec<f64>>,
}

impl MixedStrategyProfile {
    /// Create an empty mixed profile for the given number of players.
    pub fn new(num_players: usize) -> Self {
        Self {
            probs: vec![Vec::new(); num_players],
        }
    }

    /// Size a player's probability vector; all entries start at 0.
    pub fn set_num_strategies(&mut self, player_id: usize, num_strategies: usize) {
        assert!(player_id < self.probs.len(), "player id out of range");
        self.probs[player_id] = vec![0.0; num_strategies];
    }

    /// Set the probability of one (player, strategy) entry.
    pub fn add_probability(&mut self, player_id: usize, strategy_index: usize, prob: f64) {
        assert!(player_id < self.probs.len(), "player id out of range");
        assert!(
            strategy_index < self.probs[player_id].len(),
            "strategy index out of range"
        );
        self.probs[player_id][strategy_index] = prob;
    }

    /// Probability assigned to one (player, strategy) entry.
    pub fn probability(&self, player_id: usize, strategy_index: usize) -> f64 {
        self.probs[player_id][strategy_index]
    }

    /// Number of players covered by this profile.
    pub fn size(&self) -> usize {
        self.probs.len()
    }

    /// True if every probability differs by less than `epsilon`.
    ///
    /// Used to drop duplicate equilibria found through different supports
    /// or objective passes.
    pub fn approx_eq(&self, other: &MixedStrategyProfile, epsilon: f64) -> bool {
        if self.probs.len() != other.probs.len() {
            return false;
        }
        self.probs.iter().zip(other.probs.iter()).all(|(a, b)| {
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < epsilon)
        })
    }

    /// Human-readable form listing each player's support with probabilities.
    pub fn describe(&self, game: &Game) -> String {
        let parts: Vec<String> = self
            .probs
            .iter()
            .enumerate()
            .map(|(p, probs)| {
                let player = game.player(p);
                let support: Vec<String> = probs
                    .iter()
                    .enumerate()
                    .filter(|(_, &prob)| prob > 1e-6)
                    .map(|(s, &prob)| {
                        format!("{}: {:.4}", game.strategy_name(player.strategy(s)), prob)
                    })
                    .collect();
                format!("{}: {{{}}}", player.name(), support.join(", "))
            })
            .collect();
        format!("({})", parts.join(", "))
    }
}

/// A finite normal-form game.
///
/// Built once (players first, then outcomes, then payoff assignments) and
/// read-only during a solve.
#[derive(Debug, Clone)]
pub struct Game {
    name: String,
    players: Vec<Player>,
    outcomes: Vec<Outcome>,
    payoff_indices: Vec<Option<usize>>,
    strategies: Vec<String>,
    zero_sum: bool,
}

impl Game {
    /// Create an empty game.
    ///
    /// An empty game is vacuously zero-sum; the flag is AND-combined as
    /// outcomes are added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
            outcomes: Vec::new(),
            payoff_indices: Vec::new(),
            strategies: Vec::new(),
            zero_sum: true,
        }
    }

    /// Add a player; returns the player id.
    ///
    /// Grows the payoff-index table so its length stays the product of all
    /// players' strategy counts.
    pub fn add_player(&mut self, player: Player) -> usize {
        let n = player.num_strategies();
        let space = cmp::max(n, n * self.payoff_indices.len());
        self.payoff_indices.resize(space, None);
        self.players.push(player);
        self.players.len() - 1
    }

    /// Register a global strategy name; returns its global id.
    pub fn add_strategy(&mut self, name: impl Into<String>) -> usize {
        self.strategies.push(name.into());
        self.strategies.len() - 1
    }

    /// Add an outcome; returns the outcome id and updates the zero-sum flag.
    pub fn add_outcome(&mut self, outcome: Outcome) -> usize {
        let sum: i64 = outcome.payoffs().iter().map(|&p| p as i64).sum();
        self.zero_sum = self.zero_sum && sum == 0;
        self.outcomes.push(outcome);
        self.outcomes.len() - 1
    }

    /// Assign an outcome to a strategy profile.
    pub fn set_payoff_for_profile(&mut self, profile: &StrategyProfile, outcome_id: usize) {
        let id = self.profile_id(profile);
        self.set_payoff(id, outcome_id);
    }

    /// Assign an outcome to a flattened profile id.
    pub fn set_payoff(&mut self, profile_id: usize, outcome_id: usize) {
        assert!(
            profile_id < self.num_strategy_profiles(),
            "profile id {} out of range",
            profile_id
        );
        assert!(
            outcome_id < self.outcomes.len(),
            "outcome id {} out of range",
            outcome_id
        );
        self.payoff_indices[profile_id] = Some(outcome_id);
    }

    /// Decode a flattened profile id back into a [`StrategyProfile`].
    ///
    /// Repeated div/mod against each player's strategy count, player 0
    /// first (least significant).
    pub fn create_profile(&self, profile_id: usize) -> StrategyProfile {
        assert!(
            profile_id < self.num_strategy_profiles(),
            "profile id {} out of range",
            profile_id
        );
        let mut rest = profile_id;
        let mut strategies = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let n = player.num_strategies();
            strategies.push(rest % n);
            rest /= n;
        }
        StrategyProfile::new(strategies)
    }

    /// Encode a profile into its flattened id (inverse of
    /// [`Game::create_profile`]).
    pub fn profile_id(&self, profile: &StrategyProfile) -> usize {
        assert!(self.valid(profile), "invalid strategy profile {}", profile);
        let mut product = 1;
        let mut id = 0;
        for (i, player) in self.players.iter().enumerate() {
            id += profile[i] * product;
            product *= player.num_strategies();
        }
        id
    }

    /// Payoff vector of the outcome assigned to a profile.
    ///
    /// Aborts if the profile is invalid or has no outcome assigned.
    pub fn payoff(&self, profile: &StrategyProfile) -> &[i32] {
        let id = self.profile_id(profile);
        let outcome_id = match self.payoff_indices[id] {
            Some(o) => o,
            None => panic!("profile {} has no outcome assigned", profile),
        };
        self.outcomes[outcome_id].payoffs()
    }

    /// A player by id.
    pub fn player(&self, player_id: usize) -> &Player {
        assert!(player_id < self.players.len(), "player id out of range");
        &self.players[player_id]
    }

    /// A global strategy name by id.
    pub fn strategy_name(&self, strategy_id: usize) -> &str {
        assert!(strategy_id < self.strategies.len(), "strategy id out of range");
        &self.strategies[strategy_id]
    }

    /// Number of strategy profiles (product of all strategy counts).
    pub fn num_strategy_profiles(&self) -> usize {
        self.payoff_indices.len()
    }

    /// Number of players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Number of globally registered strategy names.
    pub fn num_strategies(&self) -> usize {
        self.strategies.len()
    }

    /// Number of strategies of one player.
    pub fn num_player_strategies(&self, player_id: usize) -> usize {
        self.player(player_id).num_strategies()
    }

    /// Number of outcomes.
    pub fn num_outcomes(&self) -> usize {
        self.outcomes.len()
    }

    /// True iff every added outcome's payoffs sum to zero.
    pub fn zero_sum(&self) -> bool {
        self.zero_sum
    }

    /// The game's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn valid(&self, profile: &StrategyProfile) -> bool {
        profile.size() == self.players.len()
            && self
                .players
                .iter()
                .enumerate()
                .all(|(i, player)| profile[i] < player.num_strategies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Build a game with the given per-player strategy counts and no
    /// outcomes assigned.
    fn shape_game(counts: &[usize]) -> Game {
        let mut game = Game::new("shape");
        for (p, &n) in counts.iter().enumerate() {
            let mut player = Player::new(format!("p{}", p));
            for s in 0..n {
                let id = game.add_strategy(format!("p{}s{}", p, s));
                player.add_strategy(id);
            }
            game.add_player(player);
        }
        game
    }

    /// 2x2 Prisoner's Dilemma: strategy 0 = defect, strategy 1 = cooperate.
    fn prisoners_dilemma() -> Game {
        let mut game = Game::new("Prisoner's Dilemma");
        for name in ["Alice", "Bob"] {
            let mut player = Player::new(name);
            let d = game.add_strategy(format!("{}-defect", name));
            let c = game.add_strategy(format!("{}-cooperate", name));
            player.add_strategy(d);
            player.add_strategy(c);
            game.add_player(player);
        }
        let outcomes = [
            ("dd", vec![1, 1]),
            ("cd", vec![0, 5]),
            ("dc", vec![5, 0]),
            ("cc", vec![3, 3]),
        ];
        for (i, (name, payoffs)) in outcomes.into_iter().enumerate() {
            let id = game.add_outcome(Outcome::new(name, payoffs));
            game.set_payoff(i, id);
        }
        game
    }

    #[test]
    fn test_profile_table_size() {
        let game = shape_game(&[2, 3, 4]);
        assert_eq!(game.num_strategy_profiles(), 24);
        assert_eq!(game.num_players(), 3);
        assert_eq!(game.num_strategies(), 9);
        assert_eq!(game.num_player_strategies(1), 3);
    }

    #[test]
    fn test_profile_id_round_trip() {
        let game = shape_game(&[2, 3, 4]);
        for id in 0..game.num_strategy_profiles() {
            let profile = game.create_profile(id);
            assert_eq!(game.profile_id(&profile), id);
        }
    }

    #[test]
    fn test_profile_id_round_trip_random_shapes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let num_players = rng.gen_range(1..=4);
            let counts: Vec<usize> =
                (0..num_players).map(|_| rng.gen_range(1..=5)).collect();
            let game = shape_game(&counts);
            assert_eq!(
                game.num_strategy_profiles(),
                counts.iter().product::<usize>()
            );
            for id in 0..game.num_strategy_profiles() {
                assert_eq!(game.profile_id(&game.create_profile(id)), id);
            }
        }
    }

    #[test]
    fn test_mixed_radix_encoding_order() {
        // Player 0 is the least significant digit.
        let game = shape_game(&[2, 3]);
        assert_eq!(game.profile_id(&StrategyProfile::new(vec![1, 0])), 1);
        assert_eq!(game.profile_id(&StrategyProfile::new(vec![0, 1])), 2);
        assert_eq!(game.profile_id(&StrategyProfile::new(vec![1, 2])), 5);
    }

    #[test]
    fn test_payoff_lookup() {
        let game = prisoners_dilemma();
        assert_eq!(game.payoff(&StrategyProfile::new(vec![0, 0])), &[1, 1]);
        assert_eq!(game.payoff(&StrategyProfile::new(vec![1, 0])), &[0, 5]);
        assert_eq!(game.payoff(&StrategyProfile::new(vec![0, 1])), &[5, 0]);
        assert_eq!(game.payoff(&StrategyProfile::new(vec![1, 1])), &[3, 3]);
        for id in 0..game.num_strategy_profiles() {
            let profile = game.create_profile(id);
            assert_eq!(game.payoff(&profile).len(), game.num_players());
        }
    }

    #[test]
    fn test_zero_sum_flag() {
        let mut game = shape_game(&[2, 2]);
        assert!(game.zero_sum(), "empty game is vacuously zero-sum");
        game.add_outcome(Outcome::new("win", vec![1, -1]));
        assert!(game.zero_sum());
        game.add_outcome(Outcome::new("skew", vec![2, 1]));
        assert!(!game.zero_sum());
        // The flag never recovers once broken.
        game.add_outcome(Outcome::new("even", vec![0, 0]));
        assert!(!game.zero_sum());
    }

    #[test]
    fn test_profile_mutation() {
        let mut profile = StrategyProfile::uniform(3, 0);
        profile.set_strategy(1, 2);
        assert_eq!(profile.strategy(1), 2);
        assert_eq!(profile[0], 0);
        assert_eq!(profile.size(), 3);
    }

    #[test]
    #[should_panic(expected = "invalid strategy profile")]
    fn test_payoff_rejects_wrong_size() {
        let game = prisoners_dilemma();
        game.payoff(&StrategyProfile::new(vec![0]));
    }

    #[test]
    #[should_panic(expected = "invalid strategy profile")]
    fn test_payoff_rejects_out_of_range_strategy() {
        let game = prisoners_dilemma();
        game.payoff(&StrategyProfile::new(vec![0, 2]));
    }

    #[test]
    fn test_describe() {
        let game = prisoners_dilemma();
        let profile = StrategyProfile::new(vec![0, 1]);
        assert_eq!(
            profile.describe(&game),
            "(Alice: Alice-defect, Bob: Bob-cooperate)"
        );
    }

    #[test]
    fn test_mixed_profile() {
        let mut mixed = MixedStrategyProfile::new(2);
        mixed.set_num_strategies(0, 2);
        mixed.set_num_strategies(1, 2);
        mixed.add_probability(0, 0, 0.5);
        mixed.add_probability(0, 1, 0.5);
        mixed.add_probability(1, 0, 1.0);
        assert_eq!(mixed.probability(0, 1), 0.5);
        assert_eq!(mixed.probability(1, 1), 0.0);

        let clone = mixed.clone();
        assert!(mixed.approx_eq(&clone, 1e-9));
        let mut other = clone;
        other.add_probability(1, 0, 0.9);
        assert!(!mixed.approx_eq(&other, 1e-6));
    }
}
