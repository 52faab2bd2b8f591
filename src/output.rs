//! Result export utilities.
//!
//! Turns a finished search into a serializable report and writes it as
//! pretty JSON for downstream analysis.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::solver::finder::EquilibriaFinder;
use crate::solver::game::Game;

/// One pure equilibrium entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PureEntry {
    /// Per-player chosen strategy indices.
    pub profile: Vec<usize>,
    /// Per-player chosen strategy names.
    pub strategies: Vec<String>,
}

/// One mixed equilibrium entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixedEntry {
    /// Per-player probability vectors, indexed by local strategy index.
    pub probabilities: Vec<Vec<f64>>,
}

/// Report metadata: game identity plus search counters and timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Game name.
    pub game: String,
    /// Player names.
    pub players: Vec<String>,
    /// Whether the game is zero-sum.
    pub zero_sum: bool,
    /// Pure-pass wall time in seconds.
    pub pure_seconds: f64,
    /// Mixed-pass wall time in seconds.
    pub mixed_seconds: f64,
    /// LCP construction time in seconds.
    pub lcp_seconds: f64,
    /// Cumulative LP solve time in seconds.
    pub lp_seconds: f64,
    /// LP solves attempted.
    pub lp_solves: u64,
    /// LP solves that were cleanly infeasible.
    pub lp_infeasible: u64,
    /// LP solves that failed for another engine reason.
    pub lp_failures: u64,
}

/// Complete search report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquilibriaReport {
    /// Search metadata.
    pub metadata: ReportMetadata,
    /// Pure equilibria, in profile-id order.
    pub pure: Vec<PureEntry>,
    /// Mixed equilibria, in discovery order.
    pub mixed: Vec<MixedEntry>,
}

impl EquilibriaReport {
    /// Build a report from a finder after its search passes have run.
    pub fn from_finder(finder: &EquilibriaFinder) -> Self {
        let game = finder.game();
        let stats = finder.stats();
        let pure = finder
            .equilibria()
            .iter()
            .map(|profile| PureEntry {
                profile: (0..game.num_players()).map(|p| profile.strategy(p)).collect(),
                strategies: (0..game.num_players())
                    .map(|p| {
                        let player = game.player(p);
                        game.strategy_name(player.strategy(profile.strategy(p)))
                            .to_string()
                    })
                    .collect(),
            })
            .collect();
        let mixed = finder
            .mixed_equilibria()
            .iter()
            .map(|profile| MixedEntry {
                probabilities: (0..game.num_players())
                    .map(|p| {
                        (0..game.num_player_strategies(p))
                            .map(|s| profile.probability(p, s))
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        Self {
            metadata: ReportMetadata {
                game: game.name().to_string(),
                players: (0..game.num_players())
                    .map(|p| game.player(p).name().to_string())
                    .collect(),
                zero_sum: game.zero_sum(),
                pure_seconds: stats.pure_duration.as_secs_f64(),
                mixed_seconds: stats.mixed_duration.as_secs_f64(),
                lcp_seconds: stats.lcp_duration.as_secs_f64(),
                lp_seconds: stats.lp_duration.as_secs_f64(),
                lp_solves: stats.lp_solves,
                lp_infeasible: stats.lp_infeasible,
                lp_failures: stats.lp_failures,
            },
            pure,
            mixed,
        }
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())
    }
}

/// Convenience hook for callers that only have the game at hand.
pub fn describe_game(game: &Game) -> String {
    let strategies: Vec<String> = (0..game.num_players())
        .map(|p| {
            format!(
                "{} ({} strategies)",
                game.player(p).name(),
                game.num_player_strategies(p)
            )
        })
        .collect();
    format!(
        "{}: {} players [{}], {} outcomes, {} profiles{}",
        game.name(),
        game.num_players(),
        strategies.join(", "),
        game.num_outcomes(),
        game.num_strategy_profiles(),
        if game.zero_sum() { ", zero-sum" } else { "" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::finder::EquilibriaFinder;
    use crate::solver::game::{Outcome, Player};

    fn prisoners_dilemma() -> Game {
        let mut game = Game::new("Prisoner's Dilemma");
        for name in ["Alice", "Bob"] {
            let mut player = Player::new(name);
            for strategy in ["defect", "cooperate"] {
                let id = game.add_strategy(format!("{}-{}", name, strategy));
                player.add_strategy(id);
            }
            game.add_player(player);
        }
        for (i, payoff) in [[1, 1], [0, 5], [5, 0], [3, 3]].into_iter().enumerate() {
            let id = game.add_outcome(Outcome::new(format!("o{}", i), payoff.to_vec()));
            game.set_payoff(i, id);
        }
        game
    }

    #[test]
    fn test_report_from_finder() {
        let game = prisoners_dilemma();
        let mut finder = EquilibriaFinder::new(&game);
        finder.find_pure();
        finder.find_mixed();
        let report = EquilibriaReport::from_finder(&finder);
        assert_eq!(report.metadata.game, "Prisoner's Dilemma");
        assert_eq!(report.metadata.players, vec!["Alice", "Bob"]);
        assert!(!report.metadata.zero_sum);
        assert_eq!(report.pure.len(), 1);
        assert_eq!(report.pure[0].profile, vec![0, 0]);
        assert_eq!(report.pure[0].strategies[0], "Alice-defect");
        assert_eq!(report.mixed.len(), 1);

        let json = serde_json::to_string(&report).expect("serialization failed");
        assert!(json.contains("\"pure\""));
        assert!(json.contains("\"lp_solves\""));
    }

    #[test]
    fn test_describe_game() {
        let game = prisoners_dilemma();
        let description = describe_game(&game);
        assert!(description.contains("2 players"));
        assert!(description.contains("4 profiles"));
        assert!(!description.contains("zero-sum"));
    }
}
