//! Gambit outcome-format support.
//!
//! [`parser`] turns .nfg text into a [`StrategicGame`] record;
//! [`build_game`] turns that record into the solver's [`Game`] model.
//!
//! Construction inserts a null outcome (all-zero payoffs) at outcome id 0
//! so the file's payoff indices (where 0 means "no outcome") map onto
//! outcome ids directly. A record whose payoff vectors do not match the
//! player count, or whose index list does not cover every strategy
//! profile, describes a corrupt game and aborts.

pub mod parser;

pub use parser::{NfgError, ParsedOutcome, Parser, StrategicGame};

use crate::solver::game::{Game, Outcome, Player};

/// Build a [`Game`] from a parsed strategic-game record.
pub fn build_game(parsed: &StrategicGame) -> Game {
    let mut game = Game::new(parsed.name.clone());

    // Players and their strategies.
    assert_eq!(
        parsed.strategies.len(),
        parsed.players.len(),
        "one strategy list per player required"
    );
    for (player_name, strategy_names) in parsed.players.iter().zip(parsed.strategies.iter()) {
        let mut player = Player::new(player_name.clone());
        for strategy_name in strategy_names {
            let strategy_id = game.add_strategy(strategy_name.clone());
            player.add_strategy(strategy_id);
        }
        game.add_player(player);
    }
    assert_eq!(game.num_players(), parsed.players.len());

    // Outcomes, with the null outcome taking id 0.
    let null_outcome = Outcome::new("null", vec![0; game.num_players()]);
    game.add_outcome(null_outcome);
    for outcome in &parsed.outcomes {
        assert_eq!(
            outcome.payoffs.len(),
            game.num_players(),
            "outcome '{}' payoff vector length must equal player count",
            outcome.name
        );
        game.add_outcome(Outcome::new(outcome.name.clone(), outcome.payoffs.clone()));
    }
    assert_eq!(game.num_outcomes(), parsed.outcomes.len() + 1);

    // Payoff assignments for every strategy profile.
    assert_eq!(
        parsed.payoff_indices.len(),
        game.num_strategy_profiles(),
        "payoff-index count must equal the number of strategy profiles"
    );
    for (profile_id, &outcome_id) in parsed.payoff_indices.iter().enumerate() {
        game.set_payoff(profile_id, outcome_id);
    }
    game
}
