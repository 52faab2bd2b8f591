//! LCP construction from a game.
//!
//! For every player `p` the builder allocates one payoff variable `A_p`
//! and, per strategy `s`, one probability variable `prob(p, s)`. It then
//! emits:
//!
//! - `prob(p, s) >= 0` for every strategy,
//! - the linearized best-response row
//!   `A_p - Σ payoff_p(profile) · prob(p2, profile[p2]) >= 0`
//!   accumulated over every profile where `p` plays `s`,
//! - `Σ_s prob(p, s) = 1` per player,
//! - general-sum only: an equality copy of each (non-negativity,
//!   best-response) pair registered as one complementary pair,
//! - zero-sum only: a `min A_p` objective per player and the chained
//!   equalities `A_0 = A_1 = ... = A_{n-1}` for the common game value.
//!
//! The best-response condition is genuinely bilinear; fixing the
//! opponents' strategies per profile makes each row linear. For 2-player
//! games this degenerates to the standard bimatrix LCP form; for more
//! players the accumulation sums summands across all matching profiles
//! (duplicates are merged later by the LP adapter).

use rustc_hash::FxHashMap;

use super::equation::{Direction, Equation, Objective, Relation, VarId};
use super::game::Game;
use super::lcp::{Lcp, PairId};

/// The output of [`build`]: the LCP plus the lookup tables the finder
/// needs to drive support enumeration and read solutions back.
#[derive(Debug, Clone)]
pub struct LcpBuild {
    /// The constructed problem.
    pub lcp: Lcp,
    /// Payoff variable id per player.
    pub payoff_vars: Vec<VarId>,
    /// Probability variable ids, indexed `[player][strategy]`.
    pub prob_vars: Vec<Vec<VarId>>,
    /// Complementary-pair ids, indexed `[player][strategy]`.
    /// All `None` for zero-sum games, which have no pairs.
    pub pair_ids: Vec<Vec<Option<PairId>>>,
}

fn payoff_var_name(player_id: usize) -> String {
    assert!(player_id < 26, "too many players for variable naming");
    char::from(b'A' + player_id as u8).to_string()
}

fn prob_var_name(player_id: usize, strategy_index: usize) -> String {
    assert!(player_id < 26, "too many players for variable naming");
    format!("{}{}", char::from(b'a' + player_id as u8), strategy_index)
}

/// Intern the probability variable for `(player, strategy)`, creating it
/// on first use.
fn prob_var(
    lcp: &mut Lcp,
    table: &mut FxHashMap<(usize, usize), VarId>,
    player_id: usize,
    strategy_index: usize,
) -> VarId {
    *table
        .entry((player_id, strategy_index))
        .or_insert_with(|| lcp.add_variable(prob_var_name(player_id, strategy_index)))
}

/// Construct the LCP encoding the equilibrium conditions of `game`.
pub fn build(game: &Game) -> LcpBuild {
    let mut lcp = Lcp::new();
    let zero_sum = game.zero_sum();
    let num_players = game.num_players();

    let mut interned: FxHashMap<(usize, usize), VarId> = FxHashMap::default();
    let mut payoff_vars = Vec::with_capacity(num_players);
    let mut pair_ids: Vec<Vec<Option<PairId>>> = (0..num_players)
        .map(|p| vec![None; game.num_player_strategies(p)])
        .collect();

    for p in 0..num_players {
        let payoff_var_id = lcp.add_variable(payoff_var_name(p));
        payoff_vars.push(payoff_var_id);
        if zero_sum {
            let mut objective = Objective::new(Direction::Minimize);
            objective.add_summand(1, payoff_var_id);
            let objective_id = lcp.add_objective(objective);
            assert_eq!(objective_id, p, "objective ids must follow player order");
        }
        for s in 0..game.num_player_strategies(p) {
            let var_id = prob_var(&mut lcp, &mut interned, p, s);

            let mut non_negative = Equation::new(Relation::GreaterEqual, 0);
            non_negative.add_summand(1, var_id);

            let mut best_response = Equation::new(Relation::GreaterEqual, 0);
            best_response.add_summand(1, payoff_var_id);
            for sp in 0..game.num_strategy_profiles() {
                let profile = game.create_profile(sp);
                if profile[p] != s {
                    continue;
                }
                let p_payoff = game.payoff(&profile)[p];
                for p2 in 0..num_players {
                    if p2 == p {
                        continue;
                    }
                    let opponent_var = prob_var(&mut lcp, &mut interned, p2, profile[p2]);
                    best_response.add_summand(-p_payoff, opponent_var);
                }
            }

            lcp.add_equation(non_negative.clone());
            lcp.add_equation(best_response.clone());
            if !zero_sum {
                non_negative.set_relation(Relation::Equal);
                best_response.set_relation(Relation::Equal);
                let pair_id = lcp.add_compl_pair(non_negative, best_response);
                assert!(pair_ids[p][s].is_none());
                pair_ids[p][s] = Some(pair_id);
            }
        }

        // Probabilities of each player form a distribution.
        let mut normalization = Equation::new(Relation::Equal, 1);
        for s in 0..game.num_player_strategies(p) {
            normalization.add_summand(1, interned[&(p, s)]);
        }
        lcp.add_equation(normalization);
    }

    if zero_sum {
        // One player's gain is another's loss, so all payoff variables
        // share the common game value.
        assert!(num_players > 1, "zero-sum game needs at least two players");
        for i in 1..num_players {
            let mut chain = Equation::new(Relation::Equal, 0);
            chain.add_summand(1, payoff_vars[i - 1]);
            chain.add_summand(-1, payoff_vars[i]);
            lcp.add_equation(chain);
        }
    }

    let prob_vars = (0..num_players)
        .map(|p| {
            (0..game.num_player_strategies(p))
                .map(|s| interned[&(p, s)])
                .collect()
        })
        .collect();

    LcpBuild {
        lcp,
        payoff_vars,
        prob_vars,
        pair_ids,
    }
}
