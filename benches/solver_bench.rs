//! Benchmarks for the equilibrium search passes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nash_solver::solver::{EquilibriaFinder, Game, Outcome, Player};

/// A three-player game with `strategies` strategies per player and
/// payoffs spread deterministically over a small outcome set.
fn coordination_game(strategies: usize) -> Game {
    let mut game = Game::new("coordination");
    for p in 0..3 {
        let mut player = Player::new(format!("P{}", p));
        for s in 0..strategies {
            let id = game.add_strategy(format!("p{}s{}", p, s));
            player.add_strategy(id);
        }
        game.add_player(player);
    }
    let agree = game.add_outcome(Outcome::new("agree", vec![2, 2, 2]));
    let clash = game.add_outcome(Outcome::new("clash", vec![0, 1, 0]));
    for profile_id in 0..game.num_strategy_profiles() {
        let profile = game.create_profile(profile_id);
        let outcome = if (0..3).all(|p| profile.strategy(p) == profile.strategy(0)) {
            agree
        } else {
            clash
        };
        game.set_payoff(profile_id, outcome);
    }
    game
}

fn battle_of_the_sexes() -> Game {
    let mut game = Game::new("Battle of the Sexes");
    for name in ["Row", "Col"] {
        let mut player = Player::new(name);
        for strategy in ["opera", "football"] {
            let id = game.add_strategy(format!("{}-{}", name, strategy));
            player.add_strategy(id);
        }
        game.add_player(player);
    }
    for (i, payoff) in [[2, 1], [0, 0], [0, 0], [1, 2]].into_iter().enumerate() {
        let id = game.add_outcome(Outcome::new(format!("o{}", i), payoff.to_vec()));
        game.set_payoff(i, id);
    }
    game
}

fn pure_search_benchmark(c: &mut Criterion) {
    let game = coordination_game(6);
    c.bench_function("pure_search_3p_6s", |b| {
        b.iter(|| {
            let mut finder = EquilibriaFinder::new(black_box(&game));
            black_box(finder.find_pure())
        })
    });
}

fn mixed_search_benchmark(c: &mut Criterion) {
    let game = battle_of_the_sexes();
    c.bench_function("mixed_search_bos", |b| {
        b.iter(|| {
            let mut finder = EquilibriaFinder::new(black_box(&game));
            black_box(finder.find_mixed())
        })
    });
}

criterion_group!(benches, pure_search_benchmark, mixed_search_benchmark);
criterion_main!(benches);
