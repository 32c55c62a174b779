//! Determinism verification tests
//!
//! The same configuration and seed must reproduce the same game move for
//! move, including the random-move draws.

use runner::config::{GameConfig, PlayerConfig, Scenario, SearchMode};
use runner::game::Game;
use runner::log::RoundLog;

fn noisy_config(seed: u64) -> GameConfig {
    GameConfig {
        scenario: Scenario::Matchsticks { pairs: 3 },
        players: vec![
            PlayerConfig {
                node: 0,
                search: SearchMode::AdditionsAndRemovals,
                random_move_chance: 0.5,
            },
            PlayerConfig {
                node: 2,
                search: SearchMode::Additions,
                random_move_chance: 0.5,
            },
        ],
        rounds: 6,
        seed,
        cache_capacity: None,
        log_path: None,
    }
}

fn play(config: &GameConfig) -> (String, String) {
    let mut game = Game::from_config(config);
    let summary = game.play(&mut RoundLog::null()).unwrap();
    let summary_json = serde_json::to_string(&summary).unwrap();
    let graph_json = serde_json::to_string(game.graph()).unwrap();
    (summary_json, graph_json)
}

#[test]
fn test_same_seed_reproduces_the_game() {
    let config = noisy_config(42);
    let (summary_a, graph_a) = play(&config);
    let (summary_b, graph_b) = play(&config);

    assert_eq!(summary_a, summary_b, "summaries should match for one seed");
    assert_eq!(graph_a, graph_b, "final graphs should match for one seed");
}

#[test]
fn test_different_seeds_usually_diverge() {
    // Pure random walks: agreeing on every draw across sixteen turns is
    // vanishingly unlikely for two seeds.
    let mut config = noisy_config(1);
    config.rounds = 8;
    for player in &mut config.players {
        player.random_move_chance = 1.0;
        player.search = SearchMode::AdditionsAndRemovals;
    }
    let (_, graph_a) = play(&config);

    config.seed = 2;
    let (_, graph_b) = play(&config);
    assert_ne!(graph_a, graph_b, "different seeds should diverge");
}

#[test]
fn test_greedy_play_is_seed_independent() {
    // Without random moves the seed never matters.
    let mut config = noisy_config(7);
    for player in &mut config.players {
        player.random_move_chance = 0.0;
    }
    let (summary_a, graph_a) = play(&config);

    config.seed = 1234;
    let (summary_b, graph_b) = play(&config);

    assert_eq!(summary_a, summary_b);
    assert_eq!(graph_a, graph_b);
}
