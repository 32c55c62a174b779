//! Network formation game runner.
//!
//! Run with: cargo run -p runner
//!
//! Examples:
//!   cargo run -p runner -- --scenario matchsticks --pairs 10 --rounds 20
//!   cargo run -p runner -- --config game.toml --opponent 5 --log rounds.jsonl

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use runner::config::{GameConfig, PlayerConfig, Scenario};
use runner::game::Game;
use runner::log::RoundLog;

/// Greedy network formation game over centrality scores
#[derive(Parser, Debug)]
#[command(name = "netgame")]
#[command(about = "Greedy network formation game over centrality scores")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting graph shape
    #[arg(long, value_enum)]
    scenario: Option<ScenarioArg>,

    /// Node count for the empty/ring/star scenarios
    #[arg(long, default_value_t = 20)]
    nodes: usize,

    /// Pair count for the matchsticks scenario
    #[arg(long, default_value_t = 10)]
    pairs: usize,

    /// Maximum number of rounds
    #[arg(long)]
    rounds: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Add a second, zero-sum player at this node
    #[arg(long)]
    opponent: Option<usize>,

    /// Chance in [0, 1] that each player moves randomly instead of greedily
    #[arg(long)]
    random_move_chance: Option<f64>,

    /// Append round records to this JSONL file
    #[arg(long)]
    log: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum ScenarioArg {
    Empty,
    Ring,
    Star,
    Matchsticks,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let mut log = match &config.log_path {
        Some(path) => RoundLog::create(path)?,
        None => RoundLog::null(),
    };

    let mut game = Game::from_config(&config);
    let summary = game.play(&mut log)?;

    tracing::info!(
        rounds = summary.rounds_played,
        moves = summary.moves_applied,
        "game over"
    );
    for player in &summary.final_scores {
        tracing::info!(node = player.node, score = player.score, "final score");
    }
    Ok(())
}

fn apply_overrides(config: &mut GameConfig, args: &Args) {
    if let Some(scenario) = args.scenario {
        config.scenario = match scenario {
            ScenarioArg::Empty => Scenario::Empty { nodes: args.nodes },
            ScenarioArg::Ring => Scenario::Ring { nodes: args.nodes },
            ScenarioArg::Star => Scenario::Star { nodes: args.nodes },
            ScenarioArg::Matchsticks => Scenario::Matchsticks { pairs: args.pairs },
        };
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(node) = args.opponent {
        config.players.push(PlayerConfig::at(node));
    }
    if let Some(chance) = args.random_move_chance {
        for player in &mut config.players {
            player.random_move_chance = chance;
        }
    }
    if let Some(path) = &args.log {
        config.log_path = Some(path.clone());
    }
}
