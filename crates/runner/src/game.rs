//! The round loop.
//!
//! Each round, every player in turn searches for its best move and applies
//! it permanently when the improvement is non-negative. A player may
//! instead be configured to sometimes move uniformly at random, which is
//! applied regardless of improvement; the draw is seeded so runs
//! reproduce. Two-player games are zero-sum: each search treats the other
//! player as the opponent.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;

use game_graph::{Graph, NodeId};
use strategy::{
    best_addition, best_addition_or_removal, best_removal, improvement, toggle_candidates,
    Betweenness, CachedScorer, EdgePresence, Evaluation, ScoreCache, Scorer, StrategyError,
};

use crate::config::{GameConfig, SearchMode};
use crate::log::RoundLog;

/// Errors from playing a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// Search or scoring failure
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    /// Round log failure
    #[error("failed to write round log: {0}")]
    Log(#[from] std::io::Error),
}

/// A player in the running game.
#[derive(Debug, Clone)]
pub struct Player {
    pub node: NodeId,
    pub search: SearchMode,
    pub random_move_chance: f64,
}

/// One player's outcome in one round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    /// Round index, starting at zero
    pub round: usize,
    /// The acting player's node
    pub player: NodeId,
    /// Label of the chosen action; absent when the player passed without
    /// a candidate
    pub action: Option<String>,
    /// Improvement the action was evaluated at
    pub improvement: Option<f64>,
    /// Whether the action was applied to the graph
    pub applied: bool,
    /// The player's score after the turn resolved
    pub score: f64,
}

/// A player's score at the end of a game.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerScore {
    pub node: NodeId,
    pub score: f64,
}

/// Outcome of a full game.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    /// Rounds actually played (the game stops early once every player
    /// passes in the same round)
    pub rounds_played: usize,
    /// Moves applied across all players
    pub moves_applied: usize,
    /// Final score per player
    pub final_scores: Vec<PlayerScore>,
}

/// A running game: graph, players, scorer and seeded randomness.
pub struct Game<S> {
    graph: Graph,
    players: Vec<Player>,
    scorer: S,
    rng: SmallRng,
    rounds: usize,
}

impl Game<CachedScorer<Betweenness>> {
    /// Game over cached betweenness centrality, as configured.
    pub fn from_config(config: &GameConfig) -> Self {
        let cache = match config.cache_capacity {
            Some(capacity) => ScoreCache::bounded(capacity),
            None => ScoreCache::unbounded(),
        };
        let players = config
            .players
            .iter()
            .map(|p| Player {
                node: p.node,
                search: p.search,
                random_move_chance: p.random_move_chance,
            })
            .collect();
        Self::new(
            config.scenario.build(),
            players,
            CachedScorer::betweenness(cache),
            config.seed,
            config.rounds,
        )
    }
}

impl<S: Scorer> Game<S> {
    /// Assembles a game from parts.
    pub fn new(graph: Graph, players: Vec<Player>, scorer: S, seed: u64, rounds: usize) -> Self {
        Self {
            graph,
            players,
            scorer,
            rng: SmallRng::seed_from_u64(seed),
            rounds,
        }
    }

    /// The current graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Plays until the round limit, or until a full round passes with no
    /// applied move.
    pub fn play(&mut self, log: &mut RoundLog) -> Result<GameSummary, GameError> {
        let mut rounds_played = 0;
        let mut moves_applied = 0;

        for round in 0..self.rounds {
            let mut any_applied = false;
            for idx in 0..self.players.len() {
                let record = self.take_turn(round, idx)?;
                tracing::info!(
                    round,
                    player = record.player,
                    action = record.action.as_deref().unwrap_or("pass"),
                    improvement = record.improvement,
                    applied = record.applied,
                    "turn"
                );
                if record.applied {
                    any_applied = true;
                    moves_applied += 1;
                }
                log.log(&record)?;
            }
            rounds_played += 1;
            if !any_applied {
                tracing::info!(round, "no more improvements");
                break;
            }
        }
        log.flush()?;

        let mut final_scores = Vec::with_capacity(self.players.len());
        for idx in 0..self.players.len() {
            let node = self.players[idx].node;
            let score = self.scorer.score(&self.graph, node)?;
            final_scores.push(PlayerScore { node, score });
        }

        Ok(GameSummary {
            rounds_played,
            moves_applied,
            final_scores,
        })
    }

    fn take_turn(&mut self, round: usize, idx: usize) -> Result<RoundRecord, GameError> {
        let Player {
            node: player,
            search,
            random_move_chance,
        } = self.players[idx].clone();
        let opponent = self.opponent_of(idx);

        let random_draw = random_move_chance > 0.0 && self.rng.gen::<f64>() < random_move_chance;
        let pick = if random_draw {
            self.random_move(player, search, opponent)?
        } else {
            self.greedy_move(player, search, opponent)?
        };

        let record = match pick {
            None => RoundRecord {
                round,
                player,
                action: None,
                improvement: None,
                applied: false,
                score: self.scorer.score(&self.graph, player)?,
            },
            Some(eval) => {
                // Random moves land unconditionally; greedy moves only
                // when they do not hurt.
                let applied = random_draw || eval.improvement >= 0.0;
                if applied {
                    // Permanent move: the reversal receipt is dropped.
                    eval.action
                        .apply(&mut self.graph)
                        .map_err(StrategyError::from)?;
                }
                RoundRecord {
                    round,
                    player,
                    action: Some(eval.action.to_string()),
                    improvement: Some(eval.improvement),
                    applied,
                    score: self.scorer.score(&self.graph, player)?,
                }
            }
        };
        Ok(record)
    }

    fn opponent_of(&self, idx: usize) -> Option<NodeId> {
        if self.players.len() == 2 {
            Some(self.players[1 - idx].node)
        } else {
            None
        }
    }

    fn greedy_move(
        &mut self,
        player: NodeId,
        search: SearchMode,
        opponent: Option<NodeId>,
    ) -> Result<Option<Evaluation>, StrategyError> {
        match search {
            SearchMode::Additions => {
                best_addition(&mut self.graph, player, None, &mut self.scorer, opponent)
            }
            SearchMode::Removals => {
                best_removal(&mut self.graph, player, None, &mut self.scorer, opponent)
            }
            SearchMode::AdditionsAndRemovals => {
                best_addition_or_removal(&mut self.graph, player, None, &mut self.scorer, opponent)
            }
        }
    }

    fn random_move(
        &mut self,
        player: NodeId,
        search: SearchMode,
        opponent: Option<NodeId>,
    ) -> Result<Option<Evaluation>, StrategyError> {
        let presence = match search {
            SearchMode::Additions => EdgePresence::Absent,
            SearchMode::Removals => EdgePresence::Present,
            SearchMode::AdditionsAndRemovals => EdgePresence::Any,
        };
        let candidates = toggle_candidates(&self.graph, None, presence);
        if candidates.is_empty() {
            return Ok(None);
        }
        let action = candidates[self.rng.gen_range(0..candidates.len())].clone();
        let gain = improvement(&mut self.graph, &action, player, opponent, &mut self.scorer)?;
        Ok(Some(Evaluation {
            action,
            improvement: gain,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlayerConfig, Scenario};

    fn config(scenario: Scenario, rounds: usize) -> GameConfig {
        GameConfig {
            scenario,
            rounds,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_single_player_builds_edges() {
        let mut game = Game::from_config(&config(Scenario::Matchsticks { pairs: 3 }, 4));
        let before_edges = game.graph().edge_count();

        let summary = game.play(&mut RoundLog::null()).unwrap();

        assert!(summary.moves_applied > 0);
        assert!(game.graph().edge_count() > before_edges);
        assert_eq!(summary.final_scores.len(), 1);
        assert!(summary.final_scores[0].score > 0.0);
    }

    #[test]
    fn test_game_stops_when_no_player_improves() {
        // On a complete graph an additions-only player has no candidates
        // at all; the game ends after a single silent round.
        let mut full = config(Scenario::Empty { nodes: 3 }, 10);
        full.players = vec![PlayerConfig::at(0)];
        let mut game = Game::from_config(&full);
        // Complete the triangle by hand.
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            game.graph.add_edge(a, b).unwrap();
        }

        let summary = game.play(&mut RoundLog::null()).unwrap();
        assert_eq!(summary.rounds_played, 1);
        assert_eq!(summary.moves_applied, 0);
    }

    #[test]
    fn test_two_player_game_is_zero_sum_per_turn() {
        let mut cfg = config(Scenario::Matchsticks { pairs: 3 }, 3);
        cfg.players = vec![PlayerConfig::at(0), PlayerConfig::at(2)];
        let mut game = Game::from_config(&cfg);

        let mut log = RoundLog::null();
        let summary = game.play(&mut log).unwrap();

        // Two turns per played round were logged.
        assert_eq!(log.record_count() as usize, 2 * summary.rounds_played);
        assert_eq!(summary.final_scores.len(), 2);
    }

    #[test]
    fn test_random_moves_apply_even_when_they_hurt() {
        // Force every move to be random on a star: sooner or later a
        // removal lands, which greedy play would never accept.
        let mut cfg = config(Scenario::Star { nodes: 4 }, 6);
        cfg.players = vec![PlayerConfig {
            node: 0,
            search: SearchMode::AdditionsAndRemovals,
            random_move_chance: 1.0,
        }];
        let mut game = Game::from_config(&cfg);

        let summary = game.play(&mut RoundLog::null()).unwrap();
        assert_eq!(summary.moves_applied, summary.rounds_played);
    }
}
