//! Greedy strategy search for the network formation game.
//!
//! Given a graph, a scoring oracle and a set of reversible candidate
//! edits, find the edit that maximizes the acting player's score gain,
//! optionally net of an opponent's gain. Scoring runs through a
//! structural cache so a graph shape is never scored twice.

pub mod cache;
pub mod evaluate;
pub mod score;
pub mod search;
#[cfg(test)]
pub(crate) mod test_util;

pub use cache::{CacheKey, ScoreCache};
pub use evaluate::improvement;
pub use score::{Betweenness, CachedScorer, CentralityMeasure, Scorer, ISOLATED_SCORE};
pub use search::{
    best_addition, best_addition_or_removal, best_removal, best_strategy, toggle_candidates,
    EdgePresence, Evaluation, FALLBACK_GAIN,
};

use game_graph::{ActionError, GraphError};
use thiserror::Error;

/// Errors surfaced by evaluation and search.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// Graph lookup or mutation failure.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Invalid action construction.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// The score provider failed.
    #[error("score provider failed: {0}")]
    Score(String),
}
