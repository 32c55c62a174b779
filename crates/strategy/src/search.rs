//! Greedy selection over candidate actions.
//!
//! [`best_strategy`] is a stable argmax: every candidate is evaluated and
//! the first strictly-best improvement wins, so ties resolve to the
//! earliest candidate in enumeration order. The convenience searches
//! enumerate single-edge toggles over ordered node pairs, matching the
//! enumeration the game's recorded runs were produced with.

use game_graph::{Action, Graph, NodeId};

use crate::evaluate::improvement;
use crate::score::Scorer;
use crate::StrategyError;

/// Improvement granted to the degree-zero fallback connection.
pub const FALLBACK_GAIN: f64 = 0.001;

/// A chosen action and the improvement it was selected for.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub action: Action,
    pub improvement: f64,
}

/// Which toggles qualify as candidates, relative to current edge presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePresence {
    /// Only currently-absent edges (additions).
    Absent,
    /// Only currently-present edges (removals).
    Present,
    /// Every pair, whichever direction the toggle takes.
    Any,
}

/// Single-edge toggle candidates over ordered pairs of `nodes` (or the
/// whole node range), filtered by current edge presence.
pub fn toggle_candidates(
    graph: &Graph,
    nodes: Option<&[NodeId]>,
    presence: EdgePresence,
) -> Vec<Action> {
    let range: Vec<NodeId>;
    let pool: &[NodeId] = match nodes {
        Some(subset) => subset,
        None => {
            range = graph.nodes().collect();
            &range
        }
    };

    let mut candidates = Vec::new();
    for &i in pool {
        for &j in pool {
            if i == j {
                continue;
            }
            let wanted = match presence {
                EdgePresence::Absent => !graph.has_edge(i, j),
                EdgePresence::Present => graph.has_edge(i, j),
                EdgePresence::Any => true,
            };
            if !wanted {
                continue;
            }
            if let Ok(action) = Action::toggle(i, j) {
                candidates.push(action);
            }
        }
    }
    candidates
}

/// Evaluates every action and returns the best `(action, improvement)`.
///
/// `Ok(None)` means the action set was empty; "all moves hurt" is still a
/// `Some` result, with a non-positive improvement. Ties break to the
/// first-encountered action so repeated runs reproduce exactly.
pub fn best_strategy<S>(
    graph: &mut Graph,
    player: NodeId,
    actions: &[Action],
    scorer: &mut S,
    opponent: Option<NodeId>,
) -> Result<Option<Evaluation>, StrategyError>
where
    S: Scorer + ?Sized,
{
    let mut best: Option<Evaluation> = None;
    for action in actions {
        let gain = improvement(graph, action, player, opponent, scorer)?;
        if best.as_ref().map_or(true, |b| gain > b.improvement) {
            best = Some(Evaluation {
                action: action.clone(),
                improvement: gain,
            });
        }
    }
    Ok(best)
}

/// Best single-edge addition for `player`.
///
/// An isolated player short-circuits to the fixed fallback partner; see
/// [`FALLBACK_GAIN`].
pub fn best_addition<S>(
    graph: &mut Graph,
    player: NodeId,
    nodes: Option<&[NodeId]>,
    scorer: &mut S,
    opponent: Option<NodeId>,
) -> Result<Option<Evaluation>, StrategyError>
where
    S: Scorer + ?Sized,
{
    if let Some(fallback) = isolated_fallback(graph, player)? {
        return Ok(Some(fallback));
    }
    let actions = toggle_candidates(graph, nodes, EdgePresence::Absent);
    best_strategy(graph, player, &actions, scorer, opponent)
}

/// Best single-edge removal for `player`.
pub fn best_removal<S>(
    graph: &mut Graph,
    player: NodeId,
    nodes: Option<&[NodeId]>,
    scorer: &mut S,
    opponent: Option<NodeId>,
) -> Result<Option<Evaluation>, StrategyError>
where
    S: Scorer + ?Sized,
{
    let actions = toggle_candidates(graph, nodes, EdgePresence::Present);
    best_strategy(graph, player, &actions, scorer, opponent)
}

/// Best toggle in either direction for `player`.
pub fn best_addition_or_removal<S>(
    graph: &mut Graph,
    player: NodeId,
    nodes: Option<&[NodeId]>,
    scorer: &mut S,
    opponent: Option<NodeId>,
) -> Result<Option<Evaluation>, StrategyError>
where
    S: Scorer + ?Sized,
{
    if let Some(fallback) = isolated_fallback(graph, player)? {
        return Ok(Some(fallback));
    }
    let actions = toggle_candidates(graph, nodes, EdgePresence::Any);
    best_strategy(graph, player, &actions, scorer, opponent)
}

/// Escape hatch for an isolated player.
///
/// Under the isolated-node sentinel every addition scores identically, so
/// instead of searching, propose connecting to a fixed partner (node 1 for
/// player 0, node 0 otherwise) with a token positive gain. A heuristic,
/// kept for parity with recorded runs; it is not derived from the score.
fn isolated_fallback(graph: &Graph, player: NodeId) -> Result<Option<Evaluation>, StrategyError> {
    graph.ensure_node(player)?;
    if graph.degree(player) > 0 {
        return Ok(None);
    }
    let partner = if player == 0 { 1 } else { 0 };
    if !graph.contains_node(partner) {
        return Ok(None);
    }
    let action = Action::toggle(player, partner)?;
    Ok(Some(Evaluation {
        action,
        improvement: FALLBACK_GAIN,
    }))
}
