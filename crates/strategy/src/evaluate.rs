//! Net-improvement evaluation of a candidate action.

use game_graph::{Action, Graph, NodeId};

use crate::score::Scorer;
use crate::StrategyError;

/// Signed score delta the action would produce for `player`.
///
/// With an opponent the result is zero-sum: the player's delta minus the
/// opponent's delta from the same edit. The action is applied, scored and
/// undone in place; the graph is restored to its original edge set on
/// every return path, including scoring failures.
pub fn improvement<S>(
    graph: &mut Graph,
    action: &Action,
    player: NodeId,
    opponent: Option<NodeId>,
    scorer: &mut S,
) -> Result<f64, StrategyError>
where
    S: Scorer + ?Sized,
{
    graph.ensure_node(player)?;
    if let Some(opponent) = opponent {
        graph.ensure_node(opponent)?;
    }

    let player_before = scorer.score(graph, player)?;
    let opponent_before = match opponent {
        Some(node) => Some(scorer.score(graph, node)?),
        None => None,
    };

    let reversal = action.apply(graph)?;
    // Guarded region: the undo must run before any scoring error
    // propagates, so failures cannot leave the edit behind.
    let scored = score_applied(graph, player, opponent, scorer);
    reversal.undo(graph)?;
    let (player_after, opponent_after) = scored?;

    let player_delta = player_after - player_before;
    match opponent_before.zip(opponent_after) {
        Some((before, after)) => Ok(player_delta - (after - before)),
        None => Ok(player_delta),
    }
}

fn score_applied<S>(
    graph: &Graph,
    player: NodeId,
    opponent: Option<NodeId>,
    scorer: &mut S,
) -> Result<(f64, Option<f64>), StrategyError>
where
    S: Scorer + ?Sized,
{
    let player_after = scorer.score(graph, player)?;
    let opponent_after = match opponent {
        Some(node) => Some(scorer.score(graph, node)?),
        None => None,
    };
    Ok((player_after, opponent_after))
}
