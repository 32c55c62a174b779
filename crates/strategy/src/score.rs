//! Node scoring for strategy evaluation.
//!
//! The canonical score is betweenness centrality, computed by
//! `rustworkx-core` under the same conventions as the networkx runs this
//! game was tuned against: normalized, endpoints excluded. Scores are
//! served through [`CachedScorer`], which memoizes the full table per
//! graph structure and reports a small negative sentinel for isolated
//! nodes so that any connecting move beats staying isolated in a
//! tie-break.

use rustworkx_core::centrality::betweenness_centrality;
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};

use game_graph::{Graph, GraphError, NodeId};

use crate::cache::{CacheKey, ScoreCache};
use crate::StrategyError;

/// Score reported for isolated nodes. Slightly below zero so the search
/// never prefers staying isolated over connecting.
pub const ISOLATED_SCORE: f64 = -0.001;

/// Edge count above which the centrality computation may parallelize.
const PARALLEL_THRESHOLD: usize = 50;

/// A scoring oracle over `(graph, node)` pairs.
///
/// Implementations must be deterministic for a fixed edge set.
pub trait Scorer {
    /// Score of `node` under the graph's current structure.
    fn score(&mut self, graph: &Graph, node: NodeId) -> Result<f64, StrategyError>;
}

/// Provider of a full score table, one entry per node.
///
/// Separated from [`Scorer`] so tests can count invocations or substitute
/// synthetic measures.
pub trait CentralityMeasure {
    /// Computes the score of every node for the graph's current edge set.
    fn full_table(&mut self, graph: &Graph) -> Result<Vec<f64>, StrategyError>;
}

/// Betweenness centrality of every node, via `rustworkx-core`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Betweenness;

impl CentralityMeasure for Betweenness {
    fn full_table(&mut self, graph: &Graph) -> Result<Vec<f64>, StrategyError> {
        let mut petgraph =
            UnGraph::<(), ()>::with_capacity(graph.node_count(), graph.edge_count());
        for _ in graph.nodes() {
            petgraph.add_node(());
        }
        for (a, b) in graph.edges() {
            petgraph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }

        let table = betweenness_centrality(&petgraph, false, true, PARALLEL_THRESHOLD);
        Ok(table
            .into_iter()
            .map(|score| score.unwrap_or(0.0))
            .collect())
    }
}

/// Caching scorer wrapping a [`CentralityMeasure`].
///
/// The measure runs at most once per distinct graph structure; repeated
/// queries on structurally identical graphs are served from the cache.
pub struct CachedScorer<M> {
    measure: M,
    cache: ScoreCache,
}

impl CachedScorer<Betweenness> {
    /// Cached betweenness centrality, the game's canonical score.
    pub fn betweenness(cache: ScoreCache) -> Self {
        Self::new(Betweenness, cache)
    }
}

impl<M: CentralityMeasure> CachedScorer<M> {
    /// Wraps `measure` with the given cache.
    pub fn new(measure: M, cache: ScoreCache) -> Self {
        Self { measure, cache }
    }

    /// The underlying cache, for inspection.
    pub fn cache(&self) -> &ScoreCache {
        &self.cache
    }
}

impl<M: CentralityMeasure> Scorer for CachedScorer<M> {
    fn score(&mut self, graph: &Graph, node: NodeId) -> Result<f64, StrategyError> {
        graph.ensure_node(node)?;

        // The sentinel short-circuits before the cache: an isolated node's
        // library score is structure-dependent noise we never want.
        if graph.degree(node) == 0 {
            return Ok(ISOLATED_SCORE);
        }

        let key = CacheKey::of(graph);
        if let Some(table) = self.cache.get(&key) {
            return lookup(table, node);
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "score table miss"
        );
        let table = self.measure.full_table(graph)?;
        let score = lookup(&table, node)?;
        self.cache.insert(key, table);
        Ok(score)
    }
}

fn lookup(table: &[f64], node: NodeId) -> Result<f64, StrategyError> {
    table
        .get(node)
        .copied()
        .ok_or(StrategyError::Graph(GraphError::UnknownNode(node)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{graph_with_edges, DegreeMeasure};

    #[test]
    fn test_isolated_node_gets_sentinel() {
        let graph = graph_with_edges(3, &[(0, 1)]);
        let mut scorer = CachedScorer::new(DegreeMeasure, ScoreCache::unbounded());

        assert_eq!(scorer.score(&graph, 2).unwrap(), ISOLATED_SCORE);
        // The sentinel path never consults or fills the cache.
        assert!(scorer.cache().is_empty());
        assert_eq!(scorer.cache().misses(), 0);
    }

    #[test]
    fn test_scores_come_from_the_table() {
        let graph = graph_with_edges(3, &[(0, 1), (0, 2)]);
        let mut scorer = CachedScorer::new(DegreeMeasure, ScoreCache::unbounded());

        assert_eq!(scorer.score(&graph, 0).unwrap(), 2.0);
        assert_eq!(scorer.score(&graph, 1).unwrap(), 1.0);
        // Second query hits the cached table.
        assert_eq!(scorer.cache().hits(), 1);
        assert_eq!(scorer.cache().len(), 1);
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let graph = graph_with_edges(2, &[(0, 1)]);
        let mut scorer = CachedScorer::new(DegreeMeasure, ScoreCache::unbounded());
        assert!(matches!(
            scorer.score(&graph, 7),
            Err(StrategyError::Graph(GraphError::UnknownNode(7)))
        ));
    }

    #[test]
    fn test_betweenness_on_a_path() {
        // Path 0-1-2: the middle node carries the only through-path.
        let graph = graph_with_edges(3, &[(0, 1), (1, 2)]);
        let mut scorer = CachedScorer::betweenness(ScoreCache::unbounded());

        let middle = scorer.score(&graph, 1).unwrap();
        let end = scorer.score(&graph, 0).unwrap();
        assert!(middle > end);
        assert_eq!(end, 0.0);
        assert_eq!(middle, 1.0);
    }
}
