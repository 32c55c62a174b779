//! Shared helpers for unit tests.

use game_graph::{Graph, NodeId};

use crate::cache::ScoreCache;
use crate::score::{CachedScorer, CentralityMeasure};
use crate::StrategyError;

/// Degree of each node; a cheap deterministic stand-in for centrality.
pub(crate) struct DegreeMeasure;

impl CentralityMeasure for DegreeMeasure {
    fn full_table(&mut self, graph: &Graph) -> Result<Vec<f64>, StrategyError> {
        Ok(graph.nodes().map(|n| graph.degree(n) as f64).collect())
    }
}

/// Scorer over [`DegreeMeasure`] with an unbounded cache.
pub(crate) fn degree_scorer() -> CachedScorer<DegreeMeasure> {
    CachedScorer::new(DegreeMeasure, ScoreCache::unbounded())
}

/// Graph with the given node count and edges.
pub(crate) fn graph_with_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Graph {
    let mut graph = Graph::new(n);
    for &(a, b) in edges {
        graph.add_edge(a, b).unwrap();
    }
    graph
}
