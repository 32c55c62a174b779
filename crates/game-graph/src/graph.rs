//! Mutable undirected simple graph over dense integer node identifiers.
//!
//! Nodes are fixed at construction as `0..node_count`; edges may be added
//! and removed freely. Neighbor sets are ordered, so neighbor and edge
//! enumeration is deterministic across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Node identifier, dense in `0..node_count`.
pub type NodeId = usize;

/// Errors from graph lookup and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The node id is outside `0..node_count`.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    /// Self-loops are never legal in this game.
    #[error("self-loop at node {0}")]
    SelfLoop(NodeId),
}

/// Undirected simple graph owned by the game driver.
///
/// Structural equality compares node count and edge sets, so two
/// independently built graphs with the same edges compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<BTreeSet<NodeId>>,
}

impl Graph {
    /// Creates an edgeless graph with nodes `0..node_count`.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Iterates over all node ids in ascending order.
    pub fn nodes(&self) -> std::ops::Range<NodeId> {
        0..self.adjacency.len()
    }

    /// Whether `node` is one of this graph's nodes.
    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.adjacency.len()
    }

    /// Errors with [`GraphError::UnknownNode`] unless `node` exists.
    pub fn ensure_node(&self, node: NodeId) -> Result<(), GraphError> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(node))
        }
    }

    fn check_endpoints(&self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.ensure_node(a)?;
        self.ensure_node(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        Ok(())
    }

    /// Whether the edge `(a, b)` is present. Unknown nodes have no edges.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(&b))
    }

    /// Adds the edge `(a, b)`. Adding a present edge is a no-op.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.check_endpoints(a, b)?;
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
        Ok(())
    }

    /// Removes the edge `(a, b)`. Removing an absent edge is a no-op.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        self.check_endpoints(a, b)?;
        self.adjacency[a].remove(&b);
        self.adjacency[b].remove(&a);
        Ok(())
    }

    /// Adds the edge if absent, removes it if present.
    pub fn toggle_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), GraphError> {
        if self.has_edge(a, b) {
            self.remove_edge(a, b)
        } else {
            self.add_edge(a, b)
        }
    }

    /// Insert an edge whose endpoints are known-valid (scenario builders).
    pub(crate) fn insert_edge_unchecked(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    /// Iterates over the neighbors of `node` in ascending order.
    ///
    /// An unknown node has no neighbors.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(node).into_iter().flatten().copied()
    }

    /// Degree of `node`. An unknown node has degree zero.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// The canonical edge list: each edge once as `(low, high)`, sorted
    /// lexicographically. Two graphs with equal edge sets produce the same
    /// list, which makes it usable as a structural cache key.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (a, neighbors) in self.adjacency.iter().enumerate() {
            for &b in neighbors {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_edge() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 1).unwrap();
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert_eq!(graph.edge_count(), 1);

        graph.remove_edge(1, 0).unwrap();
        assert!(!graph.has_edge(0, 1));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut graph = Graph::new(3);
        assert_eq!(graph.add_edge(1, 1), Err(GraphError::SelfLoop(1)));
        assert_eq!(graph.remove_edge(2, 2), Err(GraphError::SelfLoop(2)));
    }

    #[test]
    fn test_unknown_node_rejected() {
        let mut graph = Graph::new(3);
        assert_eq!(graph.add_edge(0, 3), Err(GraphError::UnknownNode(3)));
        assert_eq!(graph.ensure_node(5), Err(GraphError::UnknownNode(5)));
        assert!(!graph.has_edge(0, 7));
        assert_eq!(graph.degree(9), 0);
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1).unwrap();
        let before = graph.clone();

        graph.toggle_edge(0, 2).unwrap();
        assert!(graph.has_edge(0, 2));
        graph.toggle_edge(0, 2).unwrap();
        assert_eq!(graph, before);

        graph.toggle_edge(0, 1).unwrap();
        assert!(!graph.has_edge(0, 1));
        graph.toggle_edge(0, 1).unwrap();
        assert_eq!(graph, before);
    }

    #[test]
    fn test_canonical_edge_list_is_sorted() {
        let mut graph = Graph::new(5);
        graph.add_edge(4, 2).unwrap();
        graph.add_edge(1, 0).unwrap();
        graph.add_edge(3, 1).unwrap();
        assert_eq!(graph.edges(), vec![(0, 1), (1, 3), (2, 4)]);
    }

    #[test]
    fn test_structural_equality() {
        let mut a = Graph::new(4);
        a.add_edge(0, 1).unwrap();
        a.add_edge(2, 3).unwrap();

        let mut b = Graph::new(4);
        b.add_edge(2, 3).unwrap();
        b.add_edge(1, 0).unwrap();

        assert_eq!(a, b);
        b.remove_edge(2, 3).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut graph = Graph::new(4);
        graph.add_edge(0, 2).unwrap();
        graph.add_edge(1, 3).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        let restored: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(graph, restored);
    }
}
