//! Standard starting graphs for game scenarios.

use crate::graph::Graph;

/// Edgeless graph with `n` nodes.
pub fn empty(n: usize) -> Graph {
    Graph::new(n)
}

/// Cycle `0-1-...-(n-1)-0`. Fewer than three nodes yields at most a single
/// edge rather than a degenerate cycle.
pub fn ring(n: usize) -> Graph {
    let mut graph = Graph::new(n);
    if n == 2 {
        graph.insert_edge_unchecked(0, 1);
        return graph;
    }
    if n >= 3 {
        for i in 0..n {
            graph.insert_edge_unchecked(i, (i + 1) % n);
        }
    }
    graph
}

/// Star with center `0` and leaves `1..n`.
pub fn star(n: usize) -> Graph {
    let mut graph = Graph::new(n);
    for leaf in 1..n {
        graph.insert_edge_unchecked(0, leaf);
    }
    graph
}

/// `pairs` disjoint edges: `(0,1), (2,3), ...` over `2 * pairs` nodes.
pub fn matchsticks(pairs: usize) -> Graph {
    let mut graph = Graph::new(2 * pairs);
    for i in 0..pairs {
        graph.insert_edge_unchecked(2 * i, 2 * i + 1);
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let graph = empty(20);
        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_ring() {
        let graph = ring(5);
        assert_eq!(graph.edge_count(), 5);
        for node in graph.nodes() {
            assert_eq!(graph.degree(node), 2);
        }
        assert!(graph.has_edge(4, 0));
    }

    #[test]
    fn test_tiny_rings() {
        assert_eq!(ring(0).edge_count(), 0);
        assert_eq!(ring(1).edge_count(), 0);
        assert_eq!(ring(2).edge_count(), 1);
    }

    #[test]
    fn test_star() {
        let graph = star(4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(0), 3);
        assert_eq!(graph.degree(3), 1);
    }

    #[test]
    fn test_matchsticks() {
        let graph = matchsticks(10);
        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 10);
        assert!(graph.has_edge(6, 7));
        assert!(!graph.has_edge(1, 2));
    }
}
