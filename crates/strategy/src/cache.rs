//! Memoization of full-graph score tables.
//!
//! Keys are the node count plus the canonical sorted edge list, so two
//! graphs with the same structure share an entry and distinct structures
//! cannot collide. Capacity-bounded caches evict the oldest key first
//! (FIFO on insertion order); `unbounded()` keeps every entry for the
//! life of the cache.

use std::collections::{HashMap, VecDeque};

use game_graph::{Graph, NodeId};

/// Canonical structural key: node count and sorted edge list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    nodes: usize,
    edges: Vec<(NodeId, NodeId)>,
}

impl CacheKey {
    /// Key for the graph's current structure.
    pub fn of(graph: &Graph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edges(),
        }
    }
}

/// Cache of full score tables, one per distinct graph structure.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: HashMap<CacheKey, Vec<f64>>,
    insertion_order: VecDeque<CacheKey>,
    capacity: Option<usize>,
    hits: u64,
    misses: u64,
}

impl ScoreCache {
    /// Cache that never evicts. This matches the reference behavior and
    /// grows with every distinct structure scored.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Cache holding at most `capacity` tables; the oldest entry is
    /// evicted first. A capacity of zero stores nothing.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups that found an entry.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that missed.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Looks up the table for `key`, counting the hit or miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<&[f64]> {
        match self.entries.get(key) {
            Some(table) => {
                self.hits += 1;
                Some(table.as_slice())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores `table` under `key`. Inserting an existing key is ignored:
    /// the same structure always scores to the same table.
    pub fn insert(&mut self, key: CacheKey, table: Vec<f64>) {
        if self.capacity == Some(0) || self.entries.contains_key(&key) {
            return;
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, table);

        if let Some(capacity) = self.capacity {
            while self.entries.len() > capacity {
                if let Some(oldest) = self.insertion_order.pop_front() {
                    self.entries.remove(&oldest);
                } else {
                    break;
                }
            }
        }
    }
}
