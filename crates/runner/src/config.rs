//! Run configuration for the game driver.
//!
//! All settings load from a TOML file, with CLI overrides applied by the
//! binary on top.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use game_graph::{builders, Graph, NodeId};

/// Complete configuration for one game run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Starting graph
    #[serde(default)]
    pub scenario: Scenario,
    /// One or two players; two-player games are zero-sum
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
    /// Maximum number of rounds
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Seed for the random-move draws
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Maximum cached score tables; absent means never evict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
    /// Optional JSONL round log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

fn default_players() -> Vec<PlayerConfig> {
    vec![PlayerConfig::at(0)]
}

fn default_rounds() -> usize {
    20
}

fn default_seed() -> u64 {
    42
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            players: default_players(),
            rounds: default_rounds(),
            seed: default_seed(),
            cache_capacity: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Renders this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks player placement and probabilities against the scenario.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.players.len() > 2 {
            return Err(ConfigError::PlayerCount(self.players.len()));
        }
        if self.players.len() == 2 && self.players[0].node == self.players[1].node {
            return Err(ConfigError::DuplicatePlayer(self.players[0].node));
        }
        let nodes = self.scenario.node_count();
        for player in &self.players {
            if player.node >= nodes {
                return Err(ConfigError::PlayerOutOfRange {
                    node: player.node,
                    nodes,
                });
            }
            if !(0.0..=1.0).contains(&player.random_move_chance) {
                return Err(ConfigError::ChanceOutOfRange(player.random_move_chance));
            }
        }
        Ok(())
    }
}

/// Starting graph shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scenario {
    /// Edgeless graph
    Empty { nodes: usize },
    /// Cycle over all nodes
    Ring { nodes: usize },
    /// Star centered at node 0
    Star { nodes: usize },
    /// Disjoint pairs `(0,1), (2,3), ...`
    Matchsticks { pairs: usize },
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Empty { nodes: 20 }
    }
}

impl Scenario {
    /// Builds the starting graph.
    pub fn build(&self) -> Graph {
        match *self {
            Scenario::Empty { nodes } => builders::empty(nodes),
            Scenario::Ring { nodes } => builders::ring(nodes),
            Scenario::Star { nodes } => builders::star(nodes),
            Scenario::Matchsticks { pairs } => builders::matchsticks(pairs),
        }
    }

    /// Number of nodes the built graph will have.
    pub fn node_count(&self) -> usize {
        match *self {
            Scenario::Empty { nodes } | Scenario::Ring { nodes } | Scenario::Star { nodes } => {
                nodes
            }
            Scenario::Matchsticks { pairs } => 2 * pairs,
        }
    }
}

/// One player's placement and move policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// The node this player plays as
    pub node: NodeId,
    /// Which edits the player considers
    #[serde(default)]
    pub search: SearchMode,
    /// Chance in `[0, 1]` of a uniformly random move instead of the greedy one
    #[serde(default)]
    pub random_move_chance: f64,
}

impl PlayerConfig {
    /// Greedy addition-only player at `node`.
    pub fn at(node: NodeId) -> Self {
        Self {
            node,
            search: SearchMode::default(),
            random_move_chance: 0.0,
        }
    }
}

/// The move set a player searches over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Only edge additions
    #[default]
    Additions,
    /// Only edge removals
    Removals,
    /// Toggles in either direction
    AdditionsAndRemovals,
}

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    /// Games take one or two players
    #[error("a game needs one or two players, got {0}")]
    PlayerCount(usize),
    /// Two players cannot share a node
    #[error("players must occupy distinct nodes (both at {0})")]
    DuplicatePlayer(NodeId),
    /// A player was placed outside the scenario's node range
    #[error("player node {node} is outside the scenario's {nodes} nodes")]
    PlayerOutOfRange { node: NodeId, nodes: usize },
    /// Probabilities live in [0, 1]
    #[error("random_move_chance must be within [0, 1], got {0}")]
    ChanceOutOfRange(f64),
}
