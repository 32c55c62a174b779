//! Game driver: round loop, configuration and round logging.
//!
//! Repeatedly invokes the strategy search, applies each winning action
//! permanently, and records the outcomes.

pub mod config;
pub mod game;
pub mod log;

pub use config::{ConfigError, GameConfig, PlayerConfig, Scenario, SearchMode};
pub use game::{Game, GameError, GameSummary, Player, PlayerScore, RoundRecord};
pub use log::RoundLog;
