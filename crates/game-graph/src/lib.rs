//! Graph data model for the network formation game.
//!
//! This crate contains pure data structures with no engine logic: the
//! mutable game graph, reversible edit actions, and the standard
//! starting-scenario builders.

pub mod action;
pub mod builders;
pub mod graph;

pub use action::{Action, ActionError, ActionKind, Reversal};
pub use graph::{Graph, GraphError, NodeId};
