//! Reversible graph edits.
//!
//! An [`Action`] is pure data describing one edit. Applying it returns a
//! [`Reversal`] receipt recording exactly what must be undone; undoing
//! consumes the receipt. This keeps repeated application safe: every apply
//! produces its own receipt, and a receipt can only be spent once.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::graph::{Graph, GraphError, NodeId};

/// Errors from action construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// An edge named both endpoints as the same node.
    #[error("self-loop at node {0}")]
    SelfLoop(NodeId),
    /// A compound action composes at least two toggles.
    #[error("compound action needs at least two edges, got {0}")]
    TooFewEdges(usize),
}

/// The kinds of edit an action can perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Add the edge if absent, remove it if present. Self-inverse.
    Toggle { a: NodeId, b: NodeId },
    /// Ordered sequence of toggles; undone in reverse order.
    Compound { edges: Vec<(NodeId, NodeId)> },
    /// Remove every edge incident to the target.
    Assassinate { target: NodeId },
}

/// A validated reversible edit.
///
/// Constructors reject self-referential edges, so a held `Action` never
/// names an illegal edge. Whether its nodes exist in a particular graph is
/// checked when the action is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    kind: ActionKind,
}

impl Action {
    /// Single-edge toggle of `(a, b)`.
    pub fn toggle(a: NodeId, b: NodeId) -> Result<Self, ActionError> {
        if a == b {
            return Err(ActionError::SelfLoop(a));
        }
        Ok(Self {
            kind: ActionKind::Toggle { a, b },
        })
    }

    /// Ordered composition of two or more single toggles.
    pub fn compound(edges: Vec<(NodeId, NodeId)>) -> Result<Self, ActionError> {
        if edges.len() < 2 {
            return Err(ActionError::TooFewEdges(edges.len()));
        }
        if let Some(&(a, _)) = edges.iter().find(|(a, b)| a == b) {
            return Err(ActionError::SelfLoop(a));
        }
        Ok(Self {
            kind: ActionKind::Compound { edges },
        })
    }

    /// Removal of every edge incident to `target`.
    pub fn assassinate(target: NodeId) -> Self {
        Self {
            kind: ActionKind::Assassinate { target },
        }
    }

    /// The edit this action performs.
    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Applies the edit to `graph`, returning the receipt that undoes it.
    pub fn apply(&self, graph: &mut Graph) -> Result<Reversal, GraphError> {
        match &self.kind {
            ActionKind::Toggle { a, b } => {
                graph.toggle_edge(*a, *b)?;
                Ok(Reversal::Toggle { a: *a, b: *b })
            }
            ActionKind::Compound { edges } => {
                // Validate every endpoint before the first toggle so a bad
                // edge cannot leave a half-applied sequence behind.
                for &(a, b) in edges {
                    graph.ensure_node(a)?;
                    graph.ensure_node(b)?;
                }
                for &(a, b) in edges {
                    graph.toggle_edge(a, b)?;
                }
                Ok(Reversal::Compound {
                    edges: edges.clone(),
                })
            }
            ActionKind::Assassinate { target } => {
                graph.ensure_node(*target)?;
                let severed: Vec<NodeId> = graph.neighbors(*target).collect();
                for &neighbor in &severed {
                    graph.remove_edge(*target, neighbor)?;
                }
                Ok(Reversal::Severed {
                    target: *target,
                    neighbors: severed,
                })
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::Toggle { a, b } => write!(f, "toggle({a},{b})"),
            ActionKind::Compound { edges } => {
                write!(f, "compound(")?;
                for (i, (a, b)) in edges.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{a}-{b}")?;
                }
                write!(f, ")")
            }
            ActionKind::Assassinate { target } => write!(f, "assassinate({target})"),
        }
    }
}

/// Receipt from [`Action::apply`].
///
/// Undoing consumes the receipt, so a reversal runs at most once.
#[derive(Debug, PartialEq, Eq)]
pub enum Reversal {
    /// Toggle the edge back.
    Toggle { a: NodeId, b: NodeId },
    /// Re-toggle the sequence in reverse order.
    Compound { edges: Vec<(NodeId, NodeId)> },
    /// Reconnect the target to each severed neighbor. Edges among the
    /// neighbors themselves were never touched, so only incident edges
    /// come back.
    Severed {
        target: NodeId,
        neighbors: Vec<NodeId>,
    },
}

impl Reversal {
    /// Restores the graph to the edge set it had before the apply that
    /// produced this receipt.
    pub fn undo(self, graph: &mut Graph) -> Result<(), GraphError> {
        match self {
            Reversal::Toggle { a, b } => graph.toggle_edge(a, b),
            Reversal::Compound { edges } => {
                for (a, b) in edges.into_iter().rev() {
                    graph.toggle_edge(a, b)?;
                }
                Ok(())
            }
            Reversal::Severed { target, neighbors } => {
                for neighbor in neighbors {
                    graph.add_edge(target, neighbor)?;
                }
                Ok(())
            }
        }
    }
}
