//! MCTS node and edge structures.
//!
//! Nodes live in an arena and refer to each other by `NodeId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Move, Side, SideMap};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Wrap a raw arena index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the `NONE` sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Raw arena index.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A move out of a node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub mv: Move,

    /// Child node (NONE until expanded).
    pub child: NodeId,

    pub visits: u32,

    /// Rollouts won through this edge, per side.
    pub total_reward: SideMap<f64>,

    /// Heuristic bonus credited to the side making the move.
    pub bonus: f64,
}

impl Edge {
    /// Unexpanded edge for `mv` with no bonus.
    #[must_use]
    pub fn new(mv: Move) -> Self {
        Self::with_bonus(mv, 0.0)
    }

    /// Unexpanded edge for `mv` with a heuristic bonus.
    #[must_use]
    pub fn with_bonus(mv: Move, bonus: f64) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: SideMap::with_value(0.0),
            bonus,
        }
    }

    /// Mean reward for `side`, without the bonus.
    #[must_use]
    pub fn mean_reward(&self, side: Side) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward[side] / self.visits as f64
        }
    }

    /// Mean reward for `side` with the heuristic bonus folded in.
    #[must_use]
    pub fn biased_value(&self, side: Side) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            (self.bonus + self.total_reward[side]) / self.visits as f64
        }
    }

    /// Check if the child node exists.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the edge from parent that led to this node.
    pub parent_edge_idx: u16,

    pub to_move: Side,

    /// Depth in tree (root = 0).
    pub depth: u16,

    pub visits: u32,

    /// Set when a pawn reached its goal row on the way here.
    pub winner: Option<Side>,

    /// Outgoing edges. Empty on terminal nodes.
    pub edges: SmallVec<[Edge; 8]>,
}

impl MCTSNode {
    /// Create a child node.
    #[must_use]
    pub fn new(parent: NodeId, parent_edge_idx: u16, to_move: Side, depth: u16) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            visits: 0,
            winner: None,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node with `to_move` to play.
    #[must_use]
    pub fn root(to_move: Side) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0)
    }

    /// Check if the node holds a finished game.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some()
    }

    /// True once every edge has a child. False for a node without edges.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.is_expanded())
    }

    /// Check if any edge still lacks a child.
    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Indices of edges without a child.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_expanded())
            .map(|(i, _)| i)
    }

    /// The most visited edge. Ties go to the earliest edge.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .fold(None, |best: Option<&Edge>, edge| match best {
                Some(b) if b.visits >= edge.visits => Some(b),
                _ => Some(edge),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WallSlot;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.raw(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_edge_values() {
        let mut edge = Edge::with_bonus(Move::pawn(1, 0), 100.0);
        assert_eq!(edge.mean_reward(Side::White), 0.0);
        assert_eq!(edge.biased_value(Side::White), 0.0);
        assert!(!edge.is_expanded());

        edge.visits = 4;
        edge.total_reward[Side::White] = 3.0;
        edge.total_reward[Side::Black] = 1.0;

        assert_eq!(edge.mean_reward(Side::White), 0.75);
        assert_eq!(edge.mean_reward(Side::Black), 0.25);
        assert_eq!(edge.biased_value(Side::White), 25.75);
    }

    #[test]
    fn test_node_expansion_state() {
        let mut node = MCTSNode::root(Side::White);
        assert!(!node.has_unexpanded());
        assert!(!node.is_fully_expanded());

        node.edges.push(Edge::new(Move::pawn(1, 0)));
        node.edges.push(Edge::new(Move::WallPlacement(WallSlot::horizontal(3, 3))));
        node.edges.push(Edge::new(Move::pawn(0, 1)));
        node.edges[1].child = NodeId::new(4);

        assert!(node.has_unexpanded());
        assert_eq!(node.unexpanded_edges().collect::<Vec<_>>(), vec![0, 2]);

        node.edges[0].child = NodeId::new(5);
        node.edges[2].child = NodeId::new(6);
        assert!(node.is_fully_expanded());
    }

    #[test]
    fn test_best_edge_prefers_first_on_tie() {
        let mut node = MCTSNode::root(Side::Black);
        for (mv, visits) in [(Move::pawn(-1, 0), 7), (Move::pawn(0, 1), 9), (Move::pawn(0, -1), 9)] {
            let mut edge = Edge::new(mv);
            edge.visits = visits;
            node.edges.push(edge);
        }
        assert_eq!(node.best_edge_by_visits().unwrap().mv, Move::pawn(0, 1));
    }

    #[test]
    fn test_serialization() {
        let mut node = MCTSNode::root(Side::Black);
        node.edges.push(Edge::new(Move::pawn(-1, 0)));
        node.visits = 100;

        let json = serde_json::to_string(&node).unwrap();
        let deserialized: MCTSNode = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.to_move, Side::Black);
        assert_eq!(deserialized.visits, 100);
        assert_eq!(deserialized.edges[0].mv, Move::pawn(-1, 0));
    }
}
