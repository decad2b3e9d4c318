//! Arena-based MCTS tree.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::Side;

/// Flat node arena. The root is always node 0.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree {
    nodes: Vec<MCTSNode>,
    root: NodeId,
}

impl MCTSTree {
    /// Tree holding only a root with `root_side` to move.
    #[must_use]
    pub fn new(root_side: Side) -> Self {
        Self::with_capacity(root_side, 1024)
    }

    /// Tree with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(root_side: Side, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity);
        nodes.push(MCTSNode::root(root_side));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    /// Root node id.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node by id.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode {
        &self.nodes[id.0 as usize]
    }

    /// Mutable node by id.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Size and shape summary.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            node_count: self.nodes.len(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            terminal_count: self.nodes.iter().filter(|n| n.is_terminal()).count(),
            total_edges: self.nodes.iter().map(|n| n.edges.len()).sum(),
            expanded_edges: self
                .nodes
                .iter()
                .flat_map(|n| n.edges.iter())
                .filter(|e| e.is_expanded())
                .count(),
        }
    }

    /// Drop every node and start over from a fresh root.
    pub fn reset(&mut self, root_side: Side) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(root_side));
        self.root = NodeId::new(0);
    }

    /// Root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode {
        self.get(self.root)
    }

    /// Mutable root node.
    pub fn root_node_mut(&mut self) -> &mut MCTSNode {
        self.get_mut(self.root)
    }
}

/// Shape of the tree after a search.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub terminal_count: usize,
    pub total_edges: usize,
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Average edges per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }

    /// Expanded edges over total edges.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_edges == 0 {
            0.0
        } else {
            self.expanded_edges as f64 / self.total_edges as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Move;
    use crate::mcts::node::Edge;

    #[test]
    fn test_tree_alloc() {
        let mut tree = MCTSTree::new(Side::White);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId::new(0));

        let child_id = tree.alloc(MCTSNode::new(NodeId::new(0), 0, Side::Black, 1));
        assert_eq!(child_id, NodeId::new(1));
        assert_eq!(tree.get(child_id).to_move, Side::Black);
    }

    #[test]
    fn test_tree_reset() {
        let mut tree = MCTSTree::new(Side::White);
        tree.alloc(MCTSNode::new(NodeId::new(0), 0, Side::Black, 1));
        tree.root_node_mut().visits = 3;

        tree.reset(Side::Black);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root_node().to_move, Side::Black);
        assert_eq!(tree.root_node().visits, 0);
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = MCTSTree::new(Side::White);
        let root = tree.root();
        tree.get_mut(root).edges.push(Edge::new(Move::pawn(1, 0)));
        tree.get_mut(root).edges.push(Edge::new(Move::pawn(0, 1)));

        let child_id = tree.alloc(MCTSNode::new(root, 0, Side::Black, 1));
        tree.get_mut(root).edges[0].child = child_id;
        tree.get_mut(child_id).winner = Some(Side::White);

        let stats = tree.stats();
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.max_depth, 1);
        assert_eq!(stats.terminal_count, 1);
        assert_eq!(stats.expansion_ratio(), 0.5);
        assert_eq!(stats.branching_factor(), 1.0);
    }
}
