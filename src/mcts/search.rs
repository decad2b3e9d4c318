//! Core MCTS search algorithm.
//!
//! Both sides grow the tree; every node picks the edge that is best for its
//! own side to move. The root always holds the full legal move list, inner
//! nodes hold `RulesEngine::candidate_moves` when wall pruning is on.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::{EngineError, GameRng, GameState, Move, Result, Side};
use crate::rules::{pawn, RulesEngine};
use crate::search::SearchBudget;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{SelectionPolicy, ShortestPathSimulation, SimulationPolicy, UCB1};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// MCTS search context. Owns the tree and can be reused across searches.
pub struct MCTSSearch<E: RulesEngine> {
    rules: E,
    config: MCTSConfig,
    tree: MCTSTree,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    simulation: Box<dyn SimulationPolicy<E>>,
    wall_pruning: bool,
    stats: SearchStats,
}

impl<E: RulesEngine> MCTSSearch<E> {
    /// Create a search with UCB1 selection and shortest-path rollouts.
    pub fn new(rules: E, config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(1 << 16);

        Self {
            rules,
            config,
            tree: MCTSTree::with_capacity(Side::White, capacity),
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(ShortestPathSimulation::default()),
            wall_pruning: true,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    #[must_use]
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    #[must_use]
    pub fn with_simulation<S: SimulationPolicy<E> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Expand inner nodes with every legal move instead of candidates.
    #[must_use]
    pub fn with_wall_pruning(mut self, enabled: bool) -> Self {
        self.wall_pruning = enabled;
        self
    }

    /// Run a search for `side` and return the most visited root move.
    ///
    /// `Nodes` counts iterations. `Depth` has no meaning for MCTS and is
    /// rejected.
    pub fn search(&mut self, state: &GameState, side: Side, budget: SearchBudget) -> Result<Move> {
        budget.validate()?;
        let (iterations, time_limit) = match budget {
            SearchBudget::Nodes(n) => (n, None),
            SearchBudget::TimeMs(ms) => (u64::MAX, Some(Duration::from_millis(ms))),
            SearchBudget::Depth(_) => {
                return Err(EngineError::UnsupportedBudget {
                    budget,
                    strategy: "mcts",
                })
            }
        };
        if let Some(winner) = state.winner() {
            return Err(EngineError::TerminalState { winner });
        }

        let start = Instant::now();
        let deadline = time_limit.map(|limit| start + limit);
        self.stats.reset();
        self.rng = GameRng::new(self.config.seed);
        self.tree.reset(side);

        let root = self.tree.root();
        let root_moves = self.rules.legal_moves(state, side);
        self.add_edges(root, state, side, root_moves);

        match self.tree.get(root).edges.len() {
            0 => return Err(EngineError::invalid_state(format!("{} has no legal moves", side))),
            1 => return Ok(self.tree.get(root).edges[0].mv),
            _ => {}
        }

        while self.stats.iterations < iterations {
            if self.stats.iterations > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            let mut sim_state = state.clone();
            self.iteration(&mut sim_state);
            self.stats.iterations += 1;

            if self.tree.len() >= self.config.max_nodes {
                debug!(nodes = self.tree.len(), "node limit reached");
                break;
            }
        }
        self.stats.time_us = start.elapsed().as_micros() as u64;

        self.tree
            .root_node()
            .best_edge_by_visits()
            .map(|edge| edge.mv)
            .ok_or_else(|| EngineError::invalid_state("search tree lost its root moves"))
    }

    /// Single iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, state: &mut GameState) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            if let Some(winner) = node.winner {
                self.backpropagate(&path, winner);
                return;
            }
            let to_move = node.to_move;

            if node.has_unexpanded() {
                let edge_idx = self.select_unexpanded(current);
                path.push((current, edge_idx));

                let mv = self.tree.get(current).edges[edge_idx].mv;
                self.rules.apply_move(state, to_move, mv);
                let child = self.expand_child(current, edge_idx, state);

                let winner = match self.tree.get(child).winner {
                    Some(winner) => winner,
                    None => self.simulate(state),
                };
                self.backpropagate(&path, winner);
                return;
            }

            if node.edges.is_empty() {
                // Stuck without moves; settle it like a cut-off rollout.
                let winner = super::policy::closer_side(state);
                self.backpropagate(&path, winner);
                return;
            }

            let edge_idx = self.selection.select(node, to_move, &self.config);
            path.push((current, edge_idx));

            let edge = &self.tree.get(current).edges[edge_idx];
            let (mv, child) = (edge.mv, edge.child);
            self.rules.apply_move(state, to_move, mv);
            current = child;
        }
    }

    /// Push edges for `moves`, crediting the shortest-path step with the bonus.
    fn add_edges(&mut self, node_id: NodeId, state: &GameState, side: Side, moves: Vec<Move>) {
        let path_step = pawn::shortest_path_step(state, side);
        let bonus = self.config.heuristic_bonus;

        let node = self.tree.get_mut(node_id);
        node.edges.extend(moves.into_iter().map(|mv| {
            if Some(mv) == path_step {
                Edge::with_bonus(mv, bonus)
            } else {
                Edge::new(mv)
            }
        }));
        self.stats.nodes_expanded += 1;
    }

    /// Unexpanded edge to try next: the bonus edge first, then a random one.
    fn select_unexpanded(&mut self, node_id: NodeId) -> usize {
        let node = self.tree.get(node_id);
        if let Some(idx) = node
            .unexpanded_edges()
            .find(|&i| node.edges[i].bonus > 0.0)
        {
            return idx;
        }
        let unexpanded: Vec<usize> = node.unexpanded_edges().collect();
        match unexpanded.len() {
            0 => 0,
            1 => unexpanded[0],
            len => unexpanded[self.rng.gen_index(len)],
        }
    }

    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &GameState) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        let to_move = state.to_move();
        self.stats.max_depth = self.stats.max_depth.max(depth);

        let mut child = MCTSNode::new(parent_id, edge_idx as u16, to_move, depth);
        child.winner = state.winner();
        let child_id = self.tree.alloc(child);
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        if state.winner().is_none() {
            let moves = if self.wall_pruning {
                self.rules.candidate_moves(state, to_move)
            } else {
                self.rules.legal_moves(state, to_move)
            };
            self.add_edges(child_id, state, to_move, moves);
        }
        child_id
    }

    fn simulate(&mut self, state: &mut GameState) -> Side {
        let mut sim_rng = self.rng.fork();
        let outcome = self
            .simulation
            .simulate(&self.rules, state, &mut sim_rng, &self.config);
        self.stats.rollouts += 1;
        if outcome.truncated {
            self.stats.truncated_rollouts += 1;
        }
        outcome.winner
    }

    fn backpropagate(&mut self, path: &[(NodeId, usize)], winner: Side) {
        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            edge.total_reward[winner] += 1.0;
        }
    }

    /// Statistics of the last search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree built by the last search.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Visit counts of the root moves after the last search.
    pub fn root_visits(&self) -> Vec<(Move, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv, e.visits))
            .collect()
    }

    /// Rules being searched.
    pub fn rules(&self) -> &E {
        &self.rules
    }

    /// Search parameters.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position, SideMap};
    use crate::mcts::policy::RandomSimulation;
    use crate::rules::Quoridor;

    fn searcher() -> MCTSSearch<Quoridor> {
        MCTSSearch::new(Quoridor::default(), MCTSConfig::default())
    }

    #[test]
    fn test_search_returns_legal_move() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();
        let legal = rules.legal_moves(&state, Side::White);

        let mut search = searcher();
        let mv = search.search(&state, Side::White, SearchBudget::Nodes(200)).unwrap();

        assert!(legal.contains(&mv));
        assert_eq!(search.stats().iterations, 200);
        assert!(search.stats().rollouts > 0);
        assert_eq!(search.root_visits().len(), legal.len());
    }

    #[test]
    fn test_single_iteration_prefers_path_step() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();

        let mv = searcher().search(&state, Side::White, SearchBudget::Nodes(1)).unwrap();
        assert_eq!(mv, Move::pawn(1, 0));
    }

    #[test]
    fn test_search_deterministic() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();
        let config = MCTSConfig::default().with_seed(12345);

        let mut a = MCTSSearch::new(rules.clone(), config.clone());
        let mut b = MCTSSearch::new(rules.clone(), config);

        let mv_a = a.search(&state, Side::White, SearchBudget::Nodes(300)).unwrap();
        let mv_b = b.search(&state, Side::White, SearchBudget::Nodes(300)).unwrap();
        assert_eq!(mv_a, mv_b);
        assert_eq!(a.root_visits(), b.root_visits());
    }

    #[test]
    fn test_finds_winning_step() {
        let rules = Quoridor::new(GameConfig::default().with_walls_per_player(0)).unwrap();
        let state = GameState::from_parts(
            rules.config(),
            SideMap::from_pair(Position::new(3, 3), Position::new(1, 7)),
            &[],
            SideMap::with_value(0),
            Side::Black,
        )
        .unwrap();

        let mut search = MCTSSearch::new(rules, MCTSConfig::default());
        let mv = search.search(&state, Side::Black, SearchBudget::Nodes(500)).unwrap();
        assert_eq!(mv, Move::pawn(-1, 0));
    }

    #[test]
    fn test_depth_budget_rejected() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();

        let err = searcher()
            .search(&state, Side::White, SearchBudget::Depth(3))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedBudget { strategy: "mcts", .. }));
    }

    #[test]
    fn test_time_budget() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();
        let mut search = searcher().with_simulation(RandomSimulation);

        let mv = search.search(&state, Side::White, SearchBudget::TimeMs(20)).unwrap();
        assert!(rules.legal_moves(&state, Side::White).contains(&mv));
        assert!(search.stats().iterations > 0);
    }

    #[test]
    fn test_tree_growth() {
        let rules = Quoridor::default();
        let state = rules.initial_state().unwrap();
        let mut search = searcher();
        search.search(&state, Side::White, SearchBudget::Nodes(400)).unwrap();

        let tree_stats = search.tree().stats();
        assert!(tree_stats.node_count > 1);
        assert!(tree_stats.max_depth > 0);
    }
}
