//! MCTS policies for selection and simulation.
//!
//! - `SelectionPolicy`: which edge to follow through the expanded tree
//! - `SimulationPolicy`: how a rollout plays a leaf out to a winner

use crate::core::{GameRng, GameState, Move, Side};
use crate::rules::{pawn, paths, walls, RulesEngine};

use super::config::MCTSConfig;
use super::node::MCTSNode;

/// Random picks that may land on a path-blocking wall before a rollout
/// settles for a pawn move.
const WALL_RETRIES: usize = 3;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Index of the edge to follow, judged for `side`.
    fn select(&self, node: &MCTSNode, side: Side, config: &MCTSConfig) -> usize;
}

/// UCB1 with the heuristic bonus folded into the exploitation term.
///
/// Formula: (bonus + wins(a)) / n(a) + c * sqrt(ln(N) / n(a))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, node: &MCTSNode, side: Side, config: &MCTSConfig) -> usize {
        let ln_parent = (node.visits.max(1) as f64).ln();

        node.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let score = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    edge.biased_value(side)
                        + config.exploration_constant * (ln_parent / edge.visits as f64).sqrt()
                };
                (i, score)
            })
            .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
                Some((_, b)) if b >= score => best,
                _ => Some((i, score)),
            })
            .map_or(0, |(i, _)| i)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// How a rollout ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RolloutOutcome {
    pub winner: Side,

    /// The ply cap ended the rollout and path length picked the winner.
    pub truncated: bool,
}

/// Policy for playing a leaf state out to a winner.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Play from `state` (modified in place) until someone wins or the
    /// rollout depth in `config` is reached.
    fn simulate(
        &self,
        rules: &E,
        state: &mut GameState,
        rng: &mut GameRng,
        config: &MCTSConfig,
    ) -> RolloutOutcome;
}

/// Mostly follows the shortest path, sometimes plays a random probable move.
///
/// With probability `(k - 1) / k` the side to move steps along its shortest
/// path. Otherwise it picks uniformly among its pawn moves and probable walls;
/// a pick that would cut a path off is redrawn a few times before the first
/// pawn move is taken instead.
#[derive(Clone, Debug)]
pub struct ShortestPathSimulation {
    /// Zero means "use the config value".
    k: u32,
}

impl ShortestPathSimulation {
    /// Policy with parameter `k`; `0` uses the configured value.
    #[must_use]
    pub const fn new(k: u32) -> Self {
        Self { k }
    }

    fn pick(&self, state: &GameState, side: Side, rng: &mut GameRng, k: u32) -> Option<Move> {
        if !rng.one_in(k) {
            if let Some(mv) = pawn::shortest_path_step(state, side) {
                return Some(mv);
            }
        }

        let pawn_moves = pawn::pawn_moves(state, side);
        let wall_slots = walls::probable_walls(state, side);
        let total = pawn_moves.len() + wall_slots.len();
        if total == 0 {
            return None;
        }
        for _ in 0..WALL_RETRIES {
            let i = rng.gen_index(total);
            if i < pawn_moves.len() {
                return Some(pawn_moves[i]);
            }
            let slot = wall_slots[i - pawn_moves.len()];
            if walls::keeps_paths_open(state, slot) {
                return Some(Move::WallPlacement(slot));
            }
        }
        pawn_moves.first().copied()
    }
}

impl Default for ShortestPathSimulation {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<E: RulesEngine> SimulationPolicy<E> for ShortestPathSimulation {
    fn simulate(
        &self,
        rules: &E,
        state: &mut GameState,
        rng: &mut GameRng,
        config: &MCTSConfig,
    ) -> RolloutOutcome {
        let k = if self.k == 0 {
            config.rollout_policy_parameter
        } else {
            self.k
        };

        for _ in 0..config.rollout_depth {
            if let Some(winner) = state.winner() {
                return RolloutOutcome {
                    winner,
                    truncated: false,
                };
            }
            let side = state.to_move();
            match self.pick(state, side, rng, k) {
                Some(mv) => rules.apply_move(state, side, mv),
                None => break,
            }
        }
        finish(state)
    }
}

/// Uniformly random legal moves.
///
/// Slow on open boards, where most legal moves are walls; kept as a
/// baseline for the shortest-path policy.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(
        &self,
        rules: &E,
        state: &mut GameState,
        rng: &mut GameRng,
        config: &MCTSConfig,
    ) -> RolloutOutcome {
        for _ in 0..config.rollout_depth {
            if let Some(winner) = state.winner() {
                return RolloutOutcome {
                    winner,
                    truncated: false,
                };
            }
            let side = state.to_move();
            let moves = rules.legal_moves(state, side);
            match rng.choose(&moves) {
                Some(&mv) => rules.apply_move(state, side, mv),
                None => break,
            }
        }
        finish(state)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn finish(state: &GameState) -> RolloutOutcome {
    match state.winner() {
        Some(winner) => RolloutOutcome {
            winner,
            truncated: false,
        },
        None => RolloutOutcome {
            winner: closer_side(state),
            truncated: true,
        },
    }
}

/// The side with the shorter path to its goal. Ties go to the side to move.
#[must_use]
pub fn closer_side(state: &GameState) -> Side {
    let white = paths::side_distance(state, Side::White).unwrap_or(u32::MAX);
    let black = paths::side_distance(state, Side::Black).unwrap_or(u32::MAX);
    match white.cmp(&black) {
        std::cmp::Ordering::Less => Side::White,
        std::cmp::Ordering::Greater => Side::Black,
        std::cmp::Ordering::Equal => state.to_move(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position, SideMap, WallSlot};
    use crate::mcts::node::Edge;
    use crate::rules::Quoridor;

    fn make_test_node() -> MCTSNode {
        let mut node = MCTSNode::root(Side::White);

        let mut e0 = Edge::new(Move::pawn(1, 0));
        e0.visits = 100;
        e0.total_reward[Side::White] = 80.0;

        let mut e1 = Edge::new(Move::pawn(0, 1));
        e1.visits = 10;
        e1.total_reward[Side::White] = 7.0;

        let e2 = Edge::new(Move::pawn(0, -1));

        node.edges.push(e0);
        node.edges.push(e1);
        node.edges.push(e2);
        node.visits = 110;
        node
    }

    #[test]
    fn test_ucb1_selects_unvisited() {
        let node = make_test_node();
        assert_eq!(UCB1.select(&node, Side::White, &MCTSConfig::default()), 2);
    }

    #[test]
    fn test_ucb1_bonus_attracts_visits() {
        let mut node = make_test_node();
        node.edges[2].visits = 10;
        node.edges[2].total_reward[Side::White] = 1.0;
        node.edges[2].bonus = 100.0;
        node.visits = 120;

        assert_eq!(UCB1.select(&node, Side::White, &MCTSConfig::default()), 2);
    }

    #[test]
    fn test_ucb1_judges_for_given_side() {
        let mut node = make_test_node();
        node.edges[2].visits = 10;
        node.edges[2].total_reward[Side::Black] = 10.0;
        node.visits = 120;
        let config = MCTSConfig::default().with_exploration(0.0);

        assert_eq!(UCB1.select(&node, Side::White, &config), 0);
        assert_eq!(UCB1.select(&node, Side::Black, &config), 2);
    }

    #[test]
    fn test_closer_side() {
        let config = GameConfig::default();
        let state = GameState::from_parts(
            &config,
            SideMap::from_pair(Position::new(6, 4), Position::new(5, 0)),
            &[],
            SideMap::with_value(10),
            Side::Black,
        )
        .unwrap();
        assert_eq!(closer_side(&state), Side::White);

        let even = GameState::new(&config).unwrap().with_to_move(Side::Black);
        assert_eq!(closer_side(&even), Side::Black);
    }

    #[test]
    fn test_greedy_rollout_reaches_goal() {
        let rules = Quoridor::default();
        let mut state = rules.initial_state().unwrap();
        let mut rng = GameRng::new(1);
        let config = MCTSConfig::default();

        let outcome = ShortestPathSimulation::new(u32::MAX)
            .simulate(&rules, &mut state, &mut rng, &config);

        // Both walk the centre column; Black jumps White and arrives first.
        assert_eq!(outcome, RolloutOutcome { winner: Side::Black, truncated: false });
        assert_eq!(state.winner(), Some(Side::Black));
    }

    #[test]
    fn test_truncated_rollout_uses_path_length() {
        let rules = Quoridor::default();
        let mut state = rules.initial_state().unwrap();
        // Blocks Black's first step north.
        rules.apply_move(&mut state, Side::White, Move::WallPlacement(WallSlot::horizontal(7, 3)));
        let mut rng = GameRng::new(5);
        let config = MCTSConfig::default().with_rollout_depth(0);

        let outcome = RandomSimulation.simulate(&rules, &mut state, &mut rng, &config);
        assert!(outcome.truncated);
        assert_eq!(outcome.winner, Side::White);
    }

    #[test]
    fn test_rollouts_keep_walls_legal() {
        let rules = Quoridor::default();
        let config = MCTSConfig::default().with_rollout_policy_parameter(1);

        for seed in 0..20 {
            let mut state = rules.initial_state().unwrap();
            let mut rng = GameRng::new(seed);
            ShortestPathSimulation::default().simulate(&rules, &mut state, &mut rng, &config);
            state.check_invariants().unwrap();
            assert!(paths::both_sides_connected(&state, state.grid()));
        }
    }
}
