//! Iterative-deepening negamax with alpha-beta pruning.
//!
//! ## Budget
//!
//! Every visited node costs one unit. When a node or time budget runs out
//! the current iteration is abandoned and the best move of the last
//! completed iteration is returned. If not even the first iteration
//! finished, the best fully searched root move is used, and failing that the
//! first move in search order (the shortest-path step).
//!
//! The returned move is always taken from the full legal move list of the
//! root, even when inner nodes prune wall candidates.
//!
//! ## Transposition table
//!
//! Keyed by [`GameState::key`]. Entries hold a bound and the best reply,
//! which is tried first on revisits. The table is cleared when it grows past
//! a fixed number of entries.

use std::cmp::Reverse;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::core::{EngineError, GameState, Move, Result, Side};
use crate::rules::{pawn, Quoridor, RulesEngine};

use super::config::{EvalWeights, SearchBudget, SearchConfig};
use super::eval::{evaluate, WIN_SCORE, WIN_THRESHOLD};

/// Deepest iteration attempted under a node or time budget.
pub const MAX_DEPTH: u32 = 64;

const INF: i32 = WIN_SCORE + 1;
const TT_CAPACITY: usize = 1 << 20;
const TIME_CHECK_INTERVAL: u64 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
struct TtEntry {
    depth: u32,
    score: i32,
    bound: Bound,
    best: Option<Move>,
}

/// Outcome of an alpha-beta search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Chosen move; always legal for the searched side.
    pub best_move: Move,
    /// Score of `best_move` for the searched side.
    pub score: i32,
    /// Deepest fully completed iteration (0 if none completed).
    pub depth: u32,
    /// Nodes visited.
    pub nodes: u64,
}

#[derive(Clone, Copy, Debug)]
struct Limits {
    max_depth: u32,
    node_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl Limits {
    fn from_budget(budget: SearchBudget) -> Self {
        match budget {
            SearchBudget::Depth(depth) => Self {
                max_depth: depth.min(MAX_DEPTH),
                node_limit: None,
                time_limit: None,
            },
            SearchBudget::Nodes(nodes) => Self {
                max_depth: MAX_DEPTH,
                node_limit: Some(nodes),
                time_limit: None,
            },
            SearchBudget::TimeMs(ms) => Self {
                max_depth: MAX_DEPTH,
                node_limit: None,
                time_limit: Some(Duration::from_millis(ms)),
            },
        }
    }
}

/// Alpha-beta searcher. One instance serves one `search` call at a time.
pub struct AlphaBeta<'a> {
    rules: &'a Quoridor,
    weights: EvalWeights,
    wall_pruning: bool,
    limits: Limits,
    tt: FxHashMap<u64, TtEntry>,
    nodes: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl<'a> AlphaBeta<'a> {
    /// Create a searcher, rejecting budgets that allow no work and
    /// out-of-range evaluation weights.
    pub fn new(rules: &'a Quoridor, config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rules,
            weights: config.weights,
            wall_pruning: config.wall_pruning,
            limits: Limits::from_budget(config.budget),
            tt: FxHashMap::default(),
            nodes: 0,
            deadline: None,
            stopped: false,
        })
    }

    /// Search for the best move of `side` in `state`.
    pub fn search(&mut self, state: &GameState, side: Side) -> Result<SearchResult> {
        if let Some(winner) = state.winner() {
            return Err(EngineError::TerminalState { winner });
        }
        let mut root_moves = self.rules.legal_moves(state, side);
        if root_moves.is_empty() {
            return Err(EngineError::invalid_state(format!("{} has no legal moves", side)));
        }
        self.order(state, side, &mut root_moves, None);

        self.nodes = 0;
        self.stopped = false;
        self.deadline = self.limits.time_limit.map(|limit| Instant::now() + limit);

        let mut result = SearchResult {
            best_move: root_moves[0],
            score: 0,
            depth: 0,
            nodes: 0,
        };
        if root_moves.len() == 1 {
            return Ok(result);
        }

        for depth in 1..=self.limits.max_depth {
            let (best, finished) = self.search_root(state, side, &root_moves, depth);
            if !finished {
                if result.depth == 0 {
                    if let Some((mv, score)) = best {
                        result.best_move = mv;
                        result.score = score;
                    }
                    warn!(nodes = self.nodes, "budget ran out before the first iteration finished");
                }
                break;
            }
            if let Some((mv, score)) = best {
                result.best_move = mv;
                result.score = score;
                result.depth = depth;
                debug!(depth, score, best = %mv, nodes = self.nodes, "iteration complete");

                if let Some(index) = root_moves.iter().position(|&m| m == mv) {
                    let promoted = root_moves.remove(index);
                    root_moves.insert(0, promoted);
                }
            }
            if result.score.abs() >= WIN_THRESHOLD {
                break;
            }
        }

        result.nodes = self.nodes;
        Ok(result)
    }

    /// Nodes visited by the last search.
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// One root iteration. Returns the best fully searched move and whether
    /// every root move was searched.
    fn search_root(
        &mut self,
        state: &GameState,
        side: Side,
        moves: &[Move],
        depth: u32,
    ) -> (Option<(Move, i32)>, bool) {
        let mut alpha = -INF;
        let mut best: Option<(Move, i32)> = None;

        for &mv in moves {
            let mut child = state.clone();
            self.rules.apply_move(&mut child, side, mv);
            let score = -self.negamax(&child, side.opponent(), depth - 1, 1, -INF, -alpha);
            if self.stopped {
                return (best, false);
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }
        (best, true)
    }

    fn negamax(
        &mut self,
        state: &GameState,
        side: Side,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        if self.out_of_budget() {
            self.stopped = true;
            return 0;
        }
        self.nodes += 1;

        if let Some(winner) = state.winner() {
            let score = WIN_SCORE - ply as i32;
            return if winner == side { score } else { -score };
        }
        if depth == 0 {
            return evaluate(state, side, &self.weights);
        }

        let key = state.key();
        let alpha_orig = alpha;
        let mut tt_move = None;
        if let Some(entry) = self.tt.get(&key) {
            tt_move = entry.best;
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower => alpha = alpha.max(score),
                    Bound::Upper => beta = beta.min(score),
                }
                if alpha >= beta {
                    return score;
                }
            }
        }

        let mut moves = if self.wall_pruning {
            self.rules.candidate_moves(state, side)
        } else {
            self.rules.legal_moves(state, side)
        };
        if moves.is_empty() {
            return evaluate(state, side, &self.weights);
        }
        self.order(state, side, &mut moves, tt_move);

        let mut best_score = -INF;
        let mut best_move = None;
        for mv in moves {
            let mut child = state.clone();
            self.rules.apply_move(&mut child, side, mv);
            let score = -self.negamax(&child, side.opponent(), depth - 1, ply + 1, -beta, -alpha);
            if self.stopped {
                return 0;
            }
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        if self.tt.len() >= TT_CAPACITY {
            self.tt.clear();
        }
        self.tt.insert(
            key,
            TtEntry {
                depth,
                score: score_to_tt(best_score, ply),
                bound,
                best: best_move,
            },
        );
        best_score
    }

    fn out_of_budget(&self) -> bool {
        if self.stopped {
            return true;
        }
        if self.limits.node_limit.is_some_and(|limit| self.nodes >= limit) {
            return true;
        }
        match self.deadline {
            Some(deadline) => self.nodes % TIME_CHECK_INTERVAL == 0 && Instant::now() >= deadline,
            None => false,
        }
    }

    /// Order moves: table move, shortest-path step, other pawn moves, walls.
    fn order(&self, state: &GameState, side: Side, moves: &mut [Move], tt_move: Option<Move>) {
        let path_step = pawn::shortest_path_step(state, side);
        moves.sort_by_key(|&mv| {
            let rank = if Some(mv) == tt_move {
                3
            } else if Some(mv) == path_step {
                2
            } else if mv.is_pawn() {
                1
            } else {
                0
            };
            Reverse(rank)
        });
    }
}

/// Make forced-win scores relative to the node they are stored at.
fn score_to_tt(score: i32, ply: u32) -> i32 {
    if score >= WIN_THRESHOLD {
        score + ply as i32
    } else if score <= -WIN_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: u32) -> i32 {
    if score >= WIN_THRESHOLD {
        score - ply as i32
    } else if score <= -WIN_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}
