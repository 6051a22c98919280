//! Monte Carlo Tree Search (MCTS) guided by a policy/value evaluator.
//!
//! This module implements PUCT search:
//! - Each node is expanded once, on its first visit, with one child per legal
//!   move plus PASS, seeded with the evaluator's prior
//! - Selection maximizes `Q + c_puct * P * sqrt(sum N) / (1 + N)`
//! - The evaluator's value replaces random playouts at new leaves
//! - The move played is the most visited child of the root
//!
//! Every node stores values from the perspective of its own side to move.
//! [`inverse`] is the single place where a value changes perspective.
//!
//! The tree is rebuilt for every move; nothing is reused between `think` calls.

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::board::{Board, Color, Vertex};
use crate::constants::{
    C_PUCT, DEFAULT_PLAYOUTS, PASS_MOVE, RESIGN_MOVE, RESIGN_THRESHOLD, SCORE_EPSILON,
};
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::time_control::TimeControl;

/// Errors that can occur during search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),
}

/// Configuration for a search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of simulations per move.
    pub playouts: usize,

    /// Win rate of the chosen move below which the engine resigns.
    pub resign_threshold: f32,

    /// Exploration constant for PUCT.
    pub c_puct: f32,

    /// Log the root statistics and clocks at info level.
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            playouts: DEFAULT_PLAYOUTS,
            resign_threshold: RESIGN_THRESHOLD,
            c_puct: C_PUCT,
            verbose: false,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set number of playouts.
    pub fn with_playouts(mut self, n: usize) -> Self {
        self.playouts = n;
        self
    }

    /// Builder pattern: set resign threshold.
    pub fn with_resign_threshold(mut self, t: f32) -> Self {
        self.resign_threshold = t;
        self
    }

    /// Builder pattern: set c_puct exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Map an evaluator value in [-1, 1] to a win rate in [0, 1].
#[inline]
pub fn clamp(v: f32) -> f32 {
    (v.clamp(-1.0, 1.0) + 1.0) / 2.0
}

/// Swap the perspective of a win rate.
#[inline]
pub fn inverse(v: f32) -> f32 {
    1.0 - v
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Move leading to this node (PASS for the root).
    pub vertex: Vertex,
    /// Prior probability from the evaluator.
    pub policy: f32,
    /// Evaluator win rate for this position, in [0, 1].
    pub nn_eval: f32,
    /// Sum of backed-up win rates, from this node's side to move.
    pub values: f32,
    pub visits: u32,
    /// Children in expansion order: legal moves by intersection index, then PASS.
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(vertex: Vertex, policy: f32) -> Self {
        Self {
            vertex,
            policy,
            nn_eval: 0.0,
            values: 0.0,
            visits: 0,
            children: Vec::new(),
        }
    }

    /// Average backed-up win rate for this node's side to move.
    #[inline]
    pub fn winrate(&self) -> f32 {
        if self.visits > 0 {
            self.values / self.visits as f32
        } else {
            clamp(0.0)
        }
    }

    /// The child reached by `vertex`.
    pub fn child(&self, vertex: Vertex) -> Option<&Node> {
        self.children.iter().find(|c| c.vertex == vertex)
    }

    /// Expand this node using the evaluator's output for `board`.
    ///
    /// Creates one child per legal move plus PASS and returns the evaluator's
    /// value as a win rate for the side to move.
    pub fn expand_children<E: Evaluator + ?Sized>(
        &mut self,
        board: &Board,
        evaluator: &E,
    ) -> Result<f32, SearchError> {
        let eval = evaluator.evaluate(board)?;
        eval.validate(board)?;

        let n = board.num_intersections();
        self.children.reserve(n + 1);
        for idx in 0..n {
            let vtx = board.index_to_vertex(idx);
            if board.legal(vtx) {
                self.children.push(Node::new(vtx, eval.prior(board, vtx)));
            }
        }
        self.children.push(Node::new(PASS_MOVE, eval.prior(board, PASS_MOVE)));

        self.nn_eval = clamp(eval.value);
        Ok(self.nn_eval)
    }

    /// Drop children whose move would repeat an earlier whole-board position.
    pub fn remove_superko(&mut self, board: &Board) {
        self.children.retain(|child| {
            if child.vertex == PASS_MOVE {
                return true;
            }
            let mut next = board.clone();
            next.play(child.vertex);
            !next.superko()
        });
    }

    /// Index of the child with the highest PUCT score. The first maximum in
    /// child order wins ties.
    fn select_index(&self, c_puct: f32) -> Option<usize> {
        let total: u32 = self.children.iter().map(|c| c.visits).sum();
        let sqrt_total = (total.max(1) as f32).sqrt();

        let mut best = None;
        let mut best_score = f32::NEG_INFINITY;
        for (i, child) in self.children.iter().enumerate() {
            let q = if child.visits > 0 {
                inverse(child.winrate())
            } else {
                clamp(0.0)
            };
            let score = q + c_puct * child.policy * sqrt_total / (1.0 + child.visits as f32);
            if score > best_score {
                best_score = score;
                best = Some(i);
            }
        }
        best
    }

    /// Move of the child with the highest PUCT score, or PASS if unexpanded.
    pub fn puct_select(&self, c_puct: f32) -> Vertex {
        self.select_index(c_puct)
            .map_or(PASS_MOVE, |i| self.children[i].vertex)
    }

    /// Back up one simulation result.
    #[inline]
    pub fn update(&mut self, value: f32) {
        self.values += value;
        self.visits += 1;
    }

    /// The most visited child, first in child order on ties.
    fn most_visited(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for child in &self.children {
            if best.is_none_or(|b| child.visits > b.visits) {
                best = Some(child);
            }
        }
        best
    }

    /// Choose the move to play: the most visited child, or RESIGN if its win
    /// rate for this node's side to move is below `resign_threshold`.
    pub fn get_best_move(&self, resign_threshold: f32) -> Vertex {
        match self.most_visited() {
            None => PASS_MOVE,
            Some(child) if child.visits > 0 && inverse(child.winrate()) < resign_threshold => {
                RESIGN_MOVE
            }
            Some(child) => child.vertex,
        }
    }

    /// Root statistics: overall win rate, then every visited child by visits.
    pub fn summary(&self, board: &Board) -> String {
        let mut out = format!(
            "root -> W: {:.2}%, P: {:.2}%, V: {}\n",
            self.winrate() * 100.0,
            self.policy * 100.0,
            self.visits
        );
        let mut visited: Vec<&Node> = self.children.iter().filter(|c| c.visits > 0).collect();
        visited.sort_by(|a, b| b.visits.cmp(&a.visits));
        for child in visited {
            out.push_str(&format!(
                "  {:>6} -> W: {:.2}%, P: {:.2}%, V: {}\n",
                board.vertex_to_text(child.vertex),
                inverse(child.winrate()) * 100.0,
                child.policy * 100.0,
                child.visits
            ));
        }
        out
    }
}

/// Outcome of a `think` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Move to play (may be PASS or RESIGN).
    pub best_move: Vertex,
    /// Simulations completed.
    pub playouts: usize,
    /// Root side's win rate for the most visited move.
    pub winrate: f32,
}

/// Search controller for one move decision.
pub struct Search<'a, E: Evaluator + ?Sized> {
    root_board: &'a Board,
    evaluator: &'a E,
    time_control: &'a mut TimeControl,
    config: &'a SearchConfig,
}

impl<'a, E: Evaluator + ?Sized> Search<'a, E> {
    pub fn new(
        root_board: &'a Board,
        evaluator: &'a E,
        time_control: &'a mut TimeControl,
        config: &'a SearchConfig,
    ) -> Self {
        Self {
            root_board,
            evaluator,
            time_control,
            config,
        }
    }

    fn prepare_root(&self) -> Result<Node, SearchError> {
        let mut root = Node::new(PASS_MOVE, 1.0);
        let value = root.expand_children(self.root_board, self.evaluator)?;
        root.remove_superko(self.root_board);
        root.update(value);
        Ok(root)
    }

    /// Run one simulation from `node`, whose side to move is `color`.
    ///
    /// Returns the result as a win rate for the player who moved into `node`.
    fn play_simulation(
        &self,
        color: Color,
        board: &mut Board,
        node: &mut Node,
    ) -> Result<f32, SearchError> {
        let value = if board.num_passes() >= 2 {
            terminal_value(board.final_score(), color)
        } else if let Some(idx) = node.select_index(self.config.c_puct) {
            let child = &mut node.children[idx];
            let played = board.play(child.vertex);
            debug_assert!(played, "tree child must be legal");
            self.play_simulation(color.opponent(), board, child)?
        } else {
            node.expand_children(board, self.evaluator)?
        };
        node.update(value);
        Ok(inverse(value))
    }

    /// Search the root position and return the chosen move.
    ///
    /// Stops after `playouts` simulations or when the thinking time for the
    /// side to move runs out, whichever comes first.
    pub fn think(&mut self) -> Result<SearchResult, SearchError> {
        let board = self.root_board;
        if board.num_passes() >= 2 {
            return Ok(SearchResult {
                best_move: PASS_MOVE,
                playouts: 0,
                winrate: clamp(0.0),
            });
        }

        let color = board.to_move;
        self.time_control.clock();
        if self.config.verbose {
            info!(clock = %self.time_control, "search start");
        }

        let mut root = self.prepare_root()?;
        let mut playouts = 0;
        for _ in 0..self.config.playouts {
            let max_time =
                self.time_control
                    .get_thinking_time(color, board.board_size(), board.move_num());
            if self.time_control.should_stop(max_time) {
                debug!(max_time, playouts, "thinking time exhausted");
                break;
            }
            let mut sim_board = board.clone();
            let value = self.play_simulation(color, &mut sim_board, &mut root)?;
            trace!(playout = playouts, value, "simulation complete");
            playouts += 1;
        }

        let elapsed = self.time_control.elapsed();
        self.time_control.took_time(color);

        let best_move = root.get_best_move(self.config.resign_threshold);
        let winrate = root
            .most_visited()
            .filter(|c| c.visits > 0)
            .map_or(root.winrate(), |c| inverse(c.winrate()));

        if self.config.verbose {
            info!("\n{}", root.summary(board));
            info!(clock = %self.time_control, "search done");
        } else {
            debug!("\n{}", root.summary(board));
        }
        info!(
            %color,
            best = %board.vertex_to_text(best_move),
            playouts,
            winrate,
            elapsed,
            "move chosen"
        );

        Ok(SearchResult {
            best_move,
            playouts,
            winrate,
        })
    }
}

/// Win rate of a finished game for `color`: 1 for a win, 0 for a loss, 0.5
/// for a draw.
fn terminal_value(score: f32, color: Color) -> f32 {
    let winner = if score > SCORE_EPSILON {
        Color::Black
    } else if score < -SCORE_EPSILON {
        Color::White
    } else {
        return 0.5;
    };
    if winner == color { 1.0 } else { 0.0 }
}
