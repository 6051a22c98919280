//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays random legal moves until both players pass or the game
//! length limit is hit, then scores the final position. [`RolloutEvaluator`]
//! turns one playout into the value half of an [`Evaluation`], which gives the
//! engine a usable player without a trained network.

use std::cell::RefCell;

use crate::board::{Board, Color, Vertex};
use crate::constants::{PASS_MOVE, ROLLOUT_LENGTH_FACTOR, SCORE_EPSILON};
use crate::evaluator::{Evaluation, Evaluator, EvaluatorError, uniform_policy};

/// Perform a random playout on `board` and return the winner, if any.
///
/// The side to move never fills one of its own true eyes; with no other
/// candidate it passes.
pub fn playout(board: &mut Board, rng: &mut fastrand::Rng) -> Option<Color> {
    let max_moves = board.move_num() + ROLLOUT_LENGTH_FACTOR * board.num_intersections();

    while board.num_passes() < 2 && board.move_num() < max_moves {
        let mv = choose_random_move(board, rng).unwrap_or(PASS_MOVE);
        board.play(mv);
    }

    let score = board.final_score();
    if score > SCORE_EPSILON {
        Some(Color::Black)
    } else if score < -SCORE_EPSILON {
        Some(Color::White)
    } else {
        None
    }
}

/// Choose a random legal move that does not fill the mover's own eye.
fn choose_random_move(board: &Board, rng: &mut fastrand::Rng) -> Option<Vertex> {
    let mover = board.to_move;
    let mut candidates: Vec<Vertex> = (0..board.num_intersections())
        .map(|idx| board.index_to_vertex(idx))
        .filter(|&vtx| board.legal(vtx) && !board.is_eye(vtx, mover))
        .collect();

    if candidates.is_empty() {
        return None;
    }
    Some(candidates.swap_remove(rng.usize(..candidates.len())))
}

/// Evaluator that scores a position with a single random playout.
///
/// The prior is uniform over legal moves; the value is +1 if the side to move
/// wins the playout, -1 if it loses and 0 for a draw.
#[derive(Debug)]
pub struct RolloutEvaluator {
    rng: RefCell<fastrand::Rng>,
}

impl RolloutEvaluator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self {
            rng: RefCell::new(fastrand::Rng::new()),
        }
    }
}

impl Evaluator for RolloutEvaluator {
    fn evaluate(&self, board: &Board) -> Result<Evaluation, EvaluatorError> {
        let mover = board.to_move;
        let mut scratch = board.clone();
        let winner = playout(&mut scratch, &mut self.rng.borrow_mut());

        let value = match winner {
            Some(c) if c == mover => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        };
        Ok(Evaluation {
            policy: uniform_policy(board),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playout_terminates() {
        let mut board = Board::new(9, 7.5);
        let mut rng = fastrand::Rng::with_seed(7);
        playout(&mut board, &mut rng);
        assert!(
            board.num_passes() >= 2
                || board.move_num() >= ROLLOUT_LENGTH_FACTOR * board.num_intersections()
        );
    }

    #[test]
    fn test_playout_on_finished_board() {
        // Two passes on an empty board: White wins by komi.
        let mut board = Board::new(9, 7.5);
        board.play(PASS_MOVE);
        board.play(PASS_MOVE);
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(playout(&mut board, &mut rng), Some(Color::White));
    }

    #[test]
    fn test_rollout_value_in_range_and_board_untouched() {
        let board = Board::new(9, 7.5);
        let before = board.clone();
        let eval = RolloutEvaluator::new(42).evaluate(&board).unwrap();
        assert!([-1.0, 0.0, 1.0].contains(&eval.value));
        assert!(eval.validate(&board).is_ok());
        assert_eq!(board, before);
    }

    #[test]
    fn test_rollout_is_deterministic_for_seed() {
        let board = Board::new(7, 7.5);
        let a = RolloutEvaluator::new(3).evaluate(&board).unwrap().value;
        let b = RolloutEvaluator::new(3).evaluate(&board).unwrap().value;
        assert_eq!(a, b);
    }

    #[test]
    fn test_never_fills_own_eye() {
        let mut board = Board::new(9, 7.5);
        for mv in ["A2", "pass", "B1", "pass"] {
            let vtx = board.text_to_vertex(mv);
            board.play(vtx);
        }
        let a1 = board.text_to_vertex("A1");
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..50 {
            assert_ne!(choose_random_move(&board, &mut rng), Some(a1));
        }
    }
}
