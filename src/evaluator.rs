//! Evaluator trait for position evaluation.
//!
//! The evaluator provides a move prior and a value estimate for a position.
//! In a full engine this is a policy/value network fed with
//! [`features::encode`](crate::features::encode); the search only depends on
//! the trait below.

use thiserror::Error;

use crate::board::Board;
use crate::constants::PASS_MOVE;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("policy has {found} entries, expected {expected}")]
    MalformedPolicy { expected: usize, found: usize },

    #[error("prior at index {index} is not finite")]
    NonFinitePrior { index: usize },

    #[error("value is not finite")]
    NonFiniteValue,

    #[error("evaluation failed: {0}")]
    Failed(String),
}

/// Result of evaluating a position.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// One prior per intersection in index order, followed by the PASS prior.
    pub policy: Vec<f32>,

    /// Value for the side to move, from -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

impl Evaluation {
    /// Prior for `vertex`, reading the trailing entry for PASS.
    pub fn prior(&self, board: &Board, vertex: usize) -> f32 {
        if vertex == PASS_MOVE {
            return self.policy[board.num_intersections()];
        }
        board
            .vertex_to_index(vertex)
            .map_or(0.0, |idx| self.policy[idx])
    }

    /// Check the evaluation against the board it was produced for.
    pub fn validate(&self, board: &Board) -> Result<(), EvaluatorError> {
        let expected = board.num_intersections() + 1;
        if self.policy.len() != expected {
            return Err(EvaluatorError::MalformedPolicy {
                expected,
                found: self.policy.len(),
            });
        }
        if let Some(index) = self.policy.iter().position(|p| !p.is_finite()) {
            return Err(EvaluatorError::NonFinitePrior { index });
        }
        if !self.value.is_finite() {
            return Err(EvaluatorError::NonFiniteValue);
        }
        Ok(())
    }
}

/// Trait for position evaluators.
///
/// Implementations could be:
/// - UniformEvaluator: equal priors, neutral value (for testing)
/// - RolloutEvaluator: equal priors, value from a random playout
/// - a network wrapper encoding the board with `features::encode`
pub trait Evaluator {
    /// Evaluate `board` for its side to move.
    fn evaluate(&self, board: &Board) -> Result<Evaluation, EvaluatorError>;
}

/// Uniform prior over the legal moves of `board` plus PASS.
pub fn uniform_policy(board: &Board) -> Vec<f32> {
    let n = board.num_intersections();
    let mut policy = vec![0.0; n + 1];
    let mut legal = 1; // PASS
    for (idx, p) in policy.iter_mut().take(n).enumerate() {
        if board.legal(board.index_to_vertex(idx)) {
            *p = 1.0;
            legal += 1;
        }
    }
    policy[n] = 1.0;

    let prob = 1.0 / legal as f32;
    for p in &mut policy {
        *p *= prob;
    }
    policy
}

/// Uniform evaluator that assigns equal probability to all legal moves.
/// Value is always 0.0 (neutral). Useful for testing MCTS without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, board: &Board) -> Result<Evaluation, EvaluatorError> {
        Ok(Evaluation {
            policy: uniform_policy(board),
            value: 0.0,
        })
    }
}
