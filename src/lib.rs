//! dlgo-rust: a Go engine driven by PUCT tree search.
//!
//! The search asks an external [`evaluator::Evaluator`] for move priors and a
//! position value, so a policy/value network can be plugged in without the
//! rest of the engine knowing about it. A uniform evaluator and a random
//! playout evaluator are included for play without a model.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, sentinels and engine parameters
//! - [`board`] - Game rules: captures, ko, superko, scoring
//! - [`zobrist`] - Position hashing keys
//! - [`features`] - Input planes for network evaluators
//! - [`evaluator`] - Evaluator trait and the uniform evaluator
//! - [`playout`] - Random game simulation and the rollout evaluator
//! - [`mcts`] - PUCT Monte Carlo Tree Search
//! - [`time_control`] - Clocks and per-move thinking budgets
//! - [`gtp`] - Go Text Protocol engine
//!
//! ## Example
//!
//! ```
//! use dlgo_rust::board::Board;
//! use dlgo_rust::evaluator::UniformEvaluator;
//! use dlgo_rust::mcts::{Search, SearchConfig};
//! use dlgo_rust::time_control::TimeControl;
//!
//! // Create a new game and play a move
//! let mut board = Board::new(9, 7.5);
//! let d4 = board.text_to_vertex("D4");
//! assert!(board.play(d4));
//!
//! // Run the search to find the best response
//! let evaluator = UniformEvaluator::new();
//! let config = SearchConfig::default().with_playouts(50);
//! let mut clock = TimeControl::new();
//! let result = Search::new(&board, &evaluator, &mut clock, &config)
//!     .think()
//!     .unwrap();
//! println!("Best move: {}", board.vertex_to_text(result.best_move));
//! ```

pub mod board;
pub mod constants;
pub mod evaluator;
pub mod features;
pub mod gtp;
pub mod mcts;
pub mod playout;
pub mod time_control;
pub mod zobrist;
